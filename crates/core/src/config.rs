//! Engine configuration
//!
//! Values come from defaults, then environment variables, then whatever the
//! host layers on top (the binary applies CLI flags last).

use std::fmt;

use crate::types::DEFAULT_FALL_INTERVAL_MS;

/// How a rotation is validated after the bounding box is clamped to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationRule {
    /// Clamp to the board edges only; may overlap locked cells
    Clamp,
    /// Clamp, then reject the rotation if it overlaps locked cells
    #[default]
    ClampAndCheck,
}

impl RotationRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Some(RotationRule::Clamp),
            "checked" | "clamp-and-check" => Some(RotationRule::ClampAndCheck),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationRule::Clamp => "clamp",
            RotationRule::ClampAndCheck => "checked",
        }
    }
}

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse
    InvalidEnv { var: &'static str, value: String },
    /// Gravity must advance at some point
    ZeroFallInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "invalid value {:?} for {}", value, var)
            }
            ConfigError::ZeroFallInterval => write!(f, "fall interval must be at least 1ms"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings of the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Milliseconds between automatic gravity steps
    pub fall_interval_ms: u32,
    pub rotation_rule: RotationRule,
    /// Seed for the shape picker; `None` draws one from the thread RNG
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            rotation_rule: RotationRule::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub const ENV_FALL_INTERVAL: &'static str = "STACKER_FALL_INTERVAL_MS";
    pub const ENV_ROTATION_RULE: &'static str = "STACKER_ROTATION_RULE";
    pub const ENV_SEED: &'static str = "STACKER_SEED";

    /// Defaults overridden by `STACKER_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(Self::ENV_FALL_INTERVAL)) {
            config.fall_interval_ms = raw.parse().map_err(|_| ConfigError::InvalidEnv {
                var: Self::ENV_FALL_INTERVAL,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = non_empty(lookup(Self::ENV_ROTATION_RULE)) {
            config.rotation_rule =
                RotationRule::from_str(&raw).ok_or_else(|| ConfigError::InvalidEnv {
                    var: Self::ENV_ROTATION_RULE,
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = non_empty(lookup(Self::ENV_SEED)) {
            config.seed = Some(raw.parse().map_err(|_| ConfigError::InvalidEnv {
                var: Self::ENV_SEED,
                value: raw.clone(),
            })?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroFallInterval);
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.fall_interval_ms, 1000);
        assert_eq!(config.rotation_rule, RotationRule::ClampAndCheck);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn env_overrides_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("STACKER_FALL_INTERVAL_MS", "250"),
            ("STACKER_ROTATION_RULE", "clamp"),
            ("STACKER_SEED", " 42 "),
        ]))
        .unwrap();
        assert_eq!(config.fall_interval_ms, 250);
        assert_eq!(config.rotation_rule, RotationRule::Clamp);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = EngineConfig::from_lookup(lookup(&[("STACKER_SEED", "  ")])).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = EngineConfig::from_lookup(lookup(&[("STACKER_FALL_INTERVAL_MS", "fast")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: "STACKER_FALL_INTERVAL_MS",
                value: "fast".to_string()
            }
        );

        let err =
            EngineConfig::from_lookup(lookup(&[("STACKER_FALL_INTERVAL_MS", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroFallInterval);
    }

    #[test]
    fn rotation_rule_names() {
        assert_eq!(RotationRule::from_str("CHECKED"), Some(RotationRule::ClampAndCheck));
        assert_eq!(RotationRule::from_str("clamp"), Some(RotationRule::Clamp));
        assert_eq!(RotationRule::from_str("srs"), None);
    }
}
