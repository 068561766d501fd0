//! Command-line arguments layered over the `STACKER_*` environment config.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use tui_stacker::core::{EngineConfig, RotationRule};
use tui_stacker::types::FRAME_MS;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Milliseconds between gravity steps. Overrides `STACKER_FALL_INTERVAL_MS`.
    #[arg(long)]
    pub fall_interval_ms: Option<u32>,

    /// `clamp` keeps rotations inside the board even if they overlap locked cells;
    /// `checked` also rejects rotations that overlap. Overrides `STACKER_ROTATION_RULE`.
    #[arg(long, value_parser = parse_rotation_rule)]
    pub rotation_rule: Option<RotationRule>,

    /// Seed for the shape sequence, so a game can be replayed.
    /// Example: `tui-stacker --seed 42` or `tui-stacker -s 42`.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Frame period of the tick loop.
    #[arg(long, env = "STACKER_FRAME_MS", default_value_t = FRAME_MS as u64)]
    pub frame_ms: u64,

    /// Write logs to this file. Logging is off when no path is given.
    #[arg(long, env = "STACKER_LOG_PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level for the log file (`error`, `warn`, `info`, `debug`, `trace`).
    #[arg(long, env = "STACKER_LOG_LEVEL", default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

/// Everything the host loop needs, resolved from env and flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: EngineConfig,
    pub frame: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Args {
    /// Merge the flags over [`EngineConfig::from_env`].
    pub fn resolve(self) -> Result<Settings> {
        let base = EngineConfig::from_env().context("invalid STACKER_* environment")?;
        self.resolve_over(base)
    }

    fn resolve_over(self, mut engine: EngineConfig) -> Result<Settings> {
        if let Some(ms) = self.fall_interval_ms {
            engine.fall_interval_ms = ms;
        }
        if let Some(rule) = self.rotation_rule {
            engine.rotation_rule = rule;
        }
        if self.seed.is_some() {
            engine.seed = self.seed;
        }
        engine.validate().context("invalid engine options")?;

        if self.frame_ms == 0 {
            anyhow::bail!("--frame-ms must be greater than zero");
        }

        Ok(Settings {
            engine,
            frame: Duration::from_millis(self.frame_ms),
            log_file: self.log_file,
            log_level: self.log_level,
        })
    }
}

fn parse_rotation_rule(s: &str) -> Result<RotationRule, String> {
    RotationRule::from_str(s)
        .ok_or_else(|| format!("unknown rotation rule `{s}` (expected clamp or checked)"))
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level `{s}`"))
}
