//! Lifecycle listeners - one slot per event kind

use std::fmt;

use crate::types::EngineEvent;

type Callback = Box<dyn FnMut() + Send>;
type ScoreCallback = Box<dyn FnMut(u32) + Send>;

/// Observer slots for start, game over and score changes.
///
/// Registering a listener replaces the previous one for that event kind.
#[derive(Default)]
pub struct Listeners {
    on_start: Option<Callback>,
    on_game_over: Option<Callback>,
    on_score_change: Option<ScoreCallback>,
}

impl Listeners {
    pub fn set_on_start(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_start = Some(Box::new(f));
    }

    pub fn set_on_game_over(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_game_over = Some(Box::new(f));
    }

    pub fn set_on_score_change(&mut self, f: impl FnMut(u32) + Send + 'static) {
        self.on_score_change = Some(Box::new(f));
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Deliver an event to its slot, if one is registered
    pub fn emit(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Started => {
                if let Some(f) = self.on_start.as_mut() {
                    f();
                }
            }
            EngineEvent::GameOver => {
                if let Some(f) = self.on_game_over.as_mut() {
                    f();
                }
            }
            EngineEvent::ScoreChanged(score) => {
                if let Some(f) = self.on_score_change.as_mut() {
                    f(score);
                }
            }
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("on_start", &self.on_start.is_some())
            .field("on_game_over", &self.on_game_over.is_some())
            .field("on_score_change", &self.on_score_change.is_some())
            .finish()
    }
}
