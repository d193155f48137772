//! Persisted high score
//!
//! A single integer stored as base-10 text under [`HighScore::STORAGE_KEY`].

use crate::platform::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Read the stored value; absent or unparseable text counts as zero
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(text) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };
        match parse_high_score(&text) {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            None => {
                log::warn!("Ignoring corrupt high score {:?}", text);
                Self::default()
            }
        }
    }

    /// Write the current value; failures are logged, not propagated
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }

    /// Fold a finished run in; returns true if it set a new record
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

/// Parse stored text. Whole-number floats ("12.0") from older writers are
/// accepted; negatives, fractions and garbage are not.
pub fn parse_high_score(text: &str) -> Option<u64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<u64>() {
        return Some(value);
    }
    let value = text.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then_some(value as u64)
}
