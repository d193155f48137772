//! Data-driven game balance
//!
//! All gameplay numbers live here so a page can override them with a JSON
//! blob. Missing fields fall back to the values in [`crate::consts`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Order in which a tick applies velocity and gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Move by the current velocity, then add gravity
    #[default]
    Explicit,
    /// Add gravity, then move by the updated velocity
    SemiImplicit,
}

/// Gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub bird_x: f32,
    pub bird_size: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub integrator: Integrator,
    pub obstacle_width: f32,
    pub scroll_speed: f32,
    pub initial_gap: f32,
    pub min_gap: f32,
    pub gap_shrink_divisor: u64,
    pub spawn_distance: f32,
    pub gap_top_margin: f32,
    pub gap_top_padding: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            bird_x: BIRD_X,
            bird_size: BIRD_SIZE,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            integrator: Integrator::Explicit,
            obstacle_width: OBSTACLE_WIDTH,
            scroll_speed: SCROLL_SPEED,
            initial_gap: INITIAL_GAP,
            min_gap: MIN_GAP,
            gap_shrink_divisor: GAP_SHRINK_DIVISOR,
            spawn_distance: SPAWN_DISTANCE,
            gap_top_margin: GAP_TOP_MARGIN,
            gap_top_padding: GAP_TOP_PADDING,
        }
    }
}

/// Reasons a tuning blob is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A length that must be strictly positive was not
    NonPositive(&'static str),
    /// `min_gap` exceeds `initial_gap`
    GapRange { min_gap: f32, initial_gap: f32 },
    /// Bird would not fit between ceiling and ground
    BirdTooLarge { bird_size: f32, playfield_height: f32 },
    /// Gap positions would not fit inside the playfield
    GapDoesNotFit,
    /// Divisor of zero would make the gap shrink undefined
    ZeroShrinkDivisor,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::NonPositive(field) => write!(f, "{field} must be positive"),
            TuningError::GapRange {
                min_gap,
                initial_gap,
            } => write!(f, "min_gap {min_gap} exceeds initial_gap {initial_gap}"),
            TuningError::BirdTooLarge {
                bird_size,
                playfield_height,
            } => write!(
                f,
                "bird_size {bird_size} does not fit playfield_height {playfield_height}"
            ),
            TuningError::GapDoesNotFit => write!(f, "gap range does not fit the playfield"),
            TuningError::ZeroShrinkDivisor => write!(f, "gap_shrink_divisor must be non-zero"),
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject parameter sets the simulation cannot honor
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("bird_size", self.bird_size),
            ("obstacle_width", self.obstacle_width),
            ("scroll_speed", self.scroll_speed),
            ("min_gap", self.min_gap),
        ];
        if let Some((name, _)) = positive.into_iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(TuningError::NonPositive(name));
        }
        if self.bird_size >= self.playfield_height {
            return Err(TuningError::BirdTooLarge {
                bird_size: self.bird_size,
                playfield_height: self.playfield_height,
            });
        }
        if self.min_gap > self.initial_gap {
            return Err(TuningError::GapRange {
                min_gap: self.min_gap,
                initial_gap: self.initial_gap,
            });
        }
        if self.gap_top_span() < 0.0 {
            return Err(TuningError::GapDoesNotFit);
        }
        if self.gap_shrink_divisor == 0 {
            return Err(TuningError::ZeroShrinkDivisor);
        }
        Ok(())
    }

    /// Playfield extent; the page is sized to match, one CSS pixel per unit
    #[inline]
    pub fn playfield_size(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    /// Highest valid bird y (top edge)
    #[inline]
    pub fn bird_max_y(&self) -> f32 {
        self.playfield_height - self.bird_size
    }

    /// Bird spawn height
    #[inline]
    pub fn bird_start_y(&self) -> f32 {
        self.playfield_height / 2.0
    }

    /// Width of the range gap tops are drawn from
    #[inline]
    pub fn gap_top_span(&self) -> f32 {
        self.playfield_height - self.initial_gap - self.gap_top_padding
    }

    /// Newest obstacle must scroll left of this before the next spawns
    #[inline]
    pub fn spawn_threshold(&self) -> f32 {
        self.playfield_width - self.spawn_distance
    }

    /// Gap size for an obstacle spawned at `score`
    pub fn gap_for_score(&self, score: u64) -> f32 {
        let shrink = (score / self.gap_shrink_divisor) as f32;
        (self.initial_gap - shrink).max(self.min_gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.bird_max_y(), 470.0);
        assert_eq!(tuning.spawn_threshold(), 600.0);
        assert_eq!(tuning.gap_top_span(), 200.0);
    }

    #[test]
    fn test_gap_shrinks_and_floors() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gap_for_score(0), 200.0);
        assert_eq!(tuning.gap_for_score(9), 200.0);
        assert_eq!(tuning.gap_for_score(100), 190.0);
        assert_eq!(tuning.gap_for_score(1_000), 100.0);
        assert_eq!(tuning.gap_for_score(50_000), 100.0);
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.3, "integrator": "semi_implicit" }"#)
            .expect("valid override");
        assert_eq!(tuning.gravity, 0.3);
        assert_eq!(tuning.integrator, Integrator::SemiImplicit);
        assert_eq!(tuning.initial_gap, INITIAL_GAP);
    }

    #[test]
    fn test_rejects_bad_values() {
        let tuning = Tuning {
            min_gap: 250.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapRange { .. })
        ));

        let tuning = Tuning {
            bird_size: 0.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::NonPositive("bird_size")));

        assert!(Tuning::from_json(r#"{ "gap_shrink_divisor": 0 }"#).is_err());
        assert!(Tuning::from_json("not json").is_err());
    }

    #[test]
    fn test_rejects_bird_taller_than_playfield() {
        let tuning = Tuning {
            bird_size: 500.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::BirdTooLarge {
                bird_size: 500.0,
                playfield_height: 500.0
            })
        );
        assert!(Tuning::from_json(r#"{ "bird_size": 600 }"#).is_err());

        let tuning = Tuning {
            bird_size: 499.0,
            ..Default::default()
        };
        assert!(tuning.bird_max_y() > 0.0);
        assert!(tuning.validate().is_ok());
    }
}
