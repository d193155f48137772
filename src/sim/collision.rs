//! Collision detection between the bird, the playfield bounds and pipes
//!
//! Everything is axis-aligned, so a pair of 1D spans per body is enough.

use super::state::{Bird, CrashCause, Obstacle};
use crate::tuning::Tuning;

/// Closed interval on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.min < other.max && self.max > other.min
    }
}

/// Bird's fixed horizontal extent
#[inline]
pub fn bird_span_x(tuning: &Tuning) -> Span {
    Span::new(tuning.bird_x, tuning.bird_x + tuning.bird_size)
}

/// Check the bird against the ceiling and the ground
///
/// Position is clamped during integration, so a hit means the bird sits
/// exactly on a boundary.
pub fn bounds_collision(bird: &Bird, tuning: &Tuning) -> Option<CrashCause> {
    if bird.y <= 0.0 {
        Some(CrashCause::Ceiling)
    } else if bird.y >= tuning.bird_max_y() {
        Some(CrashCause::Ground)
    } else {
        None
    }
}

/// Check the bird against a single pipe pair
pub fn obstacle_collision(bird: &Bird, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let pipe = Span::new(obstacle.x, obstacle.right(tuning.obstacle_width));
    if !pipe.overlaps(&bird_span_x(tuning)) {
        return false;
    }
    bird.y < obstacle.gap_top || bird.bottom(tuning.bird_size) > obstacle.gap_bottom()
}

/// Check the bird against everything; the first cause found wins
///
/// Every pipe is still evaluated so the result does not depend on order.
pub fn detect_crash(bird: &Bird, obstacles: &[Obstacle], tuning: &Tuning) -> Option<CrashCause> {
    let mut cause = bounds_collision(bird, tuning);
    for obstacle in obstacles {
        if obstacle_collision(bird, obstacle, tuning) && cause.is_none() {
            cause = Some(CrashCause::Obstacle { id: obstacle.id });
        }
    }
    cause
}
