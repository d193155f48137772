//! Demo mode: a bot that decides when to flap
//!
//! Aims the bird's bottom edge just above the bottom of the next gap and
//! flaps whenever it sinks below that line.

use crate::sim::{GamePhase, Obstacle, SimulationState};
use crate::tuning::Tuning;

/// Clearance kept between the bird and the lower pipe
const AIM_MARGIN: f32 = 8.0;

/// First pipe the bird has not fully passed yet
pub fn next_obstacle<'a>(state: &'a SimulationState, tuning: &Tuning) -> Option<&'a Obstacle> {
    state
        .obstacles
        .iter()
        .find(|o| o.right(tuning.obstacle_width) >= tuning.bird_x)
}

/// Bird y the bot is trying to hold
pub fn target_y(state: &SimulationState, tuning: &Tuning) -> f32 {
    match next_obstacle(state, tuning) {
        Some(obstacle) => obstacle.gap_bottom() - tuning.bird_size - AIM_MARGIN,
        None => tuning.bird_start_y(),
    }
}

/// Whether the bot would jump this tick
pub fn should_jump(state: &SimulationState, tuning: &Tuning) -> bool {
    match state.phase {
        GamePhase::Ready => true,
        GamePhase::Playing => state.bird.y > target_y(state, tuning),
        GamePhase::GameOver => false,
    }
}
