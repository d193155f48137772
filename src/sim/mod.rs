//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Span, bounds_collision, detect_crash, obstacle_collision};
pub use state::{Bird, CrashCause, GameEvent, GamePhase, Obstacle, SimulationState};
pub use tick::{jump, spawn_obstacle, tick};
