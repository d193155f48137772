//! Flappy Web - A Flappy Bird clone for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, obstacle spawning)
//! - `game`: Session controller owning state, RNG and high score
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (storage, input, tick timing)
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod game;
pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::GameLoop;
pub use highscore::HighScore;
pub use settings::{BirdSkin, Settings};
pub use tuning::{Integrator, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (50 Hz)
    pub const TICK_MS: f64 = 20.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 5;

    /// Playfield dimensions (logical units, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 50.0;
    /// Collision box edge length
    pub const BIRD_SIZE: f32 = 30.0;
    /// Rendered sprite edge length (larger than the hitbox)
    pub const BIRD_SPRITE_SIZE: f32 = 50.0;

    /// Physics (per tick)
    pub const GRAVITY: f32 = 0.45;
    pub const JUMP_IMPULSE: f32 = -7.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const SCROLL_SPEED: f32 = 3.0;
    pub const INITIAL_GAP: f32 = 200.0;
    pub const MIN_GAP: f32 = 100.0;
    /// Gap shrinks by one unit every this many points
    pub const GAP_SHRINK_DIVISOR: u64 = 10;
    /// A new obstacle spawns once the newest one is this far from the right edge
    pub const SPAWN_DISTANCE: f32 = 200.0;
    /// Minimum distance between the playfield top and a gap's top edge
    pub const GAP_TOP_MARGIN: f32 = 50.0;
    /// Subtracted from the free vertical space when picking a gap position
    pub const GAP_TOP_PADDING: f32 = 100.0;
}
