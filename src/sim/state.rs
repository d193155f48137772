//! Game state and core simulation types
//!
//! Everything the presentation layer reads lives here.

use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the first jump
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Bird crashed; only restart leaves this phase
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Ceiling,
    Ground,
    Obstacle { id: u32 },
}

/// Things that happened during a tick or control action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// First jump of the session
    Started,
    ObstacleSpawned { id: u32, gap: f32 },
    /// Obstacle scrolled fully off the left edge
    ObstacleCleared { id: u32 },
    GameOver { score: u64, cause: CrashCause },
    /// Restart folded a better score into the high score
    NewHighScore { score: u64 },
}

/// The player's bird. Horizontal position is fixed by [`Tuning::bird_x`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Top edge (y grows downward)
    pub y: f32,
    /// Vertical velocity per tick (negative is up)
    pub vel: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            y: tuning.bird_start_y(),
            vel: 0.0,
        }
    }

    /// Bottom edge for a bird of the given size
    #[inline]
    pub fn bottom(&self, size: f32) -> f32 {
        self.y + size
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the upper pipe
    pub gap_top: f32,
    /// Vertical size of the opening
    pub gap: f32,
}

impl Obstacle {
    /// Top edge of the lower pipe
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }

    /// Right edge for a given pipe width
    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    /// True once the pipe has scrolled fully past the left boundary
    #[inline]
    pub fn is_off_screen(&self, width: f32) -> bool {
        self.x <= -width
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub bird: Bird,
    /// Oldest first
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Events since the last drain (not gameplay-affecting)
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationState {
    /// Fresh session state carrying over a previously recorded high score
    pub fn new(tuning: &Tuning, high_score: u64) -> Self {
        Self {
            bird: Bird::new(tuning),
            obstacles: Vec::new(),
            score: 0,
            high_score,
            phase: GamePhase::Ready,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Ready
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Ticks should be driven only while this holds
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
