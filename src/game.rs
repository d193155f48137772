//! Session controller
//!
//! `GameLoop` is the one owner of simulation state. Input adapters call
//! [`GameLoop::jump`] and [`GameLoop::restart`]; the frame driver calls
//! [`GameLoop::tick`] once per fixed interval while the run is active.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscore::HighScore;
use crate::platform::KeyValueStore;
use crate::sim::{self, GameEvent, SimulationState};
use crate::tuning::Tuning;

pub struct GameLoop<S: KeyValueStore> {
    state: SimulationState,
    rng: Pcg32,
    tuning: Tuning,
    high_score: HighScore,
    store: S,
    seed: u64,
}

impl<S: KeyValueStore> GameLoop<S> {
    /// Start a session, reading the high score from `store`
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let high_score = HighScore::load(&store);
        Self {
            state: SimulationState::new(&tuning, high_score.best),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            high_score,
            store,
            seed,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Ticks should only be scheduled while this holds
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Flap (and start the run if it is waiting)
    pub fn jump(&mut self) {
        sim::jump(&mut self.state, &self.tuning);
    }

    /// Advance one fixed step
    pub fn tick(&mut self) {
        sim::tick(&mut self.state, &mut self.rng, &self.tuning);
    }

    /// Fold the score into the high score, persist it, and reset the run
    pub fn restart(&mut self) {
        let score = self.state.score;
        let new_record = self.high_score.record(score);
        self.high_score.save(&mut self.store);

        self.state = SimulationState::new(&self.tuning, self.high_score.best);
        if new_record {
            self.state.events.push(GameEvent::NewHighScore { score });
        }
        log::info!(
            "Restarted after scoring {} (best {})",
            score,
            self.high_score.best
        );
    }

    /// Take events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
