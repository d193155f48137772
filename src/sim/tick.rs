//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. The RNG is
//! passed in so a seeded generator reproduces a run exactly.

use rand::Rng;

use super::collision::detect_crash;
use super::state::{GameEvent, GamePhase, Obstacle, SimulationState};
use crate::tuning::{Integrator, Tuning};

/// Flap: set the bird's velocity to the jump impulse
///
/// Starts the session on the first call. Ignored once the run is over.
pub fn jump(state: &mut SimulationState, tuning: &Tuning) {
    if state.is_over() {
        return;
    }
    state.bird.vel = tuning.jump_impulse;
    if state.phase == GamePhase::Ready {
        state.phase = GamePhase::Playing;
        state.events.push(GameEvent::Started);
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<R: Rng>(state: &mut SimulationState, rng: &mut R, tuning: &Tuning) {
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;

    integrate_bird(state, tuning);
    scroll_obstacles(state, tuning);

    let spawn_due = state
        .obstacles
        .last()
        .is_none_or(|newest| newest.x < tuning.spawn_threshold());
    if spawn_due {
        spawn_obstacle(state, rng, tuning);
    }

    state.score += 1;

    if let Some(cause) = detect_crash(&state.bird, &state.obstacles, tuning) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            cause,
        });
        log::debug!("Crash at tick {}: {:?}", state.time_ticks, cause);
    }
}

/// Apply velocity and gravity, clamping the bird inside the playfield
fn integrate_bird(state: &mut SimulationState, tuning: &Tuning) {
    let bird = &mut state.bird;
    match tuning.integrator {
        Integrator::Explicit => {
            bird.y = (bird.y + bird.vel).clamp(0.0, tuning.bird_max_y());
            bird.vel += tuning.gravity;
        }
        Integrator::SemiImplicit => {
            bird.vel += tuning.gravity;
            bird.y = (bird.y + bird.vel).clamp(0.0, tuning.bird_max_y());
        }
    }
}

/// Move every pipe left and drop the ones that left the screen
fn scroll_obstacles(state: &mut SimulationState, tuning: &Tuning) {
    let width = tuning.obstacle_width;
    for obstacle in &mut state.obstacles {
        obstacle.x -= tuning.scroll_speed;
    }
    let events = &mut state.events;
    state.obstacles.retain(|obstacle| {
        let keep = !obstacle.is_off_screen(width);
        if !keep {
            events.push(GameEvent::ObstacleCleared { id: obstacle.id });
        }
        keep
    });
}

/// Append a pipe at the right edge with a random gap position
pub fn spawn_obstacle<R: Rng>(
    state: &mut SimulationState,
    rng: &mut R,
    tuning: &Tuning,
) {
    let span = tuning.gap_top_span();
    let gap_top = if span > 0.0 {
        tuning.gap_top_margin + rng.random_range(0.0..span)
    } else {
        tuning.gap_top_margin
    };
    let gap = tuning.gap_for_score(state.score);
    let id = state.next_obstacle_id();

    state.obstacles.push(Obstacle {
        id,
        x: tuning.playfield_width,
        gap_top,
        gap,
    });
    state.events.push(GameEvent::ObstacleSpawned { id, gap });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CrashCause;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn started(tuning: &Tuning) -> SimulationState {
        let mut state = SimulationState::new(tuning, 0);
        jump(&mut state, tuning);
        state
    }

    #[test]
    fn test_tick_does_nothing_before_start() {
        let tuning = Tuning::default();
        let mut state = SimulationState::new(&tuning, 0);
        let mut rng = Pcg32::seed_from_u64(1);

        tick(&mut state, &mut rng, &tuning);
        assert_eq!(state.score, 0);
        assert_eq!(state.bird.y, 250.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_jump_starts_and_sets_impulse() {
        let tuning = Tuning::default();
        let mut state = SimulationState::new(&tuning, 0);
        jump(&mut state, &tuning);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.vel, -7.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);

        // No accumulation
        jump(&mut state, &tuning);
        assert_eq!(state.bird.vel, -7.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_jump_ignored_when_over() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.phase = GamePhase::GameOver;
        state.bird.vel = 3.0;
        jump(&mut state, &tuning);
        assert_eq!(state.bird.vel, 3.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_first_tick_explicit_integration() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        let mut rng = Pcg32::seed_from_u64(1);

        tick(&mut state, &mut rng, &tuning);
        assert!((state.bird.y - 243.0).abs() < 1e-4);
        assert!((state.bird.vel - -6.55).abs() < 1e-4);
    }

    #[test]
    fn test_first_tick_semi_implicit_integration() {
        let tuning = Tuning {
            integrator: Integrator::SemiImplicit,
            ..Default::default()
        };
        let mut state = started(&tuning);
        let mut rng = Pcg32::seed_from_u64(1);

        tick(&mut state, &mut rng, &tuning);
        assert!((state.bird.y - (250.0 - 6.55)).abs() < 1e-4);
        assert!((state.bird.vel - -6.55).abs() < 1e-4);
    }

    #[test]
    fn test_first_tick_spawns_one_obstacle() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        let mut rng = Pcg32::seed_from_u64(7);

        tick(&mut state, &mut rng, &tuning);
        assert_eq!(state.obstacles.len(), 1);
        let obstacle = state.obstacles[0];
        assert_eq!(obstacle.x, 800.0);
        assert_eq!(obstacle.gap, 200.0);
        assert!(obstacle.gap_top >= 50.0 && obstacle.gap_top < 250.0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_next_spawn_waits_for_threshold() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        let mut rng = Pcg32::seed_from_u64(7);

        // Keep the bird airborne while pipes scroll
        for _ in 0..67 {
            jump(&mut state, &tuning);
            state.bird.y = 250.0;
            tick(&mut state, &mut rng, &tuning);
        }
        // 800 - 66 * 3 = 602, still right of the 600 threshold
        assert_eq!(state.obstacles.len(), 1);

        jump(&mut state, &tuning);
        state.bird.y = 250.0;
        tick(&mut state, &mut rng, &tuning);
        assert_eq!(state.obstacles.len(), 2);
        assert!(state.obstacles[0].id < state.obstacles[1].id);
        assert_eq!(state.obstacles[1].x, 800.0);
    }

    #[test]
    fn test_gap_shrinks_at_score_100() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.score = 100;
        let mut rng = Pcg32::seed_from_u64(3);

        tick(&mut state, &mut rng, &tuning);
        assert_eq!(state.obstacles[0].gap, 190.0);
        assert_eq!(state.score, 101);
    }

    #[test]
    fn test_offscreen_obstacles_are_dropped() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.bird.y = 400.0;
        state.obstacles.push(Obstacle {
            id: 99,
            x: -47.0,
            gap_top: 100.0,
            gap: 200.0,
        });
        let mut rng = Pcg32::seed_from_u64(3);

        tick(&mut state, &mut rng, &tuning);
        assert!(state.obstacles.iter().all(|o| o.id != 99));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ObstacleCleared { id: 99 })
        );
    }

    #[test]
    fn test_ground_crash_freezes_state() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.bird.y = 468.0;
        state.bird.vel = 5.0;
        let mut rng = Pcg32::seed_from_u64(3);

        tick(&mut state, &mut rng, &tuning);
        assert_eq!(state.bird.y, 470.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            score: 1,
            cause: CrashCause::Ground
        }));

        let obstacles = state.obstacles.clone();
        for _ in 0..10 {
            tick(&mut state, &mut rng, &tuning);
        }
        assert_eq!(state.score, 1);
        assert_eq!(state.obstacles, obstacles);
    }

    #[test]
    fn test_ceiling_crash() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.bird.y = 3.0;
        let mut rng = Pcg32::seed_from_u64(3);

        tick(&mut state, &mut rng, &tuning);
        assert_eq!(state.bird.y, 0.0);
        assert!(state.is_over());
    }

    #[test]
    fn test_tall_bird_that_validates_ticks_without_panic() {
        let tuning = Tuning {
            bird_size: 499.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
        let mut state = started(&tuning);
        let mut rng = Pcg32::seed_from_u64(3);

        tick(&mut state, &mut rng, &tuning);
        assert!(state.bird.y >= 0.0 && state.bird.y <= tuning.bird_max_y());
        assert!(state.is_over());
    }

    #[test]
    fn test_pipe_crash() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.bird.vel = 0.0;
        state.bird.y = 20.0;
        state.obstacles.push(Obstacle {
            id: 5,
            x: 63.0,
            gap_top: 200.0,
            gap: 150.0,
        });
        let mut rng = Pcg32::seed_from_u64(3);

        tick(&mut state, &mut rng, &tuning);
        assert!(state.is_over());
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut state1 = started(&tuning);
        let mut state2 = started(&tuning);
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        for i in 0..200 {
            if i % 15 == 0 {
                jump(&mut state1, &tuning);
                jump(&mut state2, &tuning);
            }
            tick(&mut state1, &mut rng1, &tuning);
            tick(&mut state2, &mut rng2, &tuning);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.bird, state2.bird);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(seed in any::<u64>(), jumps in prop::collection::vec(any::<bool>(), 1..400)) {
            let tuning = Tuning::default();
            let mut state = started(&tuning);
            let mut rng = Pcg32::seed_from_u64(seed);

            for flap in jumps {
                if flap {
                    jump(&mut state, &tuning);
                }
                let score_before = state.score;
                let was_over = state.is_over();
                tick(&mut state, &mut rng, &tuning);

                if was_over {
                    prop_assert_eq!(state.score, score_before);
                } else {
                    prop_assert_eq!(state.score, score_before + 1);
                }
                prop_assert!(state.bird.y >= 0.0 && state.bird.y <= tuning.bird_max_y());
                for obstacle in &state.obstacles {
                    prop_assert!(obstacle.gap >= tuning.min_gap);
                    prop_assert!(obstacle.x > -tuning.obstacle_width);
                }
                prop_assert!(state.obstacles.windows(2).all(|w| w[0].id < w[1].id && w[0].x < w[1].x));
            }
        }
    }
}
