//! Fixed tick timing
//!
//! requestAnimationFrame fires at the display rate; the simulation wants
//! exactly one tick per [`TICK_MS`]. The scheduler accumulates frame time and
//! hands out whole ticks.

use crate::consts::{MAX_TICKS_PER_FRAME, TICK_MS};

/// Accumulator turning frame timestamps into fixed ticks
#[derive(Debug, Clone)]
pub struct TickScheduler {
    tick_ms: f64,
    max_ticks: u32,
    accumulator: f64,
    last_time: Option<f64>,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICK_MS, MAX_TICKS_PER_FRAME)
    }
}

impl TickScheduler {
    pub fn new(tick_ms: f64, max_ticks: u32) -> Self {
        Self {
            tick_ms,
            max_ticks,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Number of ticks to run for a frame at `now_ms`
    ///
    /// While `running` is false nothing accumulates, so ticks never trail into
    /// a session that was just reset or ended.
    pub fn advance(&mut self, now_ms: f64, running: bool) -> u32 {
        let elapsed = self.last_time.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_time = Some(now_ms);

        if !running {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.tick_ms && ticks < self.max_ticks {
            self.accumulator -= self.tick_ms;
            ticks += 1;
        }
        // Drop backlog beyond the cap instead of replaying it later
        if ticks == self.max_ticks {
            self.accumulator = self.accumulator.min(self.tick_ms);
        }
        ticks
    }

    /// Forget timing history (tab hidden, restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_produces_nothing() {
        let mut scheduler = TickScheduler::default();
        assert_eq!(scheduler.advance(1000.0, true), 0);
    }

    #[test]
    fn test_whole_ticks_with_remainder() {
        let mut scheduler = TickScheduler::default();
        scheduler.advance(0.0, true);
        assert_eq!(scheduler.advance(16.0, true), 0);
        assert_eq!(scheduler.advance(32.0, true), 1);
        assert_eq!(scheduler.advance(72.0, true), 2);
    }

    #[test]
    fn test_not_running_discards_time() {
        let mut scheduler = TickScheduler::default();
        scheduler.advance(0.0, true);
        scheduler.advance(15.0, true);
        assert_eq!(scheduler.advance(500.0, false), 0);
        assert_eq!(scheduler.advance(510.0, true), 0);
        assert_eq!(scheduler.advance(530.0, true), 1);
    }

    #[test]
    fn test_ticks_capped_per_frame() {
        let mut scheduler = TickScheduler::default();
        scheduler.advance(0.0, true);
        assert_eq!(scheduler.advance(10_000.0, true), MAX_TICKS_PER_FRAME);
        assert!(scheduler.advance(10_000.0, true) <= 1);
    }
}
