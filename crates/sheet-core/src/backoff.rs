//! Adaptive cool-down for rate-limited reads.
//!
//! Each throttle moves the level one step on the [`CoolDownLadder`]: up when it
//! lands inside the escalation window left by the previous sleep, down otherwise.
//! The window opens when a sleep ends and lasts as long as that sleep.

mod clock;
mod ladder;

#[cfg(test)]
pub(crate) use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use ladder::{CoolDownLadder, DEFAULT_COOL_DOWNS};

use std::time::{Duration, Instant};
use tracing::warn;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackoffState {
    level: usize,
    window_end: Option<Instant>,
}

impl BackoffState {
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn window_end(&self) -> Option<Instant> {
        self.window_end
    }

    /// Adjusts the level for a throttle observed at `now` and returns the wait for the new level.
    pub fn on_throttle(&mut self, ladder: &CoolDownLadder, now: Instant) -> Duration {
        let throttled_again = self.window_end.is_some_and(|end| now < end);
        self.level = if throttled_again {
            ladder.escalate(self.level)
        } else {
            ladder.deescalate(self.level)
        };
        ladder.step(self.level)
    }

    pub fn record_sleep(&mut self, woke_at: Instant, slept: Duration) {
        self.window_end = woke_at.checked_add(slept);
    }
}

/// Owns one [`BackoffState`]. Not shared: every orchestrator builds its own.
pub struct BackoffController<C = SystemClock> {
    ladder: CoolDownLadder,
    state: BackoffState,
    clock: C,
}

impl BackoffController<SystemClock> {
    pub fn new(ladder: CoolDownLadder) -> Self {
        Self::with_clock(ladder, SystemClock)
    }
}

impl Default for BackoffController<SystemClock> {
    fn default() -> Self {
        Self::new(CoolDownLadder::default())
    }
}

impl<C: Clock> BackoffController<C> {
    pub fn with_clock(ladder: CoolDownLadder, clock: C) -> Self {
        Self {
            ladder,
            state: BackoffState::default(),
            clock,
        }
    }

    pub fn ladder(&self) -> &CoolDownLadder {
        &self.ladder
    }

    pub fn level(&self) -> usize {
        self.state.level()
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Blocks for the cool-down selected after adjusting the level, and returns it.
    pub fn handle_throttle(&mut self) -> Duration {
        let previous = self.ladder.step(self.state.level());
        let wait = self.state.on_throttle(&self.ladder, self.clock.now());
        warn!(
            wait_secs = wait.as_secs(),
            previous_secs = previous.as_secs(),
            level = self.state.level(),
            "Throttling back for {}s",
            wait.as_secs()
        );
        self.clock.sleep(wait);
        let woke_at = self.clock.now();
        self.state.record_sleep(woke_at, wait);
        wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> BackoffController<ManualClock> {
        BackoffController::with_clock(CoolDownLadder::default(), ManualClock::new())
    }

    fn secs(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_secs).collect()
    }

    #[test]
    fn first_throttle_sleeps_baseline() {
        let mut backoff = controller();
        let waited = backoff.handle_throttle();
        assert_eq!(waited, Duration::from_secs(5));
        assert_eq!(backoff.level(), 0);
        assert_eq!(backoff.clock_mut().sleeps, secs(&[5]));
    }

    #[test]
    fn back_to_back_throttles_climb_and_wrap() {
        let mut backoff = controller();
        let mut levels = Vec::new();
        for _ in 0..6 {
            backoff.handle_throttle();
            levels.push(backoff.level());
        }
        assert_eq!(levels, vec![0, 1, 2, 3, 4, 0]);
        assert_eq!(backoff.clock_mut().sleeps, secs(&[5, 10, 20, 40, 60, 5]));
    }

    #[test]
    fn quiet_period_steps_down_one_level() {
        let mut backoff = controller();
        for _ in 0..4 {
            backoff.handle_throttle();
        }
        assert_eq!(backoff.level(), 3);
        backoff.clock_mut().advance(Duration::from_secs(3600));
        let waited = backoff.handle_throttle();
        assert_eq!(backoff.level(), 2);
        assert_eq!(waited, Duration::from_secs(20));
    }

    #[test]
    fn quiet_period_at_floor_keeps_baseline() {
        let mut backoff = controller();
        backoff.handle_throttle();
        backoff.clock_mut().advance(Duration::from_secs(600));
        let waited = backoff.handle_throttle();
        assert_eq!(backoff.level(), 0);
        assert_eq!(waited, Duration::from_secs(5));
    }

    #[test]
    fn window_lasts_as_long_as_the_sleep() {
        let mut backoff = controller();
        backoff.handle_throttle();
        backoff.handle_throttle();
        assert_eq!(backoff.level(), 1);

        // slept 10s, so a throttle 9s after waking still counts as "again"
        backoff.clock_mut().advance(Duration::from_secs(9));
        backoff.handle_throttle();
        assert_eq!(backoff.level(), 2);

        // slept 20s, a throttle exactly 20s after waking is outside the window
        backoff.clock_mut().advance(Duration::from_secs(20));
        backoff.handle_throttle();
        assert_eq!(backoff.level(), 1);
    }

    #[test]
    fn sleep_always_matches_adjusted_level() {
        let mut backoff = controller();
        let gaps = [0, 0, 3, 100, 0, 0, 0, 0, 7, 45, 0, 1000, 0];
        for gap in gaps {
            backoff.clock_mut().advance(Duration::from_secs(gap));
            let waited = backoff.handle_throttle();
            let level = backoff.level();
            assert!(level <= backoff.ladder().last_level());
            assert_eq!(waited, backoff.ladder().step(level));
        }
        let sleeps = backoff.clock_mut().sleeps.clone();
        assert_eq!(sleeps.len(), gaps.len());
    }

    #[test]
    fn state_tracks_window_end() {
        let ladder = CoolDownLadder::default();
        let mut state = BackoffState::default();
        let start = Instant::now();
        assert_eq!(state.on_throttle(&ladder, start), Duration::from_secs(5));
        assert_eq!(state.window_end(), None);
        let woke = start + Duration::from_secs(5);
        state.record_sleep(woke, Duration::from_secs(5));
        assert_eq!(state.window_end(), Some(woke + Duration::from_secs(5)));
        assert_eq!(state.on_throttle(&ladder, woke), Duration::from_secs(10));
    }
}
