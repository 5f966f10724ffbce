//! Fixed-period tick scheduling.
//!
//! The simulation advances in whole ticks, never in fractional time steps.
//! [`TickClock`] tells the event loop how many ticks are due at a given
//! instant and when the next one should fire, so the loop can sleep with
//! `ControlFlow::WaitUntil` between ticks.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use particle_box::time::TickClock;
//!
//! let start = Instant::now();
//! let mut clock = TickClock::starting_at(Duration::from_millis(17), start);
//!
//! assert_eq!(clock.due(start), 0);
//! assert_eq!(clock.due(start + Duration::from_millis(35)), 2);
//! assert_eq!(clock.tick_count(), 2);
//! ```

use std::time::{Duration, Instant};

/// Default tick period, roughly 59 ticks per second.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(17);

/// Default cap on ticks run back-to-back after a stall.
pub const DEFAULT_MAX_CATCH_UP: u32 = 5;

/// Fixed-period tick scheduler with bounded catch-up.
#[derive(Debug, Clone)]
pub struct TickClock {
    /// Time between ticks.
    period: Duration,
    /// When the next tick becomes due.
    next_tick: Instant,
    /// Most ticks reported by a single [`TickClock::due`] call.
    max_catch_up: u32,
    /// Total ticks reported since start.
    tick_count: u64,
}

impl TickClock {
    /// Create a clock whose first tick is due one period from now.
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    /// Create a clock whose first tick is due one period after `start`.
    ///
    /// A zero period is bumped to one millisecond.
    pub fn starting_at(period: Duration, start: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_tick: start + period,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
            tick_count: 0,
        }
    }

    /// Limit how many overdue ticks are replayed after a stall.
    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    /// Number of ticks due at `now`, advancing the schedule past them.
    ///
    /// When more than the catch-up limit is overdue (the window was dragged,
    /// the process was suspended) the backlog is dropped and the schedule
    /// restarts from `now`.
    pub fn due(&mut self, now: Instant) -> u32 {
        if now < self.next_tick {
            return 0;
        }

        let behind = now.duration_since(self.next_tick);
        let overdue = 1 + behind.as_nanos() / self.period.as_nanos();

        let ticks = if overdue > u128::from(self.max_catch_up) {
            self.next_tick = now + self.period;
            self.max_catch_up
        } else {
            let ticks = overdue as u32;
            self.next_tick += self.period * ticks;
            ticks
        };

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// When the next tick becomes due.
    #[inline]
    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Total ticks reported since start.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Restart the schedule from `now` without touching the tick count.
    pub fn reset(&mut self, now: Instant) {
        self.next_tick = now + self.period;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_clock_new() {
        let clock = TickClock::default();
        assert_eq!(clock.period(), DEFAULT_TICK_PERIOD);
        assert_eq!(clock.tick_count(), 0);
    }

    #[test]
    fn test_nothing_due_before_period() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(ms(17), start);
        assert_eq!(clock.due(start + ms(16)), 0);
        assert_eq!(clock.due(start + ms(17)), 1);
        assert_eq!(clock.due(start + ms(18)), 0);
        assert_eq!(clock.next_tick(), start + ms(34));
    }

    #[test]
    fn test_schedule_does_not_drift() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(ms(10), start);
        assert_eq!(clock.due(start + ms(13)), 1);
        // The second tick is still due at 20ms, not 23ms.
        assert_eq!(clock.due(start + ms(20)), 1);
        assert_eq!(clock.tick_count(), 2);
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(ms(10), start).with_max_catch_up(3);
        let now = start + ms(1000);
        assert_eq!(clock.due(now), 3);
        assert_eq!(clock.next_tick(), now + ms(10));
        assert_eq!(clock.tick_count(), 3);
    }

    #[test]
    fn test_zero_period_bumped() {
        let clock = TickClock::starting_at(Duration::ZERO, Instant::now());
        assert_eq!(clock.period(), ms(1));
    }

    #[test]
    fn test_reset() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(ms(10), start);
        let later = start + ms(500);
        clock.reset(later);
        assert_eq!(clock.due(later + ms(5)), 0);
        assert_eq!(clock.due(later + ms(10)), 1);
    }
}
