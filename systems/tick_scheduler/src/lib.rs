#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-rate logic tick layered over variable frame deltas.
//!
//! Drone-like units make their decisions on discrete ticks while motion
//! integrates every frame. [`TickClock`] accumulates simulated time exactly
//! and reports a tick whenever a frame crosses a multiple of the tick rate.
//! [`Subtick`] and [`Debounce`] are the small counters behaviors use to
//! spread work across consecutive ticks.

use std::time::Duration;

use dronewell_core::{Event, DEFAULT_TICK_RATE};

/// Configuration parameters required to construct a tick clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tick_rate: Duration,
}

impl Config {
    /// Creates a configuration ticking every `tick_rate`.
    #[must_use]
    pub const fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Interval between logic ticks.
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        self.tick_rate
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

/// Reports whether advancing from `previous` to `now` crosses a tick boundary.
///
/// The boundary considered is the latest multiple of `rate` not after `now`.
/// A boundary landing exactly on `now` counts as crossed, one landing exactly
/// on `previous` does not, so consecutive frames never share a boundary.
#[must_use]
pub fn crosses_boundary(previous: Duration, now: Duration, rate: Duration) -> bool {
    if rate.is_zero() || now <= previous {
        return false;
    }
    let rate_nanos = rate.as_nanos();
    let boundary = now.as_nanos() / rate_nanos * rate_nanos;
    previous.as_nanos() < boundary
}

/// Simulated clock that fires edge-triggered logic ticks.
#[derive(Clone, Debug)]
pub struct TickClock {
    rate: Duration,
    elapsed: Duration,
    ticks: u64,
}

impl TickClock {
    /// Creates a clock at time zero.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rate: config.tick_rate,
            elapsed: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Advances the clock, returning `true` when a tick boundary was crossed.
    ///
    /// A frame spanning several boundaries still yields a single tick.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let previous = self.elapsed;
        self.elapsed = self.elapsed.saturating_add(dt);
        let fired = crosses_boundary(previous, self.elapsed, self.rate);
        if fired {
            self.ticks = self.ticks.saturating_add(1);
        }
        fired
    }

    /// Consumes `TimeAdvanced` events, returning how many ticks fired.
    pub fn handle(&mut self, events: &[Event]) -> u64 {
        let mut fired = 0;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                if self.advance(*dt) {
                    fired += 1;
                }
            }
        }
        fired
    }

    /// Simulated time accumulated so far.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of ticks fired so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Interval between ticks.
    #[must_use]
    pub const fn rate(&self) -> Duration {
        self.rate
    }
}

/// Wrapping counter spreading multi-step actions across ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subtick {
    value: u32,
    period: u32,
}

impl Subtick {
    /// Creates a counter cycling through `0..period`.
    #[must_use]
    pub const fn new(period: u32) -> Self {
        Self {
            value: 0,
            period: if period == 0 { 1 } else { period },
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.value
    }

    /// Moves to the next phase, wrapping at the period.
    pub fn advance(&mut self) {
        self.value = (self.value + 1) % self.period;
    }

    /// Returns to phase zero.
    pub fn reset(&mut self) {
        self.value = 0;
    }
}

/// Wall-collision cooldown measured in logic ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Debounce {
    remaining: u32,
}

impl Debounce {
    /// Ticks a triggered debounce stays closed.
    pub const COOLDOWN: u32 = 2;

    /// Creates an open debounce.
    #[must_use]
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Counts down one tick.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Closes the debounce and returns `true` if it was open.
    pub fn try_trigger(&mut self) -> bool {
        if self.remaining > 0 {
            return false;
        }
        self.remaining = Self::COOLDOWN;
        true
    }

    /// Reports whether a trigger would currently succeed.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_on_now_counts_but_not_on_previous() {
        let rate = Duration::from_millis(500);
        assert!(crosses_boundary(
            Duration::from_millis(400),
            Duration::from_millis(500),
            rate
        ));
        assert!(!crosses_boundary(
            Duration::from_millis(500),
            Duration::from_millis(600),
            rate
        ));
    }

    #[test]
    fn zero_rate_never_ticks() {
        assert!(!crosses_boundary(
            Duration::ZERO,
            Duration::from_secs(3),
            Duration::ZERO
        ));
    }

    #[test]
    fn debounce_reopens_after_cooldown() {
        let mut debounce = Debounce::new();
        assert!(debounce.try_trigger());
        assert!(!debounce.try_trigger());
        debounce.tick();
        assert!(!debounce.is_open());
        debounce.tick();
        assert!(debounce.try_trigger());
    }

    #[test]
    fn subtick_wraps_at_period() {
        let mut subtick = Subtick::new(2);
        subtick.advance();
        assert_eq!(subtick.get(), 1);
        subtick.advance();
        assert_eq!(subtick.get(), 0);
    }
}
