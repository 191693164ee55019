//! Fixed-rate match clock for the headless arena.

use crate::types::Tick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchClock {
    pub current_tick:     Tick,
    pub ticks_per_second: u32,
}

impl MatchClock {
    pub fn new(ticks_per_second: u32) -> Self {
        assert!(ticks_per_second > 0, "ticks_per_second must be > 0");
        Self { current_tick: 0, ticks_per_second }
    }

    /// Advance one tick. Returns the new tick number.
    pub fn advance(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    pub fn dt(&self) -> f32 {
        1.0 / self.ticks_per_second as f32
    }

    /// Seconds since match start. Computed from the tick count so it
    /// never accumulates rounding drift.
    pub fn seconds_elapsed(&self) -> f32 {
        (self.current_tick as f64 / self.ticks_per_second as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_follow_ticks() {
        let mut clock = MatchClock::new(120);
        assert_eq!(clock.seconds_elapsed(), 0.0);
        for _ in 0..120 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, 120);
        assert_eq!(clock.seconds_elapsed(), 1.0);
    }

    #[test]
    #[should_panic(expected = "ticks_per_second must be > 0")]
    fn zero_rate_is_rejected() {
        MatchClock::new(0);
    }
}
