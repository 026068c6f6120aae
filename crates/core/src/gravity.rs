//! Gravity clock - turns fixed-rate ticks into discrete downward steps.
//!
//! Every tick adds `drop_speed` to an accumulator; once it reaches the drop cycle
//! a step is due and the accumulator starts over. The tick rate of the host is
//! thereby decoupled from the perceived fall speed.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GravityClock {
    drop_cycle: u32,
    drop_speed: u32,
    accumulator: u32,
}

impl GravityClock {
    /// `drop_speed` is clamped into `[0, drop_cycle]`
    pub fn new(drop_cycle: u32, drop_speed: u32) -> Self {
        Self {
            drop_cycle,
            drop_speed: drop_speed.min(drop_cycle),
            accumulator: 0,
        }
    }

    pub fn drop_cycle(&self) -> u32 {
        self.drop_cycle
    }

    pub fn drop_speed(&self) -> u32 {
        self.drop_speed
    }

    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }

    /// Change speed, clamped into `[0, drop_cycle]`
    pub fn set_drop_speed(&mut self, speed: u32) {
        self.drop_speed = speed.min(self.drop_cycle);
    }

    /// Advance one tick. Returns true when a downward step is due.
    pub fn advance(&mut self) -> bool {
        self.accumulator = self.accumulator.saturating_add(self.drop_speed);
        if self.accumulator >= self.drop_cycle {
            self.accumulator = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_every_cycle() {
        let mut clock = GravityClock::new(1000, 50);
        let steps: Vec<bool> = (0..40).map(|_| clock.advance()).collect();
        let due: Vec<usize> = steps
            .iter()
            .enumerate()
            .filter(|(_, &d)| d)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(due, vec![19, 39]);
        assert_eq!(clock.accumulator(), 0);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut clock = GravityClock::new(1000, 5000);
        assert_eq!(clock.drop_speed(), 1000);
        assert!(clock.advance());

        clock.set_drop_speed(2000);
        assert_eq!(clock.drop_speed(), 1000);
    }

    #[test]
    fn test_zero_speed_never_steps() {
        let mut clock = GravityClock::new(1000, 0);
        assert!((0..1000).all(|_| !clock.advance()));
    }

    #[test]
    fn test_huge_cycle_does_not_overflow() {
        let mut clock = GravityClock::new(u32::MAX, u32::MAX - 1);
        assert!(!clock.advance());
        assert!(clock.advance());
        assert_eq!(clock.accumulator(), 0);
    }

    #[test]
    fn test_reset_clears_accumulator() {
        let mut clock = GravityClock::new(1000, 300);
        clock.advance();
        assert_eq!(clock.accumulator(), 300);
        clock.reset();
        assert_eq!(clock.accumulator(), 0);
    }
}
