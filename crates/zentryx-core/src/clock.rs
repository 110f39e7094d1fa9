//! Wall-clock hour source.
//!
//! The engines never read the system time themselves. The host drives them
//! with periodic `tick()` calls and hands in a [`ClockSource`] whenever an
//! engine needs to know the local hour (focus blocks are tallied per hour).

use chrono::{Local, Timelike};

pub trait ClockSource {
    /// Current local wall-clock hour, 0-23.
    fn current_hour(&self) -> u8;
}

/// Reads the hour from the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn current_hour(&self) -> u8 {
        Local::now().hour() as u8
    }
}

/// Always reports the same hour. Handy for replaying a day in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u8);

impl FixedClock {
    pub fn set(&mut self, hour: u8) {
        self.0 = hour;
    }
}

impl ClockSource for FixedClock {
    fn current_hour(&self) -> u8 {
        self.0
    }
}
