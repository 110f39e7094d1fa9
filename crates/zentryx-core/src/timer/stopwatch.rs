//! Free-running stopwatch with lap capture.
//!
//! Elapsed time is an accumulator of tick resolutions, not a wall-clock
//! delta, so scheduling jitter in the host's tick source shows up as drift.

use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default tick resolution in milliseconds.
pub const STOPWATCH_RESOLUTION_MS: u64 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchState {
    pub elapsed_ms: u64,
    pub running: bool,
    pub laps: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwatchEngine {
    state: StopwatchState,
    resolution_ms: u64,
}

impl StopwatchEngine {
    pub fn new() -> Self {
        Self::with_resolution(STOPWATCH_RESOLUTION_MS)
    }

    /// Stopwatch advancing `resolution_ms` per tick (at least 1 ms).
    pub fn with_resolution(resolution_ms: u64) -> Self {
        Self {
            state: StopwatchState::default(),
            resolution_ms: resolution_ms.max(1),
        }
    }

    pub fn state(&self) -> &StopwatchState {
        &self.state
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.state.elapsed_ms
    }

    pub fn laps(&self) -> &[u64] {
        &self.state.laps
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn resolution_ms(&self) -> u64 {
        self.resolution_ms
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        self.state.running = true;
        Some(Event::StopwatchStarted {
            elapsed_ms: self.state.elapsed_ms,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        Some(Event::StopwatchPaused {
            elapsed_ms: self.state.elapsed_ms,
        })
    }

    /// Call once per resolution interval.
    pub fn tick(&mut self) {
        if self.state.running {
            self.state.elapsed_ms = self.state.elapsed_ms.saturating_add(self.resolution_ms);
        }
    }

    /// Snapshot the elapsed time. Rejected while nothing has elapsed.
    pub fn lap(&mut self) -> Option<Event> {
        if self.state.elapsed_ms == 0 {
            return None;
        }
        self.state.laps.push(self.state.elapsed_ms);
        Some(Event::LapRecorded {
            lap: self.state.laps.len(),
            elapsed_ms: self.state.elapsed_ms,
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.state = StopwatchState::default();
        Some(Event::StopwatchReset)
    }
}

impl Default for StopwatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::format_stopwatch;

    #[test]
    fn accumulates_ticks_at_resolution() {
        let mut sw = StopwatchEngine::new();
        sw.start();
        for _ in 0..25 {
            sw.tick();
        }
        assert_eq!(sw.elapsed_ms(), 2500);
        assert_eq!(format_stopwatch(sw.elapsed_ms()), "00:02.5");
    }

    #[test]
    fn ticks_ignored_while_paused() {
        let mut sw = StopwatchEngine::new();
        sw.tick();
        assert_eq!(sw.elapsed_ms(), 0);
        sw.start();
        sw.tick();
        sw.pause();
        sw.tick();
        assert_eq!(sw.elapsed_ms(), 100);
    }

    #[test]
    fn lap_rejected_at_zero() {
        let mut sw = StopwatchEngine::new();
        assert!(sw.lap().is_none());
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn laps_capture_snapshots_in_order() {
        let mut sw = StopwatchEngine::new();
        sw.start();
        sw.tick();
        assert_eq!(
            sw.lap(),
            Some(Event::LapRecorded {
                lap: 1,
                elapsed_ms: 100
            })
        );
        sw.tick();
        sw.tick();
        sw.lap();
        assert_eq!(sw.laps(), &[100, 300]);
    }

    #[test]
    fn lap_allowed_while_paused() {
        let mut sw = StopwatchEngine::new();
        sw.start();
        sw.tick();
        sw.pause();
        assert!(sw.lap().is_some());
    }

    #[test]
    fn reset_clears_everything() {
        let mut sw = StopwatchEngine::new();
        sw.start();
        sw.tick();
        sw.lap();
        sw.reset();
        assert_eq!(sw.state(), &StopwatchState::default());
    }

    #[test]
    fn custom_resolution() {
        let mut sw = StopwatchEngine::with_resolution(0);
        assert_eq!(sw.resolution_ms(), 1);
        sw.start();
        sw.tick();
        assert_eq!(sw.elapsed_ms(), 1);
    }
}
