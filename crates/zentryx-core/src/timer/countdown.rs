//! Single-shot countdown for the standalone Timer tool.
//!
//! No modes and no auto-repeat: the countdown stops at zero and reports
//! [`Event::CountdownFinished`] once.

use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub seconds_remaining: u64,
    pub running: bool,
}

/// Tick period of the one-second engines (countdown and focus cycle). Each
/// tick removes exactly one second, so hosts must not drive them faster.
pub const SECOND_TICK_MS: u64 = 1000;

/// Common presets offered next to the countdown (5, 10 and 25 minutes).
pub const COUNTDOWN_PRESETS_SECS: [u64; 3] = [5 * 60, 10 * 60, 25 * 60];

/// Coerce a host-supplied duration to whole seconds.
///
/// Negative, NaN and infinite values become 0, fractions are truncated.
pub fn sanitize_seconds(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        0
    } else {
        value as u64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountdownEngine {
    state: CountdownState,
}

impl CountdownEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CountdownState {
        &self.state
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.state.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Start counting down. Does nothing when already running or when there
    /// is no time left.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.running || self.state.seconds_remaining == 0 {
            return None;
        }
        self.state.running = true;
        Some(Event::CountdownStarted {
            seconds_remaining: self.state.seconds_remaining,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        Some(Event::CountdownPaused {
            seconds_remaining: self.state.seconds_remaining,
        })
    }

    /// Load a new duration. The countdown is stopped.
    pub fn set_duration(&mut self, seconds: u64) -> Option<Event> {
        self.state = CountdownState {
            seconds_remaining: seconds,
            running: false,
        };
        Some(Event::CountdownSet { seconds })
    }

    /// Load a duration and start immediately, like the preset buttons.
    ///
    /// A zero duration is already finished: the countdown stays stopped and
    /// `CountdownFinished` is returned.
    pub fn start_with(&mut self, seconds: u64) -> Option<Event> {
        self.set_duration(seconds);
        if seconds == 0 {
            return Some(Event::CountdownFinished);
        }
        self.start()
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.state = CountdownState::default();
        Some(Event::CountdownReset)
    }

    /// Call once per second.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        if self.state.seconds_remaining == 0 {
            self.state.running = false;
            tracing::debug!("countdown finished");
            return Some(Event::CountdownFinished);
        }
        None
    }
}
