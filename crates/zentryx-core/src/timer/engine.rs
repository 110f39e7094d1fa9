//! Focus cycle engine.
//!
//! The engine is a tick-driven state machine over [`FocusMode`]. It does not
//! use internal threads or read the system time - the caller invokes
//! `tick()` once per second while the countdown runs.
//!
//! ## State Transitions
//!
//! ```text
//! Focus --complete--> ShortBreak | LongBreak --complete--> Focus
//! ```
//!
//! A focus completion bumps the block counter and the hour histogram; the
//! break that follows is long whenever the new count is a multiple of
//! `cycles_before_long`. Manual mode switches skip all of that.
//!
//! All transitions go through [`transition`], a pure function of the
//! current state, the configuration and one [`FocusInput`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = FocusCycleEngine::new(CycleConfig::default());
//! engine.start();
//! // Once per second:
//! engine.tick(&SystemClock); // Returns Some(Event) when a block completes
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::cycle::{CycleConfig, FocusMode};
use crate::clock::ClockSource;
use crate::events::Event;
use crate::stats::FocusHistogram;

/// Snapshot of the focus cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusCycleState {
    pub mode: FocusMode,
    pub seconds_remaining: u64,
    pub running: bool,
    pub completed_focus_blocks: u32,
    pub focus_by_hour: FocusHistogram,
}

impl FocusCycleState {
    /// Idle state at the start of `mode`.
    pub fn idle(config: &CycleConfig, mode: FocusMode) -> Self {
        Self {
            mode,
            seconds_remaining: config.duration_secs(mode),
            ..Self::default()
        }
    }
}

/// Inputs accepted by the focus state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusInput {
    Start,
    Pause,
    Reset,
    SetMode(FocusMode),
    /// One second elapsed; `hour` is the local wall-clock hour.
    Tick { hour: u8 },
    /// The cycle configuration was edited.
    Reconfigure,
}

/// Pure transition function of the focus cycle.
pub fn transition(
    mut state: FocusCycleState,
    config: &CycleConfig,
    input: FocusInput,
) -> (FocusCycleState, Option<Event>) {
    let event = match input {
        FocusInput::Start => {
            if state.running {
                None
            } else {
                state.running = true;
                Some(Event::FocusStarted {
                    mode: state.mode,
                    seconds_remaining: state.seconds_remaining,
                })
            }
        }
        FocusInput::Pause => {
            if state.running {
                state.running = false;
                Some(Event::FocusPaused {
                    mode: state.mode,
                    seconds_remaining: state.seconds_remaining,
                })
            } else {
                None
            }
        }
        FocusInput::Reset => {
            state.running = false;
            state.seconds_remaining = config.duration_secs(state.mode);
            Some(Event::FocusReset {
                mode: state.mode,
                seconds_remaining: state.seconds_remaining,
            })
        }
        FocusInput::SetMode(mode) => {
            let from = state.mode;
            state.mode = mode;
            if !state.running {
                state.seconds_remaining = config.duration_secs(mode);
            }
            Some(Event::ModeChanged {
                from,
                to: mode,
                seconds_remaining: state.seconds_remaining,
            })
        }
        FocusInput::Reconfigure => {
            // A running countdown keeps its remaining time.
            if !state.running {
                state.seconds_remaining = config.duration_secs(state.mode);
            }
            None
        }
        FocusInput::Tick { hour } => {
            if !state.running {
                None
            } else if state.seconds_remaining > 1 {
                state.seconds_remaining -= 1;
                None
            } else {
                state.seconds_remaining = 0;
                state.running = false;
                Some(complete(&mut state, config, hour))
            }
        }
    };
    (state, event)
}

fn complete(state: &mut FocusCycleState, config: &CycleConfig, hour: u8) -> Event {
    let finished = state.mode;
    let event = match finished {
        FocusMode::Focus => {
            state.completed_focus_blocks = state.completed_focus_blocks.saturating_add(1);
            state.focus_by_hour.record(hour);
            let blocks = state.completed_focus_blocks;
            let next_mode = if blocks % config.cycles_before_long() == 0 {
                FocusMode::LongBreak
            } else {
                FocusMode::ShortBreak
            };
            state.mode = next_mode;
            Event::FocusBlockCompleted {
                completed_focus_blocks: blocks,
                hour,
                next_mode,
            }
        }
        FocusMode::ShortBreak | FocusMode::LongBreak => {
            state.mode = FocusMode::Focus;
            Event::BreakCompleted {
                mode: finished,
                next_mode: FocusMode::Focus,
            }
        }
    };
    state.seconds_remaining = config.duration_secs(state.mode);
    event
}

/// Focus/break cycling engine.
///
/// Owns its state and configuration; the only writer of the block counter
/// and the per-hour histogram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusCycleEngine {
    config: CycleConfig,
    state: FocusCycleState,
}

impl FocusCycleEngine {
    /// Create a new engine, idle at the start of a focus block.
    pub fn new(config: CycleConfig) -> Self {
        Self {
            state: FocusCycleState::idle(&config, FocusMode::Focus),
            config,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &FocusCycleState {
        &self.state
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn mode(&self) -> FocusMode {
        self.state.mode
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.state.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn completed_focus_blocks(&self) -> u32 {
        self.state.completed_focus_blocks
    }

    pub fn histogram(&self) -> &FocusHistogram {
        &self.state.focus_by_hour
    }

    /// Full duration of the active mode under the current configuration.
    pub fn total_secs(&self) -> u64 {
        self.config.duration_secs(self.state.mode)
    }

    /// Focus minutes completed so far, at the currently configured length.
    pub fn total_focus_minutes(&self) -> u64 {
        u64::from(self.state.completed_focus_blocks) * u64::from(self.config.focus_minutes)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.apply(FocusInput::Start)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.apply(FocusInput::Pause)
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.apply(FocusInput::Reset)
    }

    pub fn set_mode(&mut self, mode: FocusMode) -> Option<Event> {
        self.apply(FocusInput::SetMode(mode))
    }

    /// Replace the cycle configuration.
    ///
    /// While idle or paused the displayed time follows the new duration
    /// immediately. A running countdown keeps its remaining time; the new
    /// durations apply from the next mode change or reset.
    pub fn set_config(&mut self, config: CycleConfig) {
        self.config = config;
        self.apply(FocusInput::Reconfigure);
    }

    /// Call once per second. Returns the completion event when the active
    /// countdown reaches zero.
    pub fn tick(&mut self, clock: &dyn ClockSource) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.apply(FocusInput::Tick {
            hour: clock.current_hour(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&mut self, input: FocusInput) -> Option<Event> {
        let state = std::mem::take(&mut self.state);
        let (next, event) = transition(state, &self.config, input);
        self.state = next;
        match &event {
            Some(Event::FocusBlockCompleted {
                completed_focus_blocks,
                hour,
                next_mode,
            }) => info!(
                blocks = completed_focus_blocks,
                hour,
                next = %next_mode,
                "focus block completed"
            ),
            Some(other) => debug!(?other, "focus engine event"),
            None => {}
        }
        event
    }
}

impl Default for FocusCycleEngine {
    fn default() -> Self {
        Self::new(CycleConfig::default())
    }
}
