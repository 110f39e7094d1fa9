use serde::{Deserialize, Serialize};

use crate::timer::FocusMode;

/// Every state change in the engines produces an Event.
/// The host renders them; nothing in the core subscribes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    FocusStarted {
        mode: FocusMode,
        seconds_remaining: u64,
    },
    FocusPaused {
        mode: FocusMode,
        seconds_remaining: u64,
    },
    FocusReset {
        mode: FocusMode,
        seconds_remaining: u64,
    },
    /// Manual mode switch; bypasses cycle counting.
    ModeChanged {
        from: FocusMode,
        to: FocusMode,
        seconds_remaining: u64,
    },
    /// A focus countdown reached zero.
    FocusBlockCompleted {
        completed_focus_blocks: u32,
        hour: u8,
        next_mode: FocusMode,
    },
    /// A short or long break reached zero.
    BreakCompleted {
        mode: FocusMode,
        next_mode: FocusMode,
    },
    CountdownStarted {
        seconds_remaining: u64,
    },
    CountdownPaused {
        seconds_remaining: u64,
    },
    CountdownSet {
        seconds: u64,
    },
    CountdownReset,
    CountdownFinished,
    StopwatchStarted {
        elapsed_ms: u64,
    },
    StopwatchPaused {
        elapsed_ms: u64,
    },
    LapRecorded {
        /// 1-based lap number.
        lap: usize,
        elapsed_ms: u64,
    },
    StopwatchReset,
    TaskAdded {
        id: String,
        title: String,
    },
    TaskToggled {
        id: String,
        completed: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let ev = Event::FocusBlockCompleted {
            completed_focus_blocks: 2,
            hour: 9,
            next_mode: FocusMode::ShortBreak,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "focus_block_completed");
        assert_eq!(json["next_mode"], "short_break");
    }
}
