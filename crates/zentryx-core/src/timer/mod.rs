mod countdown;
mod cycle;
mod engine;
mod format;
mod stopwatch;

pub use countdown::{
    sanitize_seconds, CountdownEngine, CountdownState, COUNTDOWN_PRESETS_SECS, SECOND_TICK_MS,
};
pub use cycle::{
    CycleConfig, FocusMode, CYCLES_BEFORE_LONG_RANGE, FOCUS_MINUTES_RANGE,
    LONG_BREAK_MINUTES_RANGE, SHORT_BREAK_MINUTES_RANGE,
};
pub use engine::{transition, FocusCycleEngine, FocusCycleState, FocusInput};
pub use format::{format_mmss, format_stopwatch};
pub use stopwatch::{StopwatchEngine, StopwatchState, STOPWATCH_RESOLUTION_MS};
