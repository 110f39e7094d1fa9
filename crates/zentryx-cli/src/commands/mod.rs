pub mod coach;
pub mod config;
pub mod focus;
pub mod plan;
pub mod shell;
pub mod snapshot;
pub mod stats;
pub mod stopwatch;
pub mod timer;

use std::io::Write;
use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};
use zentryx_core::{format_mmss, format_stopwatch, Event};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// One-line human description of an engine event.
pub fn describe(event: &Event) -> String {
    match event {
        Event::FocusStarted {
            mode,
            seconds_remaining,
        } => format!("{mode} started ({})", format_mmss(*seconds_remaining)),
        Event::FocusPaused {
            mode,
            seconds_remaining,
        } => format!("{mode} paused at {}", format_mmss(*seconds_remaining)),
        Event::FocusReset {
            mode,
            seconds_remaining,
        } => format!("{mode} reset to {}", format_mmss(*seconds_remaining)),
        Event::ModeChanged {
            to,
            seconds_remaining,
            ..
        } => format!("Switched to {to} ({})", format_mmss(*seconds_remaining)),
        Event::FocusBlockCompleted {
            completed_focus_blocks,
            hour,
            next_mode,
        } => format!(
            "Focus block #{completed_focus_blocks} done ({hour:02}:00). Next: {next_mode}"
        ),
        Event::BreakCompleted { mode, next_mode } => format!("{mode} over. Next: {next_mode}"),
        Event::CountdownStarted { seconds_remaining } => {
            format!("Timer started ({})", format_mmss(*seconds_remaining))
        }
        Event::CountdownPaused { seconds_remaining } => {
            format!("Timer paused at {}", format_mmss(*seconds_remaining))
        }
        Event::CountdownSet { seconds } => format!("Timer set to {}", format_mmss(*seconds)),
        Event::CountdownReset => "Timer reset".to_string(),
        Event::CountdownFinished => "Timer finished".to_string(),
        Event::StopwatchStarted { elapsed_ms } => {
            format!("Stopwatch started at {}", format_stopwatch(*elapsed_ms))
        }
        Event::StopwatchPaused { elapsed_ms } => {
            format!("Stopwatch paused at {}", format_stopwatch(*elapsed_ms))
        }
        Event::LapRecorded { lap, elapsed_ms } => {
            format!("Lap {lap}: {}", format_stopwatch(*elapsed_ms))
        }
        Event::StopwatchReset => "Stopwatch reset".to_string(),
        Event::TaskAdded { id, title } => format!("Task added: {title} [{}]", short_id(id)),
        Event::TaskToggled { id, completed } => {
            let state = if *completed { "done" } else { "open" };
            format!("Task [{}] marked {state}", short_id(id))
        }
    }
}

/// Print an event as a JSON line or a human-readable line.
pub fn emit(event: &Event, json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else {
        println!("{}", describe(event));
    }
    Ok(())
}

/// Overwrite the current terminal line with a live readout.
pub fn redraw(line: &str) -> CliResult {
    let mut out = std::io::stdout().lock();
    write!(out, "\r{line}   ")?;
    out.flush()?;
    Ok(())
}

/// First eight characters of a task id, enough to address it in the shell.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Tick source for the engines. Late ticks are delayed rather than burst so
/// the engines never see two ticks back to back.
pub fn ticker(period_ms: u64) -> Interval {
    let mut ticker = interval(Duration::from_millis(period_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
