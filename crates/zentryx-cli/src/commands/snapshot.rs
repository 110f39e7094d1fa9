//! Inputs for the one-shot `plan` and `stats` commands.
//!
//! Tasks and focus history are passed on the command line instead of being
//! persisted; the core keeps no state between runs.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use zentryx_core::task::{DEFAULT_PRIORITY, DEFAULT_TASK_MINUTES, TASK_MINUTES_RANGE};
use zentryx_core::task::{PRIORITY_HIGHEST, PRIORITY_LOWEST};
use zentryx_core::{Config, FocusHistogram, Task, ValidationError};

#[derive(Debug, Clone, Args)]
pub struct SnapshotArgs {
    /// Task as `TITLE[,minutes=N][,priority=P][,due=DATE][,done]`
    #[arg(long = "task", value_name = "TASK", value_parser = parse_task)]
    pub tasks: Vec<Task>,
    /// Completed focus blocks in an hour, as `HOUR=COUNT`
    #[arg(long = "focus", value_name = "HOUR=COUNT", value_parser = parse_focus_entry)]
    pub focus: Vec<(u8, u32)>,
    /// Completed focus blocks (defaults to the sum of --focus counts)
    #[arg(long)]
    pub blocks: Option<u32>,
    /// Focus block length in minutes (defaults to the configured length)
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=90))]
    pub focus_minutes: Option<u32>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SnapshotArgs {
    pub fn histogram(&self) -> FocusHistogram {
        FocusHistogram::from_counts(self.focus.iter().copied())
    }

    pub fn completed_blocks(&self, histogram: &FocusHistogram) -> u32 {
        self.blocks
            .unwrap_or_else(|| u32::try_from(histogram.total()).unwrap_or(u32::MAX))
    }

    pub fn focus_minutes(&self, config: &Config) -> u32 {
        self.focus_minutes
            .unwrap_or_else(|| config.cycle().focus_minutes)
    }
}

/// Parse a `--task` value.
///
/// The first comma-separated field is the title; the rest are
/// `minutes=N`, `priority=P`, `due=DATE` or the bare flag `done`.
pub fn parse_task(raw: &str) -> Result<Task, ValidationError> {
    let mut fields = raw.split(',');
    let title = fields.next().unwrap_or_default();

    let mut minutes = DEFAULT_TASK_MINUTES;
    let mut priority = DEFAULT_PRIORITY;
    let mut due = None;
    let mut done = false;

    for field in fields.map(str::trim).filter(|f| !f.is_empty()) {
        match field.split_once('=') {
            Some(("minutes", v)) => {
                minutes = parse_in_range("minutes", v, TASK_MINUTES_RANGE)?;
            }
            Some(("priority", v)) => {
                let p = parse_in_range(
                    "priority",
                    v,
                    (u32::from(PRIORITY_HIGHEST), u32::from(PRIORITY_LOWEST)),
                )?;
                priority = u8::try_from(p).unwrap_or(PRIORITY_LOWEST);
            }
            Some(("due", v)) => due = Some(parse_due(v)?),
            None if field == "done" => done = true,
            _ => {
                return Err(ValidationError::InvalidValue {
                    field: "task".into(),
                    message: format!("unrecognized field '{field}'"),
                })
            }
        }
    }

    let mut task = Task::new(title, minutes, priority).ok_or_else(|| ValidationError::InvalidValue {
        field: "title".into(),
        message: "title must not be blank".to_string(),
    })?;
    if let Some(due) = due {
        task = task.with_due(due);
    }
    task.completed = done;
    Ok(task)
}

/// Parse a `--focus HOUR=COUNT` value.
pub fn parse_focus_entry(raw: &str) -> Result<(u8, u32), ValidationError> {
    let (hour, count) = raw.split_once('=').ok_or_else(|| ValidationError::InvalidValue {
        field: "focus".into(),
        message: format!("expected HOUR=COUNT, got '{raw}'"),
    })?;
    let hour = parse_in_range("hour", hour, (0, 23))?;
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|e| ValidationError::InvalidValue {
            field: "count".into(),
            message: e.to_string(),
        })?;
    Ok((u8::try_from(hour).unwrap_or(23), count))
}

/// Accepts RFC 3339 timestamps or a bare `YYYY-MM-DD` (midnight UTC).
fn parse_due(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "due".into(),
            message: format!("expected RFC 3339 or YYYY-MM-DD, got '{raw}'"),
        })
}

fn parse_in_range(
    field: &'static str,
    raw: &str,
    (min, max): (u32, u32),
) -> Result<u32, ValidationError> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|e| ValidationError::InvalidValue {
            field: field.into(),
            message: e.to_string(),
        })?;
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ValidationError::OutOfRange {
            field,
            min: i64::from(min),
            max: i64::from(max),
            value,
        });
    }
    Ok(value as u32)
}
