//! Day plan synthesis.
//!
//! A plan is the four fixed daily anchors followed by up to three 25-minute
//! focus blocks: one at the best focus hour, one the hour after, and one at
//! 16:00. Hours are not wrapped past 24 and focus blocks are not moved out of
//! the way of the anchors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::{prioritized, Task};

/// Hour used for the first focus block when there is no focus history.
pub const DEFAULT_FOCUS_HOUR: u8 = 10;
/// Hour of the third focus block.
pub const AFTERNOON_FOCUS_HOUR: u8 = 16;
/// Length of a planned focus block.
pub const PLANNED_FOCUS_MINUTES: u8 = 25;

/// Hour and minute on a plan. The hour may exceed 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Type of plan block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Meals and sleep
    Anchor,
    /// Planned deep work
    Focus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub start: ClockTime,
    pub end: ClockTime,
    pub kind: BlockKind,
    pub label: String,
    /// Task the block was planned for, if any.
    #[serde(default)]
    pub task_id: Option<String>,
}

impl TimeBlock {
    pub fn anchor(start: ClockTime, end: ClockTime, label: &str) -> Self {
        Self {
            start,
            end,
            kind: BlockKind::Anchor,
            label: label.to_string(),
            task_id: None,
        }
    }

    /// 25-minute focus block for `task`, starting on the hour.
    pub fn focus(hour: u8, task: &Task) -> Self {
        Self {
            start: ClockTime::new(hour, 0),
            end: ClockTime::new(hour, PLANNED_FOCUS_MINUTES),
            kind: BlockKind::Focus,
            label: task.title.clone(),
            task_id: Some(task.id.clone()),
        }
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BlockKind::Anchor => write!(f, "{}–{}  {}", self.start, self.end, self.label),
            BlockKind::Focus => write!(f, "{}–{}  Focus: {}", self.start, self.end, self.label),
        }
    }
}

/// Proposed plan for the day, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub blocks: Vec<TimeBlock>,
}

impl DayPlan {
    pub fn lines(&self) -> Vec<String> {
        self.blocks.iter().map(ToString::to_string).collect()
    }

    pub fn focus_blocks(&self) -> impl Iterator<Item = &TimeBlock> {
        self.blocks.iter().filter(|b| b.kind == BlockKind::Focus)
    }
}

impl fmt::Display for DayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Breakfast, lunch, dinner and sleep.
pub fn default_anchors() -> Vec<TimeBlock> {
    vec![
        TimeBlock::anchor(ClockTime::new(7, 30), ClockTime::new(8, 0), "Breakfast"),
        TimeBlock::anchor(ClockTime::new(13, 0), ClockTime::new(13, 30), "Lunch"),
        TimeBlock::anchor(ClockTime::new(20, 0), ClockTime::new(20, 30), "Dinner"),
        TimeBlock::anchor(ClockTime::new(23, 30), ClockTime::new(7, 0), "Sleep"),
    ]
}

#[derive(Debug, Clone)]
pub struct ScheduleSynthesizer {
    anchors: Vec<TimeBlock>,
}

impl Default for ScheduleSynthesizer {
    fn default() -> Self {
        Self {
            anchors: default_anchors(),
        }
    }
}

impl ScheduleSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchors(anchors: Vec<TimeBlock>) -> Self {
        Self { anchors }
    }

    pub fn anchors(&self) -> &[TimeBlock] {
        &self.anchors
    }

    /// Hours of the three focus blocks for a given best hour.
    pub fn focus_hours(best_hour: Option<u8>) -> [u8; 3] {
        let best = best_hour.unwrap_or(DEFAULT_FOCUS_HOUR);
        [best, best.saturating_add(1), AFTERNOON_FOCUS_HOUR]
    }

    /// Build the plan: anchors first, then one focus block for each of the
    /// top three open tasks in prioritized order, at the hours from
    /// [`ScheduleSynthesizer::focus_hours`]. No open tasks, no focus blocks.
    pub fn synthesize(&self, best_hour: Option<u8>, tasks: &[Task]) -> DayPlan {
        let open = prioritized(tasks).into_iter().filter(|t| !t.completed);
        let mut blocks = self.anchors.clone();
        blocks.extend(
            Self::focus_hours(best_hour)
                .into_iter()
                .zip(open)
                .map(|(hour, task)| TimeBlock::focus(hour, task)),
        );
        tracing::debug!(blocks = blocks.len(), ?best_hour, "day plan synthesized");
        DayPlan { blocks }
    }
}
