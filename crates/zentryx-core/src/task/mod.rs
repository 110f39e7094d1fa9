//! Task list.
//!
//! Tasks are created on explicit add and only ever mutated by toggling
//! their completion flag. There is no deletion.

mod priority;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::events::Event;

pub use priority::{compare_tasks, prioritize, prioritized};

/// Highest priority (sorts first).
pub const PRIORITY_HIGHEST: u8 = 1;
/// Lowest priority.
pub const PRIORITY_LOWEST: u8 = 5;
/// Priority given to new tasks by default.
pub const DEFAULT_PRIORITY: u8 = 3;
/// Estimated minutes given to new tasks by default.
pub const DEFAULT_TASK_MINUTES: u32 = 25;
/// Bounds of the host's minutes input.
pub const TASK_MINUTES_RANGE: (u32, u32) = (5, 240);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Estimated minutes, always > 0.
    pub minutes: u32,
    /// 1 (highest) ..= 5 (lowest).
    pub priority: u8,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a new incomplete task with a fresh id.
    ///
    /// Returns `None` when the title is blank after trimming. Minutes are
    /// raised to at least 1 and priority is clamped into 1..=5.
    pub fn new(title: &str, minutes: u32, priority: u8) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            minutes: minutes.max(1),
            priority: priority.clamp(PRIORITY_HIGHEST, PRIORITY_LOWEST),
            completed: false,
            due: None,
        })
    }

    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { 'x' } else { ' ' };
        write!(f, "[{mark}] {} ({} min • P{})", self.title, self.minutes, self.priority)?;
        if let Some(due) = self.due {
            write!(f, " due {}", due.format("%Y-%m-%d %H:%M"))?;
        }
        Ok(())
    }
}

/// Insertion-ordered collection of tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task. Blank titles are ignored and yield `None`.
    pub fn add(
        &mut self,
        title: &str,
        minutes: u32,
        priority: u8,
        due: Option<DateTime<Utc>>,
    ) -> Option<&Task> {
        let mut task = Task::new(title, minutes, priority)?;
        task.due = due;
        self.push(task)
    }

    /// Append an already-built task.
    pub fn push(&mut self, task: Task) -> Option<&Task> {
        tracing::debug!(id = %task.id, title = %task.title, "task added");
        self.tasks.push(task);
        self.tasks.last()
    }

    /// Flip the completion flag of the task with `id`.
    ///
    /// Returns the new flag, or `None` when no task matches.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Like [`TaskList::toggle`] but reports the change as an event.
    pub fn toggle_event(&mut self, id: &str) -> Option<Event> {
        let completed = self.toggle(id)?;
        Some(Event::TaskToggled {
            id: id.to_string(),
            completed,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Find a task by unique id prefix, as typed by a user.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Task> {
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(prefix));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Tasks in prioritized order.
    pub fn prioritized(&self) -> Vec<&Task> {
        prioritized(&self.tasks)
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}
