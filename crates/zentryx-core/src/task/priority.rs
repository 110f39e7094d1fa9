//! Prioritized task ordering.
//!
//! Tie-break keys, applied in turn:
//! 1. incomplete before completed
//! 2. tasks with a due date before tasks without one
//! 3. earlier due date first
//! 4. lower priority number first (1 is highest)
//!
//! Sorting is stable, so full ties keep insertion order.

use std::cmp::Ordering;

use super::Task;

pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| match (a.due, b.due) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.priority.cmp(&b.priority))
}

/// Owned copy of `tasks` in prioritized order. The input is untouched.
pub fn prioritize(tasks: &[Task]) -> Vec<Task> {
    let mut out = tasks.to_vec();
    out.sort_by(compare_tasks);
    out
}

/// Borrowed view of `tasks` in prioritized order.
pub fn prioritized(tasks: &[Task]) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks.iter().collect();
    out.sort_by(|a, b| compare_tasks(a, b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn task(title: &str, priority: u8) -> Task {
        Task::new(title, 25, priority).unwrap()
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn due_earlier_beats_priority() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let later = task("later", 1).with_due(base + Duration::days(2));
        let sooner = task("sooner", 5).with_due(base);
        let sorted = prioritize(&[later, sooner]);
        assert_eq!(titles(&sorted), vec!["sooner", "later"]);
    }

    #[test]
    fn dated_tasks_come_before_undated() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let undated = task("undated", 1);
        let dated = task("dated", 5).with_due(base);
        let sorted = prioritize(&[undated, dated]);
        assert_eq!(titles(&sorted), vec!["dated", "undated"]);
    }

    #[test]
    fn completed_sink_to_bottom() {
        let mut done = task("done", 1);
        done.completed = true;
        let open = task("open", 5);
        let sorted = prioritize(&[done, open]);
        assert_eq!(titles(&sorted), vec!["open", "done"]);
    }

    #[test]
    fn priority_orders_undated() {
        let sorted = prioritize(&[task("p3", 3), task("p1", 1), task("p2", 2)]);
        assert_eq!(titles(&sorted), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn full_ties_keep_insertion_order() {
        let sorted = prioritize(&[task("first", 2), task("second", 2), task("third", 2)]);
        assert_eq!(titles(&sorted), vec!["first", "second", "third"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![task("b", 3), task("a", 1)];
        let before = input.clone();
        let _ = prioritize(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn borrowed_and_owned_orders_agree() {
        let input = vec![task("b", 3), task("a", 1), task("c", 2)];
        let owned = prioritize(&input);
        let borrowed: Vec<Task> = prioritized(&input).into_iter().cloned().collect();
        assert_eq!(owned, borrowed);
    }
}
