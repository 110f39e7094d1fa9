//! Productivity analytics derived on demand from the task list and the
//! focus engine's counters.

use serde::{Deserialize, Serialize};

use super::histogram::FocusHistogram;
use crate::task::Task;

/// Qualitative read on the day so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    BlankDay,
    DoingGreat,
    SlowDay,
    MakingProgress,
}

impl Assessment {
    pub fn message(self) -> &'static str {
        match self {
            Assessment::BlankDay => {
                "Today is still blank. Let’s add one small task and start a 15-minute focus block."
            }
            Assessment::DoingGreat => {
                "You’re doing great today. High completion and solid focus time. Consider a longer rest before bed."
            }
            Assessment::SlowDay => {
                "Slow day so far. Try one tiny task and a 10–15 minute focus session to restart momentum."
            }
            Assessment::MakingProgress => {
                "You’re making progress. Let’s finish 1–2 more tasks and then you can relax guilt-free."
            }
        }
    }
}

/// Thresholds for [`Assessment`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentThresholds {
    /// Completion percentage at or above which the day counts as great.
    pub great_completion_pct: u32,
    /// Focus minutes needed for a great day.
    pub great_focus_minutes: u64,
    /// Completion percentage below which the day counts as slow.
    pub slow_completion_pct: u32,
    /// Focus minutes below which the day counts as slow.
    pub slow_focus_minutes: u64,
}

impl Default for AssessmentThresholds {
    fn default() -> Self {
        Self {
            great_completion_pct: 80,
            great_focus_minutes: 120,
            slow_completion_pct: 40,
            slow_focus_minutes: 60,
        }
    }
}

/// Everything the stats view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityReport {
    pub total_focus_minutes: u64,
    pub completed_focus_blocks: u32,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    /// 0.0 ..= 1.0
    pub completion_rate: f64,
    pub best_hour: Option<u8>,
    pub assessment: Assessment,
    pub message: String,
}

impl ProductivityReport {
    /// Completion rate as a whole percentage, rounded half up.
    pub fn completion_pct(&self) -> u32 {
        ProductivityAnalyzer::completion_pct(self.completed_tasks, self.total_tasks)
    }

    /// `HH:00` for the best hour, or a placeholder when there is no data.
    pub fn best_hour_label(&self) -> String {
        match self.best_hour {
            Some(hour) => format!("{hour:02}:00"),
            None => "Not enough data yet".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductivityAnalyzer {
    thresholds: AssessmentThresholds,
}

impl ProductivityAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: AssessmentThresholds) -> Self {
        Self { thresholds }
    }

    /// Focus time at the *current* focus length; earlier blocks run at a
    /// different length are not tracked.
    pub fn total_focus_minutes(completed_focus_blocks: u32, focus_minutes: u32) -> u64 {
        u64::from(completed_focus_blocks) * u64::from(focus_minutes)
    }

    /// `completed / total`, 0 for an empty list.
    pub fn completion_rate(completed: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        }
    }

    /// [`completion_rate`](Self::completion_rate) as a whole percentage,
    /// rounded half up.
    pub fn completion_pct(completed: usize, total: usize) -> u32 {
        (Self::completion_rate(completed, total) * 100.0).round() as u32
    }

    pub fn best_hour(histogram: &FocusHistogram) -> Option<u8> {
        histogram.best_hour()
    }

    /// First matching rule wins. The completion rate is compared as a
    /// whole percentage, rounded half up.
    pub fn assess(&self, completed: usize, total: usize, total_focus_minutes: u64) -> Assessment {
        if total == 0 && total_focus_minutes == 0 {
            return Assessment::BlankDay;
        }
        let pct = Self::completion_pct(completed, total);
        let t = &self.thresholds;
        if pct >= t.great_completion_pct && total_focus_minutes >= t.great_focus_minutes {
            Assessment::DoingGreat
        } else if pct < t.slow_completion_pct && total_focus_minutes < t.slow_focus_minutes {
            Assessment::SlowDay
        } else {
            Assessment::MakingProgress
        }
    }

    pub fn analyze(
        &self,
        tasks: &[Task],
        completed_focus_blocks: u32,
        focus_minutes: u32,
        histogram: &FocusHistogram,
    ) -> ProductivityReport {
        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();
        let total_focus_minutes = Self::total_focus_minutes(completed_focus_blocks, focus_minutes);
        let assessment = self.assess(completed_tasks, total_tasks, total_focus_minutes);
        ProductivityReport {
            total_focus_minutes,
            completed_focus_blocks,
            completed_tasks,
            total_tasks,
            completion_rate: Self::completion_rate(completed_tasks, total_tasks),
            best_hour: histogram.best_hour(),
            assessment,
            message: assessment.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(done: usize, open: usize) -> Vec<Task> {
        let mut out = Vec::new();
        for i in 0..done {
            let mut t = Task::new(&format!("done {i}"), 25, 3).unwrap();
            t.completed = true;
            out.push(t);
        }
        for i in 0..open {
            out.push(Task::new(&format!("open {i}"), 25, 3).unwrap());
        }
        out
    }

    #[test]
    fn completion_pct_rounds_half_up() {
        assert_eq!(ProductivityAnalyzer::completion_pct(1, 8), 13);
        assert_eq!(ProductivityAnalyzer::completion_pct(3, 8), 38);
        assert_eq!(ProductivityAnalyzer::completion_pct(0, 0), 0);
        let report =
            ProductivityAnalyzer::new().analyze(&tasks(1, 7), 0, 25, &FocusHistogram::new());
        assert_eq!(report.completion_pct(), 13);
    }

    #[test]
    fn completion_rate_of_empty_list_is_zero() {
        let rate = ProductivityAnalyzer::completion_rate(0, 0);
        assert_eq!(rate, 0.0);
        assert!(!rate.is_nan());
    }

    #[test]
    fn blank_day() {
        let a = ProductivityAnalyzer::new();
        assert_eq!(a.assess(0, 0, 0), Assessment::BlankDay);
    }

    #[test]
    fn no_tasks_but_focus_time_is_not_blank() {
        let a = ProductivityAnalyzer::new();
        assert_eq!(a.assess(0, 0, 25), Assessment::SlowDay);
        assert_eq!(a.assess(0, 0, 200), Assessment::MakingProgress);
    }

    #[test]
    fn doing_great_needs_rate_and_focus() {
        let a = ProductivityAnalyzer::new();
        assert_eq!(a.assess(4, 5, 120), Assessment::DoingGreat);
        assert_eq!(a.assess(4, 5, 119), Assessment::MakingProgress);
        assert_eq!(a.assess(3, 5, 300), Assessment::MakingProgress);
    }

    #[test]
    fn slow_day_needs_low_rate_and_low_focus() {
        let a = ProductivityAnalyzer::new();
        assert_eq!(a.assess(1, 3, 50), Assessment::SlowDay);
        assert_eq!(a.assess(1, 3, 60), Assessment::MakingProgress);
        assert_eq!(a.assess(2, 5, 0), Assessment::MakingProgress);
    }

    #[test]
    fn rate_is_rounded_to_whole_percent() {
        let a = ProductivityAnalyzer::new();
        // 79.7% rounds to 80%.
        assert_eq!(a.assess(797, 1000, 120), Assessment::DoingGreat);
        // 39.6% rounds to 40%, which is not below 40.
        assert_eq!(a.assess(396, 1000, 0), Assessment::MakingProgress);
        assert_eq!(a.assess(394, 1000, 0), Assessment::SlowDay);
    }

    #[test]
    fn analyze_builds_report() {
        let a = ProductivityAnalyzer::new();
        let hist = FocusHistogram::from_counts([(9, 3), (14, 1)]);
        let report = a.analyze(&tasks(4, 1), 5, 25, &hist);
        assert_eq!(report.total_focus_minutes, 125);
        assert_eq!(report.completed_tasks, 4);
        assert_eq!(report.total_tasks, 5);
        assert!((report.completion_rate - 0.8).abs() < f64::EPSILON);
        assert_eq!(report.best_hour, Some(9));
        assert_eq!(report.best_hour_label(), "09:00");
        assert_eq!(report.assessment, Assessment::DoingGreat);
        assert_eq!(report.message, Assessment::DoingGreat.message());
    }

    #[test]
    fn report_without_history() {
        let report = ProductivityAnalyzer::new().analyze(&[], 0, 25, &FocusHistogram::new());
        assert_eq!(report.best_hour, None);
        assert_eq!(report.best_hour_label(), "Not enough data yet");
        assert_eq!(report.assessment, Assessment::BlankDay);
    }

    #[test]
    fn custom_thresholds() {
        let a = ProductivityAnalyzer::with_thresholds(AssessmentThresholds {
            great_completion_pct: 50,
            great_focus_minutes: 25,
            ..AssessmentThresholds::default()
        });
        assert_eq!(a.assess(1, 2, 25), Assessment::DoingGreat);
    }
}
