use zentryx_core::{Config, ProductivityAnalyzer, ProductivityReport};

use super::snapshot::SnapshotArgs;
use super::CliResult;

pub fn run(args: SnapshotArgs, config: &Config) -> CliResult {
    let histogram = args.histogram();
    let report = ProductivityAnalyzer::new().analyze(
        &args.tasks,
        args.completed_blocks(&histogram),
        args.focus_minutes(config),
        &histogram,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

pub fn render(report: &ProductivityReport) -> String {
    format!(
        "Focus time:      {} min ({} blocks)\n\
         Tasks done:      {}/{} ({}%)\n\
         Best focus hour: {}\n\
         {}\n",
        report.total_focus_minutes,
        report.completed_focus_blocks,
        report.completed_tasks,
        report.total_tasks,
        report.completion_pct(),
        report.best_hour_label(),
        report.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use zentryx_core::{FocusHistogram, Task};

    #[test]
    fn render_blank_day() {
        let report = ProductivityAnalyzer::new().analyze(&[], 0, 25, &FocusHistogram::new());
        let text = render(&report);
        assert!(text.contains("Focus time:      0 min (0 blocks)"));
        assert!(text.contains("Tasks done:      0/0 (0%)"));
        assert!(text.contains("Best focus hour: Not enough data yet"));
        assert!(text.ends_with(&format!("{}\n", report.message)));
    }

    #[test]
    fn render_rounds_percentage_half_up() {
        let mut tasks: Vec<Task> = (0..8)
            .map(|i| Task::new(&format!("task {i}"), 25, 3).unwrap())
            .collect();
        tasks[0].completed = true;
        let report = ProductivityAnalyzer::new().analyze(&tasks, 0, 25, &FocusHistogram::new());
        assert!(render(&report).contains("Tasks done:      1/8 (13%)"));
    }

    #[test]
    fn render_best_hour() {
        let histogram = FocusHistogram::from_counts([(14, 2)]);
        let report = ProductivityAnalyzer::new().analyze(&[], 2, 25, &histogram);
        assert!(render(&report).contains("Best focus hour: 14:00"));
    }
}
