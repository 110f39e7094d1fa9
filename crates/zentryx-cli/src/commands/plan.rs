use zentryx_core::{prioritize, Config, DayPlan, ScheduleSynthesizer, Task};

use super::snapshot::SnapshotArgs;
use super::CliResult;

pub fn run(args: SnapshotArgs, _config: &Config) -> CliResult {
    let histogram = args.histogram();
    let plan = ScheduleSynthesizer::new().synthesize(histogram.best_hour(), &args.tasks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render(&plan, &args.tasks));
    }
    Ok(())
}

/// Plan followed by the prioritized task list.
pub fn render(plan: &DayPlan, tasks: &[Task]) -> String {
    let mut out = String::from("Day plan\n");
    for line in plan.lines() {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    if !tasks.is_empty() {
        out.push_str("\nTasks\n");
        for task in prioritize(tasks) {
            out.push_str(&format!("  {task}\n"));
        }
    }
    out
}
