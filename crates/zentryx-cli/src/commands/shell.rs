//! Interactive dashboard session.
//!
//! Reads one command per line from stdin while the focus cycle, countdown
//! and stopwatch keep ticking in the background. Coach replies are printed
//! once their delay has passed; replies still pending at end of input are
//! delivered before the session summary.

use std::collections::VecDeque;
use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};
use zentryx_core::timer::{
    sanitize_seconds, CYCLES_BEFORE_LONG_RANGE, FOCUS_MINUTES_RANGE, LONG_BREAK_MINUTES_RANGE,
    SECOND_TICK_MS, SHORT_BREAK_MINUTES_RANGE,
};
use zentryx_core::{
    format_mmss, format_stopwatch, Config, CycleConfig, Event, FocusMode, PendingReply, Session,
    Speaker, SystemClock, ValidationError,
};

use super::snapshot::parse_task;
use super::{describe, short_id, stats, ticker, CliResult};

const HELP: &str = "\
focus:      start | pause | reset | mode <focus|short|long>
            cycle <focus> <short> <long> <cycles>
timer:      timer <seconds> | timer set <seconds> | timer start|pause|reset
stopwatch:  sw start|pause|lap|reset
tasks:      add TITLE[,minutes=N][,priority=P][,due=DATE] | done <id> | tasks
views:      status | stats | plan
coach:      say <message> | chat
            help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Quit,
    Status,
    FocusStart,
    FocusPause,
    FocusReset,
    Mode(FocusMode),
    Cycle(CycleConfig),
    TimerRun(f64),
    TimerSet(f64),
    TimerStart,
    TimerPause,
    TimerReset,
    StopwatchStart,
    StopwatchPause,
    StopwatchLap,
    StopwatchReset,
    Add(String),
    Toggle(String),
    Tasks,
    Stats,
    Plan,
    Say(String),
    Chat,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(h, r)| (h, r.trim()));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let cmd = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit", _) => ShellCommand::Quit,
        ("status", []) => ShellCommand::Status,
        ("start", []) => ShellCommand::FocusStart,
        ("pause", []) => ShellCommand::FocusPause,
        ("reset", []) => ShellCommand::FocusReset,
        ("mode", [mode]) => {
            ShellCommand::Mode(FocusMode::from_str(mode).map_err(|e| e.to_string())?)
        }
        ("cycle", [focus, short, long, cycles]) => ShellCommand::Cycle(CycleConfig {
            focus_minutes: ranged("focus", focus, FOCUS_MINUTES_RANGE)?,
            short_break_minutes: ranged("short break", short, SHORT_BREAK_MINUTES_RANGE)?,
            long_break_minutes: ranged("long break", long, LONG_BREAK_MINUTES_RANGE)?,
            cycles_before_long: ranged("cycles", cycles, CYCLES_BEFORE_LONG_RANGE)?,
        }),
        ("timer", ["start"]) => ShellCommand::TimerStart,
        ("timer", ["pause"]) => ShellCommand::TimerPause,
        ("timer", ["reset"]) => ShellCommand::TimerReset,
        ("timer", ["set", secs]) => ShellCommand::TimerSet(seconds(secs)?),
        ("timer", [secs]) => ShellCommand::TimerRun(seconds(secs)?),
        ("sw" | "stopwatch", ["start"]) => ShellCommand::StopwatchStart,
        ("sw" | "stopwatch", ["pause"]) => ShellCommand::StopwatchPause,
        ("sw" | "stopwatch", ["lap"]) => ShellCommand::StopwatchLap,
        ("sw" | "stopwatch", ["reset"]) => ShellCommand::StopwatchReset,
        ("add", [_, ..]) => ShellCommand::Add(rest.to_string()),
        ("done" | "toggle", [id]) => ShellCommand::Toggle((*id).to_string()),
        ("tasks", []) => ShellCommand::Tasks,
        ("stats", []) => ShellCommand::Stats,
        ("plan", []) => ShellCommand::Plan,
        ("say", [_, ..]) => ShellCommand::Say(rest.to_string()),
        ("chat", []) => ShellCommand::Chat,
        _ => return Err(format!("unrecognized command: {line} (try 'help')")),
    };
    Ok(Some(cmd))
}

fn ranged(field: &'static str, raw: &str, (min, max): (u32, u32)) -> Result<u32, String> {
    let value: i64 = raw
        .parse()
        .map_err(|_| format!("{field}: expected a number, got '{raw}'"))?;
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ValidationError::OutOfRange {
            field,
            min: i64::from(min),
            max: i64::from(max),
            value,
        }
        .to_string());
    }
    Ok(value as u32)
}

fn seconds(raw: &str) -> Result<f64, String> {
    raw.parse()
        .map_err(|_| format!("expected seconds, got '{raw}'"))
}

/// Apply a command to the session. Returns the lines to print and a coach
/// reply to schedule, if any.
pub fn execute(session: &mut Session, cmd: ShellCommand) -> (Vec<String>, Option<PendingReply>) {
    let mut out = Vec::new();
    let line = |event: Option<Event>| event.as_ref().map(describe);

    match cmd {
        ShellCommand::Help => return (HELP.lines().map(str::to_string).collect(), None),
        ShellCommand::Quit => {}
        ShellCommand::Status => return (vec![status_line(session)], None),
        ShellCommand::FocusStart => out.extend(line(session.focus_mut().start())),
        ShellCommand::FocusPause => out.extend(line(session.focus_mut().pause())),
        ShellCommand::FocusReset => out.extend(line(session.focus_mut().reset())),
        ShellCommand::Mode(mode) => out.extend(line(session.focus_mut().set_mode(mode))),
        ShellCommand::Cycle(config) => {
            let deferred = session.focus().is_running();
            session.set_cycle_config(config);
            out.push(if deferred {
                "Cycle updated; applies when the current period ends".to_string()
            } else {
                format!(
                    "Cycle updated ({})",
                    format_mmss(session.focus().seconds_remaining())
                )
            });
        }
        ShellCommand::TimerRun(secs) => {
            out.extend(line(session.countdown_mut().start_with(sanitize_seconds(secs))))
        }
        ShellCommand::TimerSet(secs) => {
            out.extend(line(session.countdown_mut().set_duration(sanitize_seconds(secs))))
        }
        ShellCommand::TimerStart => out.extend(line(session.countdown_mut().start())),
        ShellCommand::TimerPause => out.extend(line(session.countdown_mut().pause())),
        ShellCommand::TimerReset => out.extend(line(session.countdown_mut().reset())),
        ShellCommand::StopwatchStart => out.extend(line(session.stopwatch_mut().start())),
        ShellCommand::StopwatchPause => out.extend(line(session.stopwatch_mut().pause())),
        ShellCommand::StopwatchLap => out.extend(line(session.stopwatch_mut().lap())),
        ShellCommand::StopwatchReset => out.extend(line(session.stopwatch_mut().reset())),
        ShellCommand::Add(raw) => match parse_task(&raw) {
            Ok(task) if task.completed => {
                out.push("new tasks start open; use 'done <id>' after adding".to_string())
            }
            Ok(task) => out.extend(line(session.add_task(
                &task.title,
                task.minutes,
                task.priority,
                task.due,
            ))),
            Err(e) => out.push(e.to_string()),
        },
        ShellCommand::Toggle(prefix) => {
            let id = session.tasks().find_by_prefix(&prefix).map(|t| t.id.clone());
            match id {
                Some(id) => out.extend(line(session.toggle_task(&id))),
                None => out.push(format!("no unique task matches '{prefix}'")),
            }
        }
        ShellCommand::Tasks => {
            let tasks = session.prioritized_tasks();
            if tasks.is_empty() {
                out.push("No tasks yet".to_string());
            }
            for task in tasks {
                out.push(format!("{}  {task}", short_id(&task.id)));
            }
        }
        ShellCommand::Stats => {
            out.extend(stats::render(&session.report()).lines().map(str::to_string));
        }
        ShellCommand::Plan => out.extend(session.day_plan().lines()),
        ShellCommand::Say(text) => return (out, session.send_message(&text)),
        ShellCommand::Chat => {
            for msg in session.coach().transcript() {
                let who = match msg.from {
                    Speaker::You => "you",
                    Speaker::Bot => "coach",
                };
                out.push(format!("{who}> {}", msg.text));
            }
        }
    }
    (out, None)
}

fn status_line(session: &Session) -> String {
    let focus = session.focus();
    let running = |on: bool| if on { "running" } else { "paused" };
    format!(
        "{} {} ({}) · blocks {} · timer {} ({}) · stopwatch {} ({})",
        focus.mode(),
        format_mmss(focus.seconds_remaining()),
        running(focus.is_running()),
        focus.completed_focus_blocks(),
        format_mmss(session.countdown().seconds_remaining()),
        running(session.countdown().is_running()),
        format_stopwatch(session.stopwatch().elapsed_ms()),
        running(session.stopwatch().is_running()),
    )
}

pub async fn run(config: &Config) -> CliResult {
    let mut session = Session::new(config);
    let clock = SystemClock;
    let mut seconds = ticker(SECOND_TICK_MS);
    let mut stopwatch = ticker(config.ticks.stopwatch_ms);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut replies: VecDeque<(Instant, PendingReply)> = VecDeque::new();

    println!("zentryx shell, type 'help' for commands");

    loop {
        let next_reply = replies.front().map(|(at, _)| *at);
        tokio::select! {
            _ = seconds.tick() => {
                for event in session.tick_second(&clock) {
                    println!("{}", describe(&event));
                }
            }
            _ = stopwatch.tick() => session.tick_stopwatch(),
            _ = sleep_until(next_reply.unwrap_or_else(Instant::now)), if next_reply.is_some() => {
                if let Some((_, reply)) = replies.pop_front() {
                    println!("coach> {}", session.coach_mut().deliver(reply).text);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(Some(ShellCommand::Quit)) => break,
                    Ok(Some(cmd)) => {
                        tracing::debug!(?cmd, "shell command");
                        let (output, reply) = execute(&mut session, cmd);
                        for line in output {
                            println!("{line}");
                        }
                        if let Some(reply) = reply {
                            replies.push_back((Instant::now() + reply.delay, reply));
                        }
                    }
                    Ok(None) => {}
                    Err(msg) => eprintln!("{msg}"),
                }
            }
        }
    }

    while let Some((at, reply)) = replies.pop_front() {
        sleep_until(at).await;
        println!("coach> {}", session.coach_mut().deliver(reply).text);
    }

    let report = session.report();
    println!(
        "{} focus blocks, {} min focused, {}/{} tasks done",
        report.completed_focus_blocks,
        report.total_focus_minutes,
        report.completed_tasks,
        report.total_tasks
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn run_line(session: &mut Session, line: &str) -> (Vec<String>, Option<PendingReply>) {
        let cmd = parse_line(line).unwrap().unwrap();
        execute(session, cmd)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("  ").unwrap(), None);
        assert_eq!(parse_line("START").unwrap(), Some(ShellCommand::FocusStart));
        assert_eq!(
            parse_line("mode long").unwrap(),
            Some(ShellCommand::Mode(FocusMode::LongBreak))
        );
        assert_eq!(
            parse_line("timer set 90.5").unwrap(),
            Some(ShellCommand::TimerSet(90.5))
        );
        assert_eq!(
            parse_line("say I feel   tired").unwrap(),
            Some(ShellCommand::Say("I feel   tired".to_string()))
        );
        assert_eq!(
            parse_line("add Write essay,minutes=50").unwrap(),
            Some(ShellCommand::Add("Write essay,minutes=50".to_string()))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("mode nap").is_err());
        assert!(parse_line("cycle 3 5 15 4").is_err());
        assert!(parse_line("timer soon").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn cycle_command_sets_durations() {
        let mut session = Session::default();
        let (out, _) = run_line(&mut session, "cycle 50 10 30 2");
        assert_eq!(out, vec!["Cycle updated (50:00)"]);
        assert_eq!(session.focus().config().cycles_before_long, 2);
    }

    #[test]
    fn add_then_toggle_by_prefix() {
        let mut session = Session::default();
        let (out, _) = run_line(&mut session, "add Read paper,priority=1");
        assert!(out[0].starts_with("Task added: Read paper"));
        let id = session.tasks().as_slice()[0].id.clone();

        let (out, _) = run_line(&mut session, &format!("done {}", &id[..8]));
        assert!(out[0].ends_with("marked done"));
        assert_eq!(session.report().completed_tasks, 1);

        let (out, _) = run_line(&mut session, "done zzzz");
        assert_eq!(out, vec!["no unique task matches 'zzzz'"]);
    }

    #[test]
    fn add_refuses_tasks_marked_done() {
        let mut session = Session::default();
        let (out, _) = run_line(&mut session, "add Filed,done");
        assert_eq!(
            out,
            vec!["new tasks start open; use 'done <id>' after adding"]
        );
        assert!(session.tasks().as_slice().is_empty());
    }

    #[test]
    fn say_schedules_reply_without_printing() {
        let mut session = Session::default();
        let (out, reply) = run_line(&mut session, "say big exam on friday");
        assert!(out.is_empty());
        let reply = reply.unwrap();
        assert_eq!(reply.delay, Duration::from_millis(300));
        assert!(reply.text.starts_with("For exams"));
    }

    #[test]
    fn zero_second_timer_finishes_immediately() {
        let mut session = Session::default();
        let (out, _) = run_line(&mut session, "timer -3");
        assert_eq!(out, vec!["Timer finished"]);
        assert!(!session.countdown().is_running());
    }

    #[test]
    fn stopwatch_lap_requires_elapsed_time() {
        let mut session = Session::default();
        let (out, _) = run_line(&mut session, "sw lap");
        assert!(out.is_empty());
        run_line(&mut session, "sw start");
        session.tick_stopwatch();
        let (out, _) = run_line(&mut session, "sw lap");
        assert_eq!(out, vec!["Lap 1: 00:00.1"]);
    }
}
