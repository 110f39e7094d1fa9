use clap::Args;
use zentryx_core::timer::SECOND_TICK_MS;
use zentryx_core::{format_mmss, Config, CycleConfig, FocusCycleEngine, SystemClock};

use super::{emit, redraw, ticker, CliResult};

#[derive(Debug, Args)]
pub struct FocusArgs {
    /// Focus length in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=90))]
    pub focus_minutes: Option<u32>,
    /// Short break length in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=30))]
    pub short_break_minutes: Option<u32>,
    /// Long break length in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=60))]
    pub long_break_minutes: Option<u32>,
    /// Focus blocks before a long break
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub cycles: Option<u32>,
    /// Stop after this many completed focus blocks
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub blocks: u32,
    /// Print events as JSON lines instead of a live readout
    #[arg(long)]
    pub json: bool,
}

impl FocusArgs {
    /// Configured cycle with command-line overrides applied.
    pub fn cycle_config(&self, base: CycleConfig) -> CycleConfig {
        CycleConfig {
            focus_minutes: self.focus_minutes.unwrap_or(base.focus_minutes),
            short_break_minutes: self.short_break_minutes.unwrap_or(base.short_break_minutes),
            long_break_minutes: self.long_break_minutes.unwrap_or(base.long_break_minutes),
            cycles_before_long: self.cycles.unwrap_or(base.cycles_before_long),
        }
        .clamped()
    }
}

/// Run focus/break cycles in the foreground. Each finished period starts the
/// next one automatically until `--blocks` focus blocks are done or Ctrl-C.
pub async fn run(args: FocusArgs, config: &Config) -> CliResult {
    let mut engine = FocusCycleEngine::new(args.cycle_config(config.cycle()));
    let clock = SystemClock;
    let mut seconds = ticker(SECOND_TICK_MS);
    seconds.tick().await;

    if let Some(event) = engine.start() {
        emit(&event, args.json)?;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = seconds.tick() => {
                match engine.tick(&clock) {
                    Some(event) => {
                        if !args.json {
                            println!();
                        }
                        emit(&event, args.json)?;
                        if engine.completed_focus_blocks() >= args.blocks {
                            break;
                        }
                        if let Some(event) = engine.start() {
                            emit(&event, args.json)?;
                        }
                    }
                    None if !args.json => {
                        redraw(&format!(
                            "{}  {}",
                            engine.mode(),
                            format_mmss(engine.seconds_remaining())
                        ))?;
                    }
                    None => {}
                }
            }
            _ = &mut ctrl_c => {
                if !args.json {
                    println!();
                }
                if let Some(event) = engine.pause() {
                    emit(&event, args.json)?;
                }
                break;
            }
        }
    }

    if !args.json {
        println!(
            "{} focus blocks, {} min focused",
            engine.completed_focus_blocks(),
            engine.total_focus_minutes()
        );
    }
    Ok(())
}
