use clap::Args;
use zentryx_core::{format_stopwatch, Config, StopwatchEngine};

use super::{emit, redraw, ticker, CliResult};

#[derive(Debug, Args)]
pub struct StopwatchArgs {
    /// Stop after this many seconds (runs until Ctrl-C otherwise)
    #[arg(long)]
    pub seconds: Option<u64>,
    /// Record a lap every N seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub lap_every: Option<u64>,
    /// Print events as JSON lines instead of a live readout
    #[arg(long)]
    pub json: bool,
}

/// Whether the engine is due for an automatic lap.
fn lap_due(engine: &StopwatchEngine, lap_every_ms: u64) -> bool {
    let elapsed = engine.elapsed_ms();
    elapsed > 0 && elapsed / lap_every_ms > engine.laps().len() as u64
}

pub async fn run(args: StopwatchArgs, config: &Config) -> CliResult {
    let mut engine = StopwatchEngine::with_resolution(config.ticks.stopwatch_ms);
    let limit_ms = args.seconds.map(|s| s.saturating_mul(1000));
    let lap_every_ms = args.lap_every.map(|s| s.saturating_mul(1000));

    let mut ticks = ticker(engine.resolution_ms());
    ticks.tick().await;
    if let Some(event) = engine.start() {
        emit(&event, args.json)?;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                engine.tick();
                if let Some(every) = lap_every_ms {
                    if lap_due(&engine, every) {
                        if !args.json {
                            println!();
                        }
                        if let Some(event) = engine.lap() {
                            emit(&event, args.json)?;
                        }
                    }
                }
                if !args.json {
                    redraw(&format_stopwatch(engine.elapsed_ms()))?;
                }
                if limit_ms.is_some_and(|limit| engine.elapsed_ms() >= limit) {
                    break;
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    if !args.json {
        println!();
    }
    if let Some(event) = engine.pause() {
        emit(&event, args.json)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_fall_due_once_per_interval() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        let mut laps = 0;
        for _ in 0..35 {
            engine.tick();
            if lap_due(&engine, 1000) {
                engine.lap();
                laps += 1;
            }
        }
        assert_eq!(laps, 3);
        assert_eq!(engine.laps(), &[1000, 2000, 3000]);
    }
}
