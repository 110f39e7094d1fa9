use clap::Args;
use zentryx_core::timer::{sanitize_seconds, COUNTDOWN_PRESETS_SECS, SECOND_TICK_MS};
use zentryx_core::{format_mmss, CountdownEngine};

use super::{emit, redraw, ticker, CliResult};

#[derive(Debug, Args)]
pub struct TimerArgs {
    /// Duration in seconds. Fractions are truncated; negative values finish at once
    #[arg(allow_negative_numbers = true, required_unless_present = "preset")]
    pub seconds: Option<f64>,
    /// Use a preset length in minutes instead
    #[arg(long, conflicts_with = "seconds", value_parser = parse_preset)]
    pub preset: Option<u64>,
    /// Print events as JSON lines instead of a live readout
    #[arg(long)]
    pub json: bool,
}

impl TimerArgs {
    pub fn duration_secs(&self) -> u64 {
        match (self.preset, self.seconds) {
            (Some(secs), _) => secs,
            (None, Some(raw)) => sanitize_seconds(raw),
            (None, None) => 0,
        }
    }
}

/// Preset in minutes, returned in seconds.
fn parse_preset(raw: &str) -> Result<u64, String> {
    let minutes: u64 = raw.parse().map_err(|e| format!("{e}"))?;
    let secs = minutes.saturating_mul(60);
    if COUNTDOWN_PRESETS_SECS.contains(&secs) {
        Ok(secs)
    } else {
        let allowed: Vec<String> = COUNTDOWN_PRESETS_SECS
            .iter()
            .map(|s| (s / 60).to_string())
            .collect();
        Err(format!("preset must be one of {}", allowed.join(", ")))
    }
}

pub async fn run(args: TimerArgs) -> CliResult {
    let mut engine = CountdownEngine::new();
    let mut seconds = ticker(SECOND_TICK_MS);
    seconds.tick().await;
    if let Some(event) = engine.start_with(args.duration_secs()) {
        emit(&event, args.json)?;
    }
    if !engine.is_running() {
        return Ok(());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = seconds.tick() => {
                if let Some(event) = engine.tick() {
                    if !args.json {
                        println!();
                    }
                    emit(&event, args.json)?;
                    break;
                }
                if !args.json {
                    redraw(&format_mmss(engine.seconds_remaining()))?;
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
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: TimerArgs,
    }

    #[test]
    fn fractional_and_negative_seconds() {
        let h = Harness::parse_from(["timer", "90.7"]);
        assert_eq!(h.args.duration_secs(), 90);
        let h = Harness::parse_from(["timer", "-5"]);
        assert_eq!(h.args.duration_secs(), 0);
    }

    #[test]
    fn preset_minutes() {
        let h = Harness::parse_from(["timer", "--preset", "10"]);
        assert_eq!(h.args.duration_secs(), 600);
        assert!(Harness::try_parse_from(["timer", "--preset", "7"]).is_err());
        assert!(Harness::try_parse_from(["timer"]).is_err());
    }
}
