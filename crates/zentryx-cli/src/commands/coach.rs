use clap::Args;
use zentryx_core::{Coach, Config};

use super::CliResult;

#[derive(Debug, Args)]
pub struct CoachArgs {
    /// Message for the coach
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
    /// Reply immediately instead of after the configured delay
    #[arg(long)]
    pub no_delay: bool,
}

pub async fn run(args: CoachArgs, config: &Config) -> CliResult {
    let mut coach = Coach::new(std::time::Duration::from_millis(config.coach.reply_delay_ms));
    let Some(pending) = coach.send(&args.message.join(" ")) else {
        return Ok(());
    };
    if !args.no_delay {
        tokio::time::sleep(pending.delay).await;
    }
    println!("{}", coach.deliver(pending).text);
    Ok(())
}
