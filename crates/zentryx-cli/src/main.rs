use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use zentryx_core::Config;

mod commands;
mod logging;

use commands::CliResult;

#[derive(Parser)]
#[command(name = "zentryx", version, about = "Zentryx productivity dashboard CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/zentryx/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run focus and break periods in the foreground
    Focus(commands::focus::FocusArgs),
    /// Count down from a duration
    Timer(commands::timer::TimerArgs),
    /// Run the stopwatch
    Stopwatch(commands::stopwatch::StopwatchArgs),
    /// Propose a day plan from tasks and focus history
    Plan(commands::snapshot::SnapshotArgs),
    /// Productivity summary from tasks and focus history
    Stats(commands::snapshot::SnapshotArgs),
    /// Ask the coach
    Coach(commands::coach::CoachArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive dashboard session
    Shell,
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "zentryx", &mut std::io::stdout());
        return Ok(());
    }

    let path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    if let Commands::Config { action } = cli.command {
        return commands::config::run(action, &path);
    }

    let config = Config::load_from(&path)?;
    tracing::debug!(path = %path.display(), "config loaded");

    match cli.command {
        Commands::Focus(args) => commands::focus::run(args, &config).await,
        Commands::Timer(args) => commands::timer::run(args).await,
        Commands::Stopwatch(args) => commands::stopwatch::run(args, &config).await,
        Commands::Plan(args) => commands::plan::run(args, &config),
        Commands::Stats(args) => commands::stats::run(args, &config),
        Commands::Coach(args) => commands::coach::run(args, &config).await,
        Commands::Shell => commands::shell::run(&config).await,
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}
