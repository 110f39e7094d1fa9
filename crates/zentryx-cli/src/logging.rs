use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `ZENTRYX_LOG=debug`.
pub const LOG_ENV: &str = "ZENTRYX_LOG";

/// Install the stderr subscriber. Defaults to `warn` so engine chatter stays
/// out of the way of the countdown display.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
