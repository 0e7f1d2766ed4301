use tracing_subscriber::EnvFilter;

use super::config::SystemConfig;

/// Installs the global subscriber. Call once, before the system starts.
pub fn setup_tracing(config: &SystemConfig) {
    let env_filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
