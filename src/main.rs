use anyhow::{Context, Result};
use simconnect_probe::config::Config;

fn main() -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .compact()
        .with_ansi(true)
        .init();

    connect(&config)
}

#[cfg(all(windows, feature = "simconnect"))]
fn connect(config: &Config) -> Result<()> {
    use simconnect_probe::simconnect::SimConnectHost;

    let host = SimConnectHost::open(&config.client_name, config.config_index)
        .with_context(|| format!("could not connect as {:?}", config.client_name))?;
    tracing::info!(client = %config.client_name, "Connected");

    simconnect_probe::run_probe(host, config);
    Ok(())
}

#[cfg(not(all(windows, feature = "simconnect")))]
fn connect(config: &Config) -> Result<()> {
    Err(simconnect_probe::error::HostError::Unavailable)
        .with_context(|| format!("could not connect as {:?}", config.client_name))
}
