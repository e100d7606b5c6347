//! Sandbox entry point: load a scenario and run the aim runtime against it.
mod config;
mod driver;
mod scenario;

use anyhow::{Context, Result};

use config::SandboxConfig;
use driver::Sandbox;
use scenario::Scenario;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SandboxConfig::from_env().context("failed to read sandbox configuration")?;
    let scenario = match &config.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };

    tracing::info!(
        ticks = config.ticks,
        strategy = %config.strategy,
        method = %config.method,
        tick_rate_hz = config.runtime.tick_rate_hz,
        "starting sandbox"
    );

    let summary = Sandbox::new(&config, scenario)?.run(config.ticks).await;

    tracing::info!(
        ticks = summary.ticks,
        idle = summary.idle,
        progress = summary.progress,
        successes = summary.successes,
        failures = summary.failures,
        strikes = summary.strikes,
        "sandbox finished"
    );
    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG`.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
