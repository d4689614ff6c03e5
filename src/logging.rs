//! Tracing subscriber initialisation for the binary

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr `fmt` subscriber
///
/// `RUST_LOG` takes precedence over `default_level` (from the settings file).
/// Output goes to stderr so converted values on stdout stay pipeable.
pub fn init_logging(default_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
