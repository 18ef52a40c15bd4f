//! Tracing subscriber setup.
//!
//! Logs go to stderr so that `--print-codes`, `--print-tree` and `--stats`
//! output on stdout stays clean. `RUST_LOG` takes precedence over the level
//! chosen on the command line.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};

/// Install the global subscriber for this process.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level))
        .context("failed to create log filter")?;

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Plain => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
    .context("failed to install log subscriber")
}
