//! Tracing initialisation for the extension binary.
//!
//! `RUST_LOG` takes precedence over the default `info` level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogFormat;

/// Initialise the global subscriber. Only the first call takes effect.
pub fn init(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Plaintext => registry
            .with(fmt::layer().with_target(false).with_ansi(false))
            .try_init()
            .ok(),
        LogFormat::Console => registry
            .with(fmt::layer().with_target(false).with_ansi(true))
            .try_init()
            .ok(),
        LogFormat::Json => registry
            .with(fmt::layer().with_target(false).json())
            .try_init()
            .ok(),
    };
}
