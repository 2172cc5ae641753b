//! Tracing subscriber installation
//!
//! `RUST_LOG` takes precedence over the configured level. Request spans come
//! from `TracingLogger`; records emitted through the `log` facade by
//! dependencies are forwarded by the subscriber's log bridge.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use otp_shared::{LogFormat, LoggingConfig};

/// Install the global subscriber described by `config`
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| anyhow!("invalid log filter {:?}: {}", config.level, e))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
