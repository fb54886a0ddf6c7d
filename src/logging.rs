//! Logging setup
//!
//! Logs go to stderr so stdout stays clean for command output and the exports
//! server. The level comes from the layered settings; `RUST_LOG`, when set,
//! takes precedence.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogLevel, Settings};
use crate::error::{BundlescopeError, Result};

/// Initialize the global tracing subscriber
pub fn init(settings: &Settings) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(settings.log_level)));

    let json_layer = settings
        .log_json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));

    let text_layer = (!settings.log_json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| BundlescopeError::LoggingInitFailed {
            message: e.to_string(),
        })?;

    tracing::debug!(
        level = %settings.log_level,
        json = settings.log_json,
        config = ?settings.source,
        "Logging initialized"
    );

    Ok(())
}

/// Filter directive for `level`
fn filter_directive(level: LogLevel) -> String {
    level.as_str().to_string()
}
