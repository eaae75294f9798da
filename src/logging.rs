use anyhow::Result;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LogFormat};

/// Initialize the tracing subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &Config) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => Registry::default()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Pretty => Registry::default()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .try_init()?,
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "rigboard starting");
    Ok(())
}

/// Log the effective configuration
pub fn log_config(config: &Config) {
    tracing::info!(
        http_bind = %config.http_bind,
        database = %config.database_path.display(),
        default_language = %config.default_language,
        indent_strategy = %config.indent_strategy,
        session_ttl_secs = config.session_ttl_secs,
        "configuration loaded"
    );
}
