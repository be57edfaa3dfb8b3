//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber. Log lines carry:
//! - `timestamp`, `level`, `target`
//! - `service`: the configured service name (root span field)
//! - event fields such as `address`, `authority`, `tag_count`

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Keeps the root service span entered for as long as it is held.
pub struct LoggingGuard {
    _span: tracing::span::EnteredSpan,
}

/// Build the level filter for `config`.
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::InvalidFilter {
        filter: config.log_level.clone(),
        reason: e.to_string(),
    })
}

/// Initialize structured logging.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    let env_filter = build_filter(config)?;

    let result = if config.json_logs {
        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };
    result.map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    let span = tracing::info_span!("service", service = %config.service_name).entered();
    tracing::debug!(
        json_logs = config.json_logs,
        level = %config.log_level,
        "Structured logging initialized"
    );

    Ok(LoggingGuard { _span: span })
}

/// Log an event scoped to one record address.
#[macro_export]
macro_rules! log_record_event {
    ($level:ident, $component:expr, $msg:expr, $address:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            address = %$address,
            $($($field)*,)?
            $msg
        )
    };
}
