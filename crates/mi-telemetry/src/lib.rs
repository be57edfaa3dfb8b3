//! # Memory Index Telemetry
//!
//! Structured logging for the record store and query engine.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mi_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _guard = init_logging(&config).expect("Failed to init logging");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MI_SERVICE_NAME` | `memory-index` | Service name attached to log lines |
//! | `MI_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `MI_JSON_LOGS` | `false` (`true` in containers) | JSON formatted output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install global subscriber: {0}")]
    SubscriberInit(String),
}

/// Convenience macro for creating a span scoped to one component.
///
/// ```rust,ignore
/// let _span = component_span!("put", component = "record-store").entered();
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
