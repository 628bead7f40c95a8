//! # Ante Telemetry
//!
//! Observability for the signature verification decorator.
//!
//! ## Components
//!
//! - **Logging**: `tracing` subscriber with an env filter and either JSON or
//!   human-readable output
//! - **Metrics**: Prometheus counters and a latency histogram, exposed in
//!   text format via [`gather_metrics`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ante_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // verification runs here; logs and metrics are collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ANTE_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `ANTE_JSON_LOGS` | `false` | Emit JSON lines |
//! | `ANTE_CONSOLE_OUTPUT` | `true` | Install the console subscriber |
//! | `ANTE_SERVICE_NAME` | `eip712-ante` | Service name in log records |
//! | `ANTE_NETWORK` | `testnet` | Network label |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    gather_metrics, record_failure, record_success, register_metrics, SIGNATURE_DURATION,
    SIGNATURE_FAILURES, SIGNATURE_VERIFICATIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Register metrics, then install the logging subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)?;

    tracing::info!(
        service = %config.service_name,
        network = %config.network,
        "Telemetry initialized"
    );
    Ok(())
}
