//! Prometheus metrics for signature verification.
//!
//! All metrics follow the naming convention: `ante_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Metrics registry of this crate
    pub static ref REGISTRY: Registry = Registry::new();

    /// Transactions checked, by outcome
    pub static ref SIGNATURE_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("ante_signature_verifications_total", "Transactions checked by the signature decorator"),
        &["result"]  // result: valid/invalid/skipped
    ).expect("metric creation failed");

    /// Rejections by reason (for alerting)
    pub static ref SIGNATURE_FAILURES: CounterVec = CounterVec::new(
        Opts::new("ante_signature_failures_total", "Rejected transactions by reason"),
        &["reason"]
    ).expect("metric creation failed");

    /// Time spent checking one transaction
    pub static ref SIGNATURE_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ante_signature_verification_duration_seconds",
            "Time spent verifying the signatures of one transaction"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Register all metrics with the crate registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SIGNATURE_VERIFICATIONS.clone()),
        Box::new(SIGNATURE_FAILURES.clone()),
        Box::new(SIGNATURE_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count an accepted transaction.
pub fn record_success(duration_secs: f64) {
    SIGNATURE_VERIFICATIONS.with_label_values(&["valid"]).inc();
    SIGNATURE_DURATION.observe(duration_secs);
}

/// Count a rejected transaction under its reason label.
pub fn record_failure(reason: &str, duration_secs: f64) {
    SIGNATURE_VERIFICATIONS.with_label_values(&["invalid"]).inc();
    SIGNATURE_FAILURES.with_label_values(&[reason]).inc();
    SIGNATURE_DURATION.observe(duration_secs);
}
