//! Metrics recorded through the `metrics` facade.
//!
//! # Metrics
//! - `auth_schemes_registered` (gauge): current registry size
//! - `auth_default_scheme_resolutions_total` (counter): by `operation` and
//!   `outcome` (`resolved` / `none`)
//!
//! Without an installed recorder these are no-ops.

pub fn record_scheme_count(count: usize) {
    metrics::gauge!("auth_schemes_registered").set(count as f64);
}

pub fn record_default_resolution(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "auth_default_scheme_resolutions_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
