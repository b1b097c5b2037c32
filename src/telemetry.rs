//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus,
//! statsd); without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `cachedash_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).

/// Total metrics loads settled by a view.
///
/// Labels: `status` ("ok" | "error" | "discarded").
pub const LOADS_TOTAL: &str = "cachedash_loads_total";

/// Time from issuing the metrics request to the outcome being known, in
/// seconds. Recorded for discarded loads too.
pub const LOAD_DURATION_SECONDS: &str = "cachedash_load_duration_seconds";
