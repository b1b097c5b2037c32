//! Metrics snapshot as served by the cache API.
//!
//! The API is not versioned and its counters come straight out of Redis, so
//! every field is read leniently: absent, null, or non-numeric values all
//! become `0.0`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::card::CachePath;
use crate::{CachedashError, Result};

/// Key under which the API nests its counters.
const ENVELOPE_KEY: &str = "metrics";

/// One point-in-time read of the aggregate cache counters.
///
/// All values are finite once built through [`MetricsSnapshot::from_body`]
/// or [`MetricsSnapshot::from_counters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub l1_calls_total: f64,
    pub l2_calls_total: f64,
    pub llm_calls_total: f64,
    pub l1_latency_ms_sum: f64,
    pub l2_latency_ms_sum: f64,
    pub llm_latency_ms_sum: f64,
}

impl MetricsSnapshot {
    /// Build a snapshot from a decoded response body.
    ///
    /// Accepts both `{"metrics": {...}}` and the counters at top level. A
    /// `metrics` key holding `null` falls back to the top level. A `null`
    /// body is rejected.
    pub fn from_body(body: &Value) -> Result<Self> {
        if body.is_null() {
            return Err(CachedashError::Decode(
                "response body is null".to_string(),
            ));
        }
        let counters = match body.get(ENVELOPE_KEY) {
            Some(inner) if !inner.is_null() => inner,
            _ => body,
        };
        Ok(Self::from_counters(counters))
    }

    /// Read the six counters from a flat mapping, coercing each one.
    ///
    /// Non-object values yield an all-zero snapshot.
    pub fn from_counters(counters: &Value) -> Self {
        let field = |name: &str| counters.get(name).map(coerce_number).unwrap_or(0.0);
        Self {
            l1_calls_total: field("l1_calls_total"),
            l2_calls_total: field("l2_calls_total"),
            llm_calls_total: field("llm_calls_total"),
            l1_latency_ms_sum: field("l1_latency_ms_sum"),
            l2_latency_ms_sum: field("l2_latency_ms_sum"),
            llm_latency_ms_sum: field("llm_latency_ms_sum"),
        }
    }

    /// Call count recorded for a path.
    pub fn calls(&self, path: CachePath) -> f64 {
        match path {
            CachePath::L1 => self.l1_calls_total,
            CachePath::L2 => self.l2_calls_total,
            CachePath::Llm => self.llm_calls_total,
        }
    }

    /// Summed latency in milliseconds recorded for a path.
    pub fn latency_sum(&self, path: CachePath) -> f64 {
        match path {
            CachePath::L1 => self.l1_latency_ms_sum,
            CachePath::L2 => self.l2_latency_ms_sum,
            CachePath::Llm => self.llm_latency_ms_sum,
        }
    }

    /// Calls across all three paths.
    pub fn requests_total(&self) -> f64 {
        CachePath::ALL.iter().map(|p| self.calls(*p)).sum()
    }
}

impl<'de> Deserialize<'de> for MetricsSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let body = Value::deserialize(deserializer)?;
        Self::from_body(&body).map_err(serde::de::Error::custom)
    }
}

/// Coerce a JSON value to a finite number, `0.0` when that fails.
///
/// Mirrors how a browser would read the same payload: numeric strings are
/// parsed (including `0x`/`0o`/`0b` integers), booleans count as 1/0, and
/// anything else is zero.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_numeric_str(s),
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn parse_numeric_str(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // `f64::from_str` also takes "inf"/"nan"; those fail the finiteness check.
    s.parse::<f64>().unwrap_or(f64::NAN)
}
