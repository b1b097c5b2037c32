//! Snapshot → card derivation.
//!
//! [`derive_cards`] is a pure function of the snapshot; callers recompute it
//! whenever they hold a new snapshot. The [`format`] helpers apply the
//! display rules (clamping, rounding, latency tiers) on top of the raw card
//! values.

pub mod format;

use crate::types::{CachePath, CardViewModel, MetricsSnapshot};

/// Derive the three summary cards, always in `l1`, `l2`, `llm` order.
///
/// ```rust
/// # use cachedash::{MetricsSnapshot, derive_cards};
/// let snapshot = MetricsSnapshot {
///     l1_calls_total: 80.0,
///     l2_calls_total: 20.0,
///     l1_latency_ms_sum: 800.0,
///     ..Default::default()
/// };
/// let [l1, l2, llm] = derive_cards(&snapshot);
/// assert_eq!(l1.pct, 80.0);
/// assert_eq!(l1.latency, 10.0);
/// assert_eq!(l2.latency, 0.0);
/// assert_eq!(llm.calls, 0.0);
/// ```
pub fn derive_cards(snapshot: &MetricsSnapshot) -> [CardViewModel; 3] {
    let requests_total = snapshot.requests_total();
    CachePath::ALL.map(|path| {
        let calls = snapshot.calls(path);
        CardViewModel {
            key: path,
            title: path.title(),
            calls,
            pct: share_pct(calls, requests_total),
            latency: mean(snapshot.latency_sum(path), calls),
        }
    })
}

fn share_pct(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}

fn mean(sum: f64, count: f64) -> f64 {
    if count > 0.0 { sum / count } else { 0.0 }
}

impl CardViewModel {
    /// Display percentage, clamped and rounded (`"80%"`).
    pub fn pct_label(&self) -> String {
        format::format_pct(self.pct)
    }

    /// Display latency (`"10.0 ms"`, `"142 ms"`).
    pub fn latency_label(&self) -> String {
        format::format_latency(self.latency)
    }

    /// Subtitle under the card title (`"80 requests"`).
    pub fn requests_label(&self) -> String {
        format!("{} requests", format::format_calls(self.calls))
    }

    /// Accessible description of the hit-ratio ring.
    pub fn ring_label(&self) -> String {
        format::ring_label(self.title, self.pct)
    }

    /// Caption under the hit-ratio ring.
    pub fn ring_caption(&self) -> &'static str {
        self.key.ring_caption()
    }
}
