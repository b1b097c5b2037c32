//! Display-ready card records.

use serde::Serialize;

/// The three ways a query can be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePath {
    /// Exact match on a previously seen query.
    L1,
    /// Semantically similar query found through embedding search.
    L2,
    /// Cache miss answered by the generative model.
    Llm,
}

impl CachePath {
    /// All paths in display order.
    pub const ALL: [CachePath; 3] = [CachePath::L1, CachePath::L2, CachePath::Llm];

    /// Stable identity key.
    pub fn key(self) -> &'static str {
        match self {
            CachePath::L1 => "l1",
            CachePath::L2 => "l2",
            CachePath::Llm => "llm",
        }
    }

    /// Card heading.
    pub fn title(self) -> &'static str {
        match self {
            CachePath::L1 => "L1 (Exact Query Match)",
            CachePath::L2 => "L2 (Vector Embedding Match)",
            CachePath::Llm => "LLM",
        }
    }

    /// Caption under the hit-ratio ring.
    pub fn ring_caption(self) -> &'static str {
        match self {
            CachePath::L1 | CachePath::L2 => "Cache hits",
            CachePath::Llm => "LLM calls",
        }
    }
}

impl std::fmt::Display for CachePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One summary card, derived from a [`MetricsSnapshot`](super::MetricsSnapshot).
///
/// `pct` and `latency` are raw arithmetic results; clamping and rounding
/// happen only when formatting for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardViewModel {
    pub key: CachePath,
    pub title: &'static str,
    pub calls: f64,
    /// Share of all calls, in percent.
    pub pct: f64,
    /// Mean latency in milliseconds.
    pub latency: f64,
}
