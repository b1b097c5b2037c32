//! Data loader: one fetch per mount, settled into the view's state cells.
//!
//! A [`MetricsSource`] produces a [`MetricsSnapshot`]; [`load_into`] awaits it
//! once and applies the outcome to the owning view, unless the view's
//! [`CancellationToken`] has been cancelled in the meantime.
//!
//! # Settling rules
//!
//! - success stores the snapshot and clears any prior error
//! - failure (status, network, decode) stores the error's display string and
//!   leaves the snapshot untouched
//! - a cancelled token suppresses both; nothing is written
//!
//! The token is checked while holding the state channel's write lock, so a
//! teardown that cancels under the same lock can never interleave with a
//! write. There are no retries and no timeout.

mod cancel;
pub mod http;

pub use cancel::CancellationToken;
pub use http::HttpMetricsSource;

use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::Result;
use crate::telemetry;
use crate::types::MetricsSnapshot;
use crate::view::ViewCells;

/// Anything that can produce a metrics snapshot.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Source name for logging/debugging.
    fn name(&self) -> &str;

    /// Fetch and decode one snapshot.
    async fn fetch(&self) -> Result<MetricsSnapshot>;
}

/// How a single load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Snapshot stored.
    Loaded,
    /// Error message stored.
    Failed,
    /// The view was torn down first; nothing stored.
    Discarded,
}

impl LoadOutcome {
    fn status_label(self) -> &'static str {
        match self {
            LoadOutcome::Loaded => "ok",
            LoadOutcome::Failed => "error",
            LoadOutcome::Discarded => "discarded",
        }
    }
}

/// Run one load against `source` and settle it into `cells`.
pub async fn load_into(
    source: &dyn MetricsSource,
    cells: &watch::Sender<ViewCells>,
    token: &CancellationToken,
) -> LoadOutcome {
    let start = Instant::now();
    let result = source.fetch().await;

    let outcome = match result {
        Ok(snapshot) => {
            let applied = apply_unless_cancelled(cells, token, |c| {
                c.snapshot = Some(snapshot);
                c.error = None;
            });
            if applied {
                info!(source = source.name(), "metrics snapshot loaded");
                LoadOutcome::Loaded
            } else {
                LoadOutcome::Discarded
            }
        }
        Err(err) => {
            let message = err.to_string();
            let applied = apply_unless_cancelled(cells, token, |c| c.error = Some(message));
            if applied {
                warn!(source = source.name(), error = %err, "metrics load failed");
                LoadOutcome::Failed
            } else {
                LoadOutcome::Discarded
            }
        }
    };

    if outcome == LoadOutcome::Discarded {
        debug!(source = source.name(), "view torn down before load settled; outcome discarded");
    }
    record_load(outcome, start);
    outcome
}

/// Apply `mutate` under the channel lock if the token is still live.
fn apply_unless_cancelled(
    cells: &watch::Sender<ViewCells>,
    token: &CancellationToken,
    mutate: impl FnOnce(&mut ViewCells),
) -> bool {
    cells.send_if_modified(|state| {
        if token.is_cancelled() {
            return false;
        }
        mutate(state);
        true
    })
}

fn record_load(outcome: LoadOutcome, start: Instant) {
    metrics::counter!(telemetry::LOADS_TOTAL, "status" => outcome.status_label()).increment(1);
    metrics::histogram!(telemetry::LOAD_DURATION_SECONDS).record(start.elapsed().as_secs_f64());
}
