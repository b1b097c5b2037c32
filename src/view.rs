//! Dashboard view: state cells and mount/teardown lifecycle.
//!
//! A view owns two state cells, the loaded snapshot and the load error,
//! held in a `watch` channel so renderers can follow changes. Mounting
//! spawns exactly one load; the resulting state machine is
//!
//! ```text
//! Loading ──► Loaded   (terminal)
//!    └──────► Error    (terminal)
//! ```
//!
//! There is no way back to `Loading` short of mounting a new view.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::loader::{CancellationToken, LoadOutcome, MetricsSource, load_into};
use crate::present::derive_cards;
use crate::types::{CardViewModel, MetricsSnapshot};

/// The view's two state cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCells {
    pub snapshot: Option<MetricsSnapshot>,
    pub error: Option<String>,
}

impl ViewCells {
    /// Current position in the view's state machine. An error wins over a
    /// snapshot.
    pub fn state(&self) -> ViewState {
        match (&self.error, &self.snapshot) {
            (Some(message), _) => ViewState::Error(message.clone()),
            (None, Some(snapshot)) => ViewState::Loaded(*snapshot),
            (None, None) => ViewState::Loading,
        }
    }
}

/// What the view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    Loaded(MetricsSnapshot),
}

impl ViewState {
    /// Whether the load has settled (either way).
    pub fn is_settled(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }

    /// Cards for a loaded snapshot.
    pub fn cards(&self) -> Option<[CardViewModel; 3]> {
        match self {
            ViewState::Loaded(snapshot) => Some(derive_cards(snapshot)),
            _ => None,
        }
    }
}

/// A mounted dashboard.
///
/// Dropping the view tears it down.
pub struct DashboardView {
    cells: Arc<watch::Sender<ViewCells>>,
    token: CancellationToken,
    task: Option<JoinHandle<LoadOutcome>>,
}

impl DashboardView {
    /// Mount a view and start its single load on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn mount(source: Arc<dyn MetricsSource>) -> Self {
        let (tx, _) = watch::channel(ViewCells::default());
        let cells = Arc::new(tx);
        let token = CancellationToken::new();

        debug!(source = source.name(), "mounting dashboard view");
        let task = tokio::spawn({
            let cells = Arc::clone(&cells);
            let token = token.clone();
            async move { load_into(source.as_ref(), &cells, &token).await }
        });

        Self {
            cells,
            token,
            task: Some(task),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.cells.borrow().state()
    }

    /// Cards, once loaded.
    pub fn cards(&self) -> Option<[CardViewModel; 3]> {
        self.state().cards()
    }

    /// Follow changes to the state cells.
    pub fn subscribe(&self) -> watch::Receiver<ViewCells> {
        self.cells.subscribe()
    }

    /// Wait until the load settles and return the settled state.
    ///
    /// Never resolves if the view is torn down before the load settles;
    /// race it against whatever triggers the teardown.
    pub async fn settled(&self) -> ViewState {
        let mut rx = self.cells.subscribe();
        match rx.wait_for(|cells| cells.state().is_settled()).await {
            Ok(cells) => cells.state(),
            // the sender lives as long as `self`
            Err(_) => self.state(),
        }
    }

    /// Tear the view down. Any outcome of the in-flight load is discarded.
    ///
    /// The in-flight request itself keeps running to completion. Idempotent.
    pub fn teardown(&self) {
        if self.token.is_cancelled() {
            return;
        }
        // cancel under the state lock so a concurrent settle lands either
        // entirely before this point or not at all
        self.cells.send_if_modified(|_| {
            self.token.cancel();
            false
        });
        debug!("dashboard view torn down");
    }

    /// Whether [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the load task to finish and return its outcome.
    ///
    /// Returns `None` if already joined or if the task panicked.
    pub async fn join(&mut self) -> Option<LoadOutcome> {
        let task = self.task.take()?;
        task.await.ok()
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for DashboardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardView")
            .field("state", &self.state())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}
