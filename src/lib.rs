//! Cachedash - dashboard for a semantic LLM response cache
//!
//! Fetches one metrics snapshot from the cache API (`GET /api/metrics`) and
//! presents three summary cards: exact-match (L1) hits, vector-embedding
//! (L2) hits, and calls that fell through to the LLM. Each card shows its
//! share of all requests and its average latency.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cachedash::{DashboardView, HttpMetricsSource, ViewState};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let view = DashboardView::mount(Arc::new(HttpMetricsSource::new("http://127.0.0.1:3000")));
//!
//!     match view.settled().await {
//!         ViewState::Loaded(snapshot) => {
//!             for card in cachedash::derive_cards(&snapshot) {
//!                 println!("{}: {} / {}", card.title, card.pct_label(), card.latency_label());
//!             }
//!         }
//!         ViewState::Error(message) => eprintln!("{message}"),
//!         ViewState::Loading => unreachable!("settled"),
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod present;
pub mod render;
pub mod telemetry;
pub mod types;
pub mod view;

// Re-export main types at crate root
pub use config::Config;
pub use error::{CachedashError, Result};
pub use loader::{CancellationToken, HttpMetricsSource, LoadOutcome, MetricsSource, load_into};
pub use present::derive_cards;
pub use render::OutputFormat;
pub use types::{CachePath, CardViewModel, MetricsSnapshot};
pub use view::{DashboardView, ViewCells, ViewState};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
