//! Machine-readable rendering of the view state.

use serde::Serialize;

use crate::Result;
use crate::present::derive_cards;
use crate::present::format::ring_sweep_degrees;
use crate::types::{CachePath, CardViewModel};
use crate::view::ViewState;

#[derive(Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
enum Frame {
    Loading,
    Error { error: String },
    Loaded { cards: Vec<CardFrame> },
}

#[derive(Serialize)]
struct CardFrame {
    key: CachePath,
    title: &'static str,
    calls: f64,
    pct: f64,
    latency: f64,
    pct_label: String,
    latency_label: String,
    ring_degrees: f64,
}

impl From<&CardViewModel> for CardFrame {
    fn from(card: &CardViewModel) -> Self {
        Self {
            key: card.key,
            title: card.title,
            calls: card.calls,
            pct: card.pct,
            latency: card.latency,
            pct_label: card.pct_label(),
            latency_label: card.latency_label(),
            ring_degrees: ring_sweep_degrees(card.pct),
        }
    }
}

/// Render the state as pretty-printed JSON, newline-terminated.
pub fn render(state: &ViewState) -> Result<String> {
    let frame = match state {
        ViewState::Loading => Frame::Loading,
        ViewState::Error(message) => Frame::Error {
            error: message.clone(),
        },
        ViewState::Loaded(snapshot) => Frame::Loaded {
            cards: derive_cards(snapshot).iter().map(CardFrame::from).collect(),
        },
    };
    let mut out = serde_json::to_string_pretty(&frame)?;
    out.push('\n');
    Ok(out)
}
