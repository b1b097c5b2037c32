//! Plain-text terminal frame.

use std::fmt::Write;

use super::{HEADING, LOADING_TEXT};
use crate::present::derive_cards;
use crate::present::format::ring_filled_cells;
use crate::types::CardViewModel;
use crate::view::ViewState;

/// Default number of cells in the text gauge.
pub const DEFAULT_RING_WIDTH: usize = 20;

/// Text rendering options.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Cells in the hit-ratio gauge.
    pub ring_width: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            ring_width: DEFAULT_RING_WIDTH,
        }
    }
}

/// Render the whole frame.
pub fn render(state: &ViewState, options: &TextOptions) -> String {
    let mut out = String::new();
    out.push_str(HEADING);
    out.push_str("\n\n");

    match state {
        ViewState::Loading => {
            out.push_str(LOADING_TEXT);
            out.push('\n');
        }
        ViewState::Error(message) => {
            out.push_str(message);
            out.push('\n');
        }
        ViewState::Loaded(snapshot) => {
            let cards = derive_cards(snapshot);
            let sections: Vec<String> = cards.iter().map(|c| render_card(c, options)).collect();
            out.push_str(&sections.join("\n"));
        }
    }
    out
}

/// One card block.
pub fn render_card(card: &CardViewModel, options: &TextOptions) -> String {
    let mut out = String::new();
    // writes into a String cannot fail
    let _ = writeln!(out, "{}", card.title);
    let _ = writeln!(out, "  {}", card.requests_label());
    let _ = writeln!(
        out,
        "  Hit percent  {}  {:>4}  {}",
        gauge(card.pct, options.ring_width),
        card.pct_label(),
        card.ring_caption()
    );
    let _ = writeln!(out, "  Avg latency  {}", card.latency_label());
    out
}

/// `[#####...............]` gauge standing in for the ring.
fn gauge(pct: f64, width: usize) -> String {
    let filled = ring_filled_cells(pct, width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}
