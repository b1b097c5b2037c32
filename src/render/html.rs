//! Standalone HTML page.
//!
//! Same look as the browser dashboard: a centred heading over a
//! three-column grid of cards, each with a conic-gradient ring. No scripts;
//! the page is a static rendering of one state.

use std::fmt::Write;

use super::{HEADING, LOADING_TEXT};
use crate::present::derive_cards;
use crate::present::format::clamp_pct;
use crate::types::CardViewModel;
use crate::view::ViewState;

const RING_FILL: &str = "#0ea5e9";
const RING_TRACK: &str = "#e2e8f0";

const STYLE: &str = "\
body{margin:0;font-family:ui-sans-serif,system-ui;background:#f8fafc}
.page{max-width:1600px;margin:0 auto;padding:24px;box-sizing:border-box;min-height:100vh}
h1{margin:0;font-size:24px;text-align:center}
.body{margin-top:20px}
.loading{text-align:center;color:#475569}
.error{color:#b91c1c;margin:0}
.grid{display:grid;grid-template-columns:repeat(3,minmax(0,1fr));gap:24px;align-items:stretch;min-height:78vh}
.card{border:1px solid #e2e8f0;border-radius:16px;padding:28px;background:#fff;box-shadow:0 8px 24px rgba(15,23,42,.08);display:flex;flex-direction:column}
.title{text-align:center;font-size:20px;font-weight:900;letter-spacing:.5px;color:#0f172a}
.muted{font-size:13px;color:#64748b;text-align:center}
.rows{flex:1;display:grid;grid-template-rows:1fr 1fr;row-gap:18px;margin-top:18px}
.row{display:flex;flex-direction:column;justify-content:center}
.ring{width:180px;height:180px;border-radius:999px;display:grid;place-items:center;margin:14px auto 0}
.hole{width:140px;height:140px;border-radius:999px;background:#fff;display:grid;place-items:center;border:1px solid #e2e8f0;font-size:22px;font-weight:900;color:#0f172a}
.latency{margin-top:10px;text-align:center;font-size:34px;font-weight:950;color:#0f172a}
";

/// Render the whole page.
pub fn render(state: &ViewState) -> String {
    let body = match state {
        ViewState::Loading => format!("<div class=\"loading\">{LOADING_TEXT}</div>"),
        ViewState::Error(message) => format!("<pre class=\"error\">{}</pre>", escape(message)),
        ViewState::Loaded(snapshot) => {
            let cards: String = derive_cards(snapshot).iter().map(render_card).collect();
            format!("<div class=\"grid\">{cards}</div>")
        }
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{HEADING}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"page\"><h1>{HEADING}</h1><div class=\"body\">{body}</div></div>\n\
         </body>\n</html>\n"
    )
}

/// One card.
pub fn render_card(card: &CardViewModel) -> String {
    let pct = clamp_pct(card.pct);
    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"card\" data-key=\"{key}\">\
         <div class=\"title\">{title}</div>\
         <div class=\"muted\">{requests}</div>\
         <div class=\"rows\">\
         <div class=\"row\"><div class=\"muted\">Hit percent</div>\
         <div class=\"ring\" style=\"background:conic-gradient({RING_FILL} {pct}%, {RING_TRACK} 0)\" aria-label=\"{aria}\">\
         <div class=\"hole\">{pct_label}</div></div>\
         <div class=\"muted\">{caption}</div></div>\
         <div class=\"row\"><div class=\"muted\">Avg latency</div>\
         <div class=\"latency\">{latency}</div></div>\
         </div></div>",
        key = card.key,
        title = escape(card.title),
        requests = escape(&card.requests_label()),
        aria = escape(&card.ring_label()),
        pct_label = card.pct_label(),
        caption = card.ring_caption(),
        latency = card.latency_label(),
    );
    out
}

/// Minimal HTML escaping for text and attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetricsSnapshot;

    #[test]
    fn error_message_is_escaped() {
        let page = render(&ViewState::Error("<b>boom</b> & \"x\"".into()));
        assert!(page.contains("<pre class=\"error\">&lt;b&gt;boom&lt;/b&gt; &amp; &quot;x&quot;</pre>"));
    }

    #[test]
    fn loading_page_has_heading() {
        let page = render(&ViewState::Loading);
        assert!(page.contains("<h1>Semantic Cache Metrics</h1>"));
        assert!(page.contains("Loading…"));
    }

    #[test]
    fn ring_gradient_uses_clamped_pct() {
        let page = render(&ViewState::Loaded(MetricsSnapshot {
            l1_calls_total: 1.0,
            l2_calls_total: 3.0,
            ..Default::default()
        }));
        assert!(page.contains("conic-gradient(#0ea5e9 25%, #e2e8f0 0)"));
        assert!(page.contains("conic-gradient(#0ea5e9 75%, #e2e8f0 0)"));
        assert!(page.contains("conic-gradient(#0ea5e9 0%, #e2e8f0 0)"));
        assert!(page.contains("aria-label=\"L2 (Vector Embedding Match) hit percent 75.0%\""));
        assert_eq!(page.matches("class=\"card\"").count(), 3);
    }
}
