//! Integration tests for [`DashboardView`]: mount, settle, and teardown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cachedash::{
    CachedashError, DashboardView, HttpMetricsSource, LoadOutcome, MetricsSnapshot,
    MetricsSource, Result, ViewCells, ViewState,
};

// ============================================================================
// Mock sources
// ============================================================================

/// Holds its result back until the gate is opened.
struct GatedSource {
    gate: Arc<Notify>,
    result: fn() -> Result<MetricsSnapshot>,
}

#[async_trait]
impl MetricsSource for GatedSource {
    fn name(&self) -> &str {
        "gated"
    }

    async fn fetch(&self) -> Result<MetricsSnapshot> {
        self.gate.notified().await;
        (self.result)()
    }
}

/// Flags when the wrapped fetch has returned.
struct ReportingSource {
    inner: Arc<GatedSource>,
    fetched: Arc<AtomicBool>,
}

#[async_trait]
impl MetricsSource for ReportingSource {
    fn name(&self) -> &str {
        "reporting"
    }

    async fn fetch(&self) -> Result<MetricsSnapshot> {
        let result = self.inner.fetch().await;
        self.fetched.store(true, Ordering::SeqCst);
        result
    }
}

fn gated(result: fn() -> Result<MetricsSnapshot>) -> (Arc<Notify>, Arc<GatedSource>) {
    let gate = Arc::new(Notify::new());
    let source = Arc::new(GatedSource {
        gate: Arc::clone(&gate),
        result,
    });
    (gate, source)
}

async fn metrics_server(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metrics"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

// ============================================================================
// Settling
// ============================================================================

#[tokio::test]
async fn starts_in_loading() {
    let (gate, source) = gated(|| Ok(MetricsSnapshot::default()));
    let view = DashboardView::mount(source);

    assert_eq!(view.state(), ViewState::Loading);
    assert!(view.cards().is_none());
    gate.notify_one();
}

#[tokio::test]
async fn end_to_end_cards_from_enveloped_snapshot() {
    let server = metrics_server(ResponseTemplate::new(200).set_body_json(json!({
        "metrics": {
            "l1_calls_total": 80,
            "l2_calls_total": 20,
            "llm_calls_total": 0,
            "l1_latency_ms_sum": 800,
            "l2_latency_ms_sum": 400,
            "llm_latency_ms_sum": 0
        }
    })))
    .await;

    let view = DashboardView::mount(Arc::new(HttpMetricsSource::new(server.uri())));
    let state = view.settled().await;
    assert!(matches!(state, ViewState::Loaded(_)));

    let [l1, l2, llm] = view.cards().unwrap();

    assert_eq!(l1.key.key(), "l1");
    assert_eq!(l1.calls, 80.0);
    assert_eq!(l1.pct_label(), "80%");
    assert_eq!(l1.latency_label(), "10.0 ms");

    assert_eq!(l2.key.key(), "l2");
    assert_eq!(l2.calls, 20.0);
    assert_eq!(l2.pct_label(), "20%");
    assert_eq!(l2.latency_label(), "20.0 ms");

    assert_eq!(llm.key.key(), "llm");
    assert_eq!(llm.calls, 0.0);
    assert_eq!(llm.pct_label(), "0%");
    assert_eq!(llm.latency_label(), "0.0 ms");
}

#[tokio::test]
async fn server_error_settles_in_error_without_snapshot() {
    let server = metrics_server(ResponseTemplate::new(500)).await;

    let view = DashboardView::mount(Arc::new(HttpMetricsSource::new(server.uri())));
    let state = view.settled().await;

    match state {
        ViewState::Error(message) => assert!(message.contains("500"), "got {message}"),
        other => panic!("expected error state, got {other:?}"),
    }
    let cells = view.subscribe().borrow().clone();
    assert!(cells.snapshot.is_none());
    assert!(view.cards().is_none());
}

#[tokio::test]
async fn settled_state_is_terminal() {
    let (gate, source) = gated(|| Err(CachedashError::Decode("bad".into())));
    let mut view = DashboardView::mount(source);
    gate.notify_one();

    assert_eq!(view.join().await, Some(LoadOutcome::Failed));
    let settled = view.settled().await;
    assert_eq!(settled, ViewState::Error("decode error: bad".into()));

    // nothing else runs; the state does not move again
    tokio::task::yield_now().await;
    assert_eq!(view.state(), settled);
    assert_eq!(view.join().await, None);
}

#[tokio::test]
async fn subscribers_see_exactly_one_change() {
    let (gate, source) = gated(|| Ok(MetricsSnapshot::default()));
    let mut view = DashboardView::mount(source);
    let mut rx = view.subscribe();

    gate.notify_one();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().snapshot.is_some());

    view.join().await;
    assert!(!rx.has_changed().unwrap());
}

// ============================================================================
// Teardown
// ============================================================================

#[tokio::test]
async fn teardown_before_success_discards_snapshot() {
    let (gate, source) = gated(|| Ok(MetricsSnapshot::default()));
    let mut view = DashboardView::mount(source);
    let rx = view.subscribe();

    view.teardown();
    gate.notify_one();

    assert_eq!(view.join().await, Some(LoadOutcome::Discarded));
    assert_eq!(view.state(), ViewState::Loading);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn teardown_before_failure_discards_error() {
    let (gate, source) = gated(|| Err(CachedashError::Status { status: 500 }));
    let mut view = DashboardView::mount(source);
    let rx = view.subscribe();

    view.teardown();
    gate.notify_one();

    assert_eq!(view.join().await, Some(LoadOutcome::Discarded));
    assert_eq!(view.state(), ViewState::Loading);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn teardown_while_http_request_in_flight() {
    let server = metrics_server(
        ResponseTemplate::new(200)
            .set_body_json(json!({"l1_calls_total": 1}))
            .set_delay(Duration::from_millis(200)),
    )
    .await;

    let mut view = DashboardView::mount(Arc::new(HttpMetricsSource::new(server.uri())));
    let rx = view.subscribe();
    tokio::time::sleep(Duration::from_millis(20)).await;
    view.teardown();

    // the request still completes; only its effect is suppressed
    assert_eq!(view.join().await, Some(LoadOutcome::Discarded));
    assert_eq!(view.state(), ViewState::Loading);
    assert!(!rx.has_changed().unwrap());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn teardown_is_idempotent() {
    let (gate, source) = gated(|| Ok(MetricsSnapshot::default()));
    let view = DashboardView::mount(source);

    assert!(!view.is_torn_down());
    view.teardown();
    view.teardown();
    assert!(view.is_torn_down());
    gate.notify_one();
}

#[tokio::test]
async fn dropping_the_view_tears_it_down() {
    let (gate, inner) = gated(|| Ok(MetricsSnapshot::default()));
    let fetched = Arc::new(AtomicBool::new(false));
    let source = Arc::new(ReportingSource {
        inner,
        fetched: Arc::clone(&fetched),
    });
    let view = DashboardView::mount(source);
    let mut rx = view.subscribe();
    drop(view);

    gate.notify_one();
    // the load task holds the last sender; once it finishes the channel
    // closes, and `changed` errors only if nothing was ever sent
    assert!(rx.changed().await.is_err());
    assert!(fetched.load(Ordering::SeqCst));
    assert_eq!(*rx.borrow(), ViewCells::default());
}

#[tokio::test]
async fn teardown_after_settle_keeps_state() {
    let (gate, source) = gated(|| Ok(MetricsSnapshot::default()));
    let mut view = DashboardView::mount(source);
    gate.notify_one();
    assert_eq!(view.join().await, Some(LoadOutcome::Loaded));

    view.teardown();
    assert!(matches!(view.state(), ViewState::Loaded(_)));
}
