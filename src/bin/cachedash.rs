//! cachedash: semantic cache metrics dashboard
//!
//! Mounts the dashboard against a metrics API, waits for the single load to
//! settle, and prints the rendered frame.

use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachedash::render::{self, OutputFormat};
use cachedash::{Config, DashboardView, ViewState};

/// Semantic cache metrics dashboard
#[derive(Parser)]
#[command(name = "cachedash")]
#[command(version = cachedash::PKG_VERSION)]
#[command(about = "Semantic cache metrics dashboard")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the metrics API (overrides config)
    #[arg(short, long, env = "CACHEDASH_URL")]
    url: Option<String>,

    /// Metrics endpoint path (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Output format: text, html or json (overrides config)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Write the rendered dashboard to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn; override with RUST_LOG). Logs go to
    // stderr so stdout carries only the rendered frame.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        config.source.base_url = url;
    }
    if let Some(endpoint) = args.endpoint {
        config.source.endpoint = endpoint;
    }
    if let Some(format) = args.format {
        config.display.format = format;
    }
    config.validate()?;

    let source = config.http_source();
    info!(version = cachedash::PKG_VERSION, url = source.url(), "cachedash starting");
    let view = DashboardView::mount(Arc::new(source));

    let state = settle_or_interrupt(&view, tokio::signal::ctrl_c()).await;

    let frame = render::render(&state, config.display.format, &config.text_options())?;
    render::write_frame(&frame, args.output.as_deref())?;

    Ok(exit_code(&state))
}

/// Wait for the view to settle. If `interrupt` fires first the view is torn
/// down and the frame is whatever state it held, normally `Loading`.
async fn settle_or_interrupt<F: Future>(view: &DashboardView, interrupt: F) -> ViewState {
    tokio::select! {
        state = view.settled() => state,
        _ = interrupt => {
            view.teardown();
            view.state()
        }
    }
}

/// Non-zero only when the load failed.
fn exit_code(state: &ViewState) -> ExitCode {
    match state {
        ViewState::Error(_) => ExitCode::FAILURE,
        ViewState::Loading | ViewState::Loaded(_) => ExitCode::SUCCESS,
    }
}
