//! Renderers for a [`ViewState`](crate::view::ViewState).
//!
//! Three targets share one layout: the `Semantic Cache Metrics` heading,
//! then either the loading line, the error message verbatim, or the three
//! cards. The hit-ratio ring is drawn from the clamped percentage and always
//! sits next to its numeric label.

pub mod html;
pub mod json;
pub mod text;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::Result;
use crate::view::ViewState;

/// Page heading.
pub const HEADING: &str = "Semantic Cache Metrics";

/// Shown while the load is in flight.
pub const LOADING_TEXT: &str = "Loading…";

/// Output target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected text, html or json)")),
        }
    }
}

/// Render `state` in the given format.
pub fn render(state: &ViewState, format: OutputFormat, text_options: &text::TextOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(state, text_options)),
        OutputFormat::Html => Ok(html::render(state)),
        OutputFormat::Json => json::render(state),
    }
}

/// Write a rendered frame to `output`, or to stdout when `None`.
pub fn write_frame(frame: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, frame)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(frame.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CachedashError;

    #[test]
    fn parse_output_format() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("yaml"));
    }

    #[test]
    fn dispatch_matches_format() {
        let opts = text::TextOptions::default();
        let html = render(&ViewState::Loading, OutputFormat::Html, &opts).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        let json = render(&ViewState::Loading, OutputFormat::Json, &opts).unwrap();
        assert!(json.contains("\"loading\""));
        let text = render(&ViewState::Loading, OutputFormat::Text, &opts).unwrap();
        assert!(text.contains(LOADING_TEXT));
    }

    #[test]
    fn write_frame_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.html");
        write_frame("<p>frame</p>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>frame</p>");
    }

    #[test]
    fn write_frame_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_frame("frame", Some(&path)).unwrap_err();
        assert!(matches!(err, CachedashError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(!err.is_load_failure());
    }
}
