//! Configuration loading for the `cachedash` CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag, must exist)
//! 2. `~/.cachedash/config.toml` (user)
//! 3. `/etc/cachedash/config.toml` (system)
//!
//! With no file found the built-in defaults apply. Command-line flags are
//! layered on top by the binary.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::loader::HttpMetricsSource;
use crate::loader::http::{DEFAULT_BASE_URL, DEFAULT_ENDPOINT};
use crate::render::OutputFormat;
use crate::render::text::{DEFAULT_RING_WIDTH, TextOptions};
use crate::{CachedashError, Result};

/// Upper bound for the text gauge width.
const MAX_RING_WIDTH: usize = 100;

/// Dashboard configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where the metrics come from.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the metrics API (default: http://127.0.0.1:3000).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Endpoint path (default: /api/metrics).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// How the dashboard is rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Output format (default: text).
    #[serde(default)]
    pub format: OutputFormat,
    /// Cells in the text hit-ratio gauge (default: 20).
    #[serde(default = "default_ring_width")]
    pub ring_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            ring_width: default_ring_width(),
        }
    }
}

fn default_ring_width() -> usize {
    DEFAULT_RING_WIDTH
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.cachedash/config.toml`
    /// 3. `/etc/cachedash/config.toml`
    ///
    /// Falls back to defaults when no file exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| {
            CachedashError::Configuration(format!("Failed to parse config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CachedashError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            CachedashError::Configuration(msg) => {
                CachedashError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    /// Resolve the config file path, `None` when no file exists.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(CachedashError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".cachedash").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/cachedash/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Reject values the renderers cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.display.ring_width == 0 || self.display.ring_width > MAX_RING_WIDTH {
            return Err(CachedashError::Configuration(format!(
                "display.ring_width must be between 1 and {MAX_RING_WIDTH}, got {}",
                self.display.ring_width
            )));
        }
        if self.source.base_url.trim().is_empty() {
            return Err(CachedashError::Configuration(
                "source.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP source for the configured endpoint.
    pub fn http_source(&self) -> HttpMetricsSource {
        HttpMetricsSource::with_endpoint(&self.source.base_url, &self.source.endpoint)
    }

    /// Options for the text renderer.
    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            ring_width: self.display.ring_width,
        }
    }
}
