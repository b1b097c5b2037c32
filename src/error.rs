//! Cachedash error types

/// Cachedash error types
#[derive(Debug, thiserror::Error)]
pub enum CachedashError {
    // Load failures
    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("network error: {0}")]
    Http(String),

    #[error("decode error: {0}")]
    Decode(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CachedashError {
    /// Whether this error belongs to the load boundary (status, network or
    /// decode). These are the only errors a view ever stores.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Http(_) | Self::Decode(_)
        )
    }
}

impl From<serde_json::Error> for CachedashError {
    fn from(err: serde_json::Error) -> Self {
        CachedashError::Decode(err.to_string())
    }
}

/// Result type alias for Cachedash operations
pub type Result<T> = std::result::Result<T, CachedashError>;
