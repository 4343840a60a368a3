use std::io;

use thiserror::Error;

/// Library-wide error type for srcds-sync operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Object store request failed.
    #[error("Object store error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    ObjectStore { message: String, status: Option<u16> },

    /// Remote listing returned a response the client could not interpret.
    #[error("Failed to parse object listing: {0}")]
    Listing(String),

    /// Manifest content is not valid JSON object data.
    #[error("Failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// Decompressing a downloaded map archive failed.
    #[error("Failed to decompress map archive '{archive}': {details}")]
    Decompress { archive: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn store_error<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::ObjectStore { message: message.into(), status }
    }
}
