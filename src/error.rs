//! Error types for the dropbox_links crate.

use thiserror::Error;

/// Errors that can occur when talking to Dropbox or exporting results.
#[derive(Error, Debug)]
pub enum DropboxError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Dropbox unavailable ({status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Shared link already exists")]
    SharedLinkAlreadyExists(Option<String>),

    #[error("Invalid folder path: {0}")]
    InvalidPath(String),

    #[error("No access token provided")]
    MissingToken,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to read input: {0}")]
    PromptError(#[from] rustyline::error::ReadlineError),
}

impl DropboxError {
    /// True for endpoint errors reported by Dropbox itself.
    ///
    /// These are recovered locally by the extractor. Everything else
    /// (authentication, rate limiting, server outages, transport, local I/O)
    /// aborts the run.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            DropboxError::ApiError { .. } | DropboxError::SharedLinkAlreadyExists(_)
        )
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, DropboxError::AuthenticationError(_))
    }
}

/// Result type alias for DropboxError.
pub type Result<T> = std::result::Result<T, DropboxError>;
