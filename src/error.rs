//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Could not reach the language model (connection, timeout, DNS)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The language model rejected the request with HTTP 429
    #[error("Rate limited by the language model API{}", retry_hint(.retry_after))]
    RateLimited {
        /// Seconds to wait, from the `Retry-After` header when present.
        retry_after: Option<u64>,
    },

    /// Language model API error with status context
    #[error("Language model API error: {message}")]
    Api {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// The model answered, but not with usable song JSON
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A song or file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The song store could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Text could not be extracted from an uploaded document
    #[error("Could not read document: {0}")]
    Extraction(String),

    /// Login rejected
    #[error("Invalid access code")]
    Unauthorized,

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

#[allow(clippy::ref_option)]
fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after.map_or_else(String::new, |secs| format!(", retry in {secs}s"))
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create an API error from an HTTP status, with a hint where one helps
    pub fn api_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            400 => Some("The request was rejected - check OPENAI_MODEL"),
            401 => Some("Check the OPENAI_API_KEY environment variable"),
            403 => Some("Your API key may lack access to this model"),
            404 => Some("Check OPENAI_BASE_URL and OPENAI_MODEL"),
            500..=599 => Some("Language model server error - try again later"),
            _ => None,
        };
        Self::Api {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable(message.into())
    }

    /// Create a malformed-response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Message suitable for showing to the user, including any hint
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, hint: Some(hint), .. } => format!("{message} ({hint})"),
            other => other.to_string(),
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
