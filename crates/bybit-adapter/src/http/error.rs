/*
[INPUT]:  Error sources (HTTP, exchange envelope, serialization, config)
[OUTPUT]: Structured error types and the tri-state status codes
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Bybit adapter
#[derive(Error, Debug)]
pub enum BybitError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport returned a non-success HTTP status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Exchange envelope carried a non-zero `retCode`
    #[error("Exchange error (retCode {code}): {message}")]
    Exchange { code: i64, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response was valid JSON but not the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure inside a named public operation
    #[error("{operation} | {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<BybitError>,
    },
}

impl BybitError {
    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        BybitError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Innermost error, skipping operation context
    pub fn root(&self) -> &BybitError {
        match self {
            BybitError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Name of the public operation that failed, if any
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            BybitError::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Check if the exchange itself rejected the request
    pub fn is_exchange_error(&self) -> bool {
        matches!(self.root(), BybitError::Exchange { .. })
    }

    /// Errors always map to the failure code
    pub fn status(&self) -> Status {
        Status::Failure
    }
}

/// Tri-state outcome code shared by every public operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    /// Valid request, but the order has not traded yet
    NotExecuted,
}

impl Status {
    pub fn code(&self) -> i8 {
        match self {
            Status::Success => 0,
            Status::Failure => -1,
            Status::NotExecuted => -2,
        }
    }
}

/// Attach the name of the failing public operation to an error
pub(crate) trait OperationContext<T> {
    fn in_operation(self, operation: &'static str) -> Result<T>;
}

impl<T> OperationContext<T> for Result<T> {
    fn in_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|source| BybitError::Operation {
            operation,
            source: Box::new(source),
        })
    }
}

/// Result type alias for Bybit operations
pub type Result<T> = std::result::Result<T, BybitError>;
