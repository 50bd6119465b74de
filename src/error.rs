//! Error types for the dashboard.
//!
//! Loaders never panic on bad network input: everything funnels into
//! [`FetchError`], which the views turn into an inline status line.

use thiserror::Error;

/// Custom Result type for backend fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Failures at the network/response boundary of a loader.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Backend answered HTTP {status}")]
    Status { status: u16 },

    /// Body was not JSON, or had no usable `data` array.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Transport hiccups are worth one more attempt, the rest are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Timeout(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// User input rejected before any request is issued.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Enter a symbol first!")]
    EmptySymbol,
}

/// Navigation to a page id that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("No page with id '{0}'")]
    UnknownPage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_transport_and_timeout_only() {
        assert!(FetchError::Transport("refused".into()).is_transient());
        assert!(FetchError::Timeout(10).is_transient());
        assert!(!FetchError::Status { status: 500 }.is_transient());
        assert!(!FetchError::Decode("eof".into()).is_transient());
        assert!(!FetchError::InvalidUrl("x".into()).is_transient());
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: FetchError = json_err.into();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn empty_symbol_message_is_user_facing() {
        assert_eq!(InputError::EmptySymbol.to_string(), "Enter a symbol first!");
    }
}
