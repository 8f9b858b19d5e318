//! Error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of one REST call
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response: connection refused, DNS failure, body read aborted
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a status outside 2xx
    #[error("API {status} {body}")]
    Request { status: u16, body: String },

    /// The success body was not the JSON we expected
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Startup and shutdown failures of the console binary
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("invalid API base URL {url:?}: {reason}")]
    ApiBase { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display_carries_status_and_body() {
        let err = ApiError::Request {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "API 500 boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = ApiError::from(serde_err);
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.status(), None);
    }
}
