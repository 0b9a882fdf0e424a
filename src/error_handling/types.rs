//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::header::InvalidHeaderValue;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::record::Record;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured endpoint is not a valid URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// A configured header value cannot be sent over HTTP.
    ///
    /// The offending value is deliberately not included, since it may be the API key.
    #[error("Invalid value for header {header}: {source}")]
    InvalidHeader {
        /// Header name.
        header: &'static str,
        /// Underlying header error.
        source: InvalidHeaderValue,
    },
}

/// Errors raised while reading a field from a passive DNS record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The decoded entry does not contain the requested field.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// The field is present but holds a different JSON type.
    #[error("Field {field} has unexpected type (expected {expected})")]
    InvalidType {
        /// Field name.
        field: String,
        /// Expected JSON type.
        expected: &'static str,
    },

    /// The epoch-millisecond value cannot be represented as a calendar timestamp.
    #[error("Field {field} holds an out-of-range timestamp: {value}")]
    TimestampOutOfRange {
        /// Field name.
        field: String,
        /// Raw millisecond value.
        value: i64,
    },
}

/// Errors returned by a passive DNS search.
#[derive(Error, Debug)]
pub enum PdnsError {
    /// Connection or transport failure.
    #[error("HTTP request failed: {0}")]
    Network(#[from] ReqwestError),

    /// Non-200 response. Displays as the server-provided message only.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// First message reported by the server.
        message: String,
    },

    /// Response body is not valid JSON or lacks the expected envelope fields.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PdnsError {
    /// Returns `true` if the server rejected the request with an error message.
    pub fn is_api_error(&self) -> bool {
        matches!(self, PdnsError::Api { .. })
    }
}

/// A fetch-all run that failed part way through.
///
/// Carries the records of every page fetched before the failing request, in order.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct PartialResults {
    /// Records fetched before the failure.
    pub records: Vec<Record>,
    /// The error that stopped pagination.
    pub source: PdnsError,
}

/// Invalid command-line or library configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option.
    pub field: &'static str,
    /// What is wrong and what is expected instead.
    pub message: String,
}

/// Errors raised while printing records.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Writing to the output stream failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// A record is missing a field required by the output format.
    #[error("Failed to render record: {0}")]
    Record(#[from] RecordError),

    /// JSON serialization failed.
    #[error("Failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),
}
