//! Error handling.
//!
//! This module provides the error types of the library:
//! - **Initialization**: logger and HTTP client setup failures
//! - **Search**: transport, API and decoding failures of a single request
//! - **Record**: missing or malformed fields in a decoded record
//! - **Output**: failures while printing records
//!
//! Only [`PdnsError::Api`] is treated as a user-facing outcome at the CLI boundary;
//! every other error terminates the process with a diagnostic.

mod types;

// Re-export public API
pub use types::{
    ConfigValidationError, InitializationError, OutputError, PartialResults, PdnsError,
    RecordError,
};
