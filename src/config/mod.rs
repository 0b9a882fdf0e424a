//! Application configuration and constants.
//!
//! This module provides:
//! - API contract constants (endpoint, default paging, user-agent)
//! - HTTP header name constants
//! - CLI option types and library configuration

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{ClientConfig, LogFormat, LogLevel, Opt, OutputFormat, SearchOptions};
