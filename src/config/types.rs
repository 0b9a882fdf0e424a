//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use std::fmt;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::client::Query;
use crate::config::constants::{
    API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_LIMIT, DEFAULT_OFFSET, DEFAULT_USER_AGENT,
};
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How records are printed to standard output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `query, answer, TYPE, first_seen, last_seen, times_seen`
    Plain,
    /// Adds record class and TTL range, space separated
    Verbose,
    /// One normalized JSON object per line
    Json,
}

/// HTTP client configuration.
///
/// # Examples
///
/// ```
/// use mnemonic_pdns::config::ClientConfig;
///
/// let config = ClientConfig {
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.endpoint, "https://api.mnemonic.no/pdns/v3/search");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Search endpoint URL
    pub endpoint: String,

    /// Sent as `Argus-API-Key` when present and non-empty
    pub api_key: Option<String>,

    /// Sent as both `User-Agent` and `Referer`
    pub user_agent: String,

    /// Whole-request timeout; `None` keeps the HTTP stack default
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

// The API key must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// What to search for and whether to page through every result.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// The query for a single search, or the template for fetch-all pages
    pub query: Query,

    /// Iterate over all pages, using the query's limit as page size
    pub fetch_all: bool,
}

/// Command-line options.
///
/// This struct is automatically generated by `clap` from the field attributes.
///
/// # Examples
///
/// ```bash
/// # Single page
/// mnemonic-pdns example.com
///
/// # Only A and AAAA records, second page of 50
/// mnemonic-pdns -l 50 -o 50 -r a aaaa -- example.com
///
/// # Everything, 500 records per request
/// mnemonic-pdns --all -l 500 example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "mnemonic-pdns",
    about = "Access to Mnemonic Passive DNS API",
    version
)]
pub struct Opt {
    /// Name to lookup (domain, IP address or search term)
    #[arg(value_name = "N")]
    pub name: String,

    /// Limit the number of results
    #[arg(
        short,
        long,
        value_name = "L",
        default_value_t = DEFAULT_LIMIT,
        allow_negative_numbers = true
    )]
    pub limit: i64,

    /// Offset the number of results
    #[arg(
        short,
        long,
        value_name = "O",
        default_value_t = DEFAULT_OFFSET,
        allow_negative_numbers = true
    )]
    pub offset: i64,

    /// Iterate through all results
    #[arg(short, long)]
    pub all: bool,

    /// RR types to look up
    #[arg(short, long, num_args = 1..)]
    pub rrtype: Vec<String>,

    /// RR classes to look up
    #[arg(short = 'c', long, num_args = 1..)]
    pub rrclass: Vec<String>,

    /// API key sent as Argus-API-Key
    #[arg(short = 'k', long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// HTTP User-Agent header value (also sent as Referer)
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds (default: no timeout)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Output format: plain|verbose|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Checks the options that cannot be forwarded to the API as-is.
    ///
    /// Paging values are deliberately not checked.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` naming the offending option.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "name",
                message: "search term must not be empty".to_string(),
            });
        }

        match url::Url::parse(&self.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigValidationError {
                    field: "endpoint",
                    message: format!("expected an http or https URL, got scheme {}", url.scheme()),
                })
            }
            Err(e) => {
                return Err(ConfigValidationError {
                    field: "endpoint",
                    message: format!("not a valid URL ({e})"),
                })
            }
        }

        if self.timeout_seconds == Some(0) {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0 (omit it to disable the timeout)".to_string(),
            });
        }

        Ok(())
    }

    /// HTTP client configuration derived from the options.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout_seconds.map(Duration::from_secs),
        }
    }

    /// Search options derived from the options.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            query: Query::new(self.name.clone())
                .limit(self.limit)
                .offset(self.offset)
                .record_types(&self.rrtype)
                .record_classes(&self.rrclass),
            fetch_all: self.all,
        }
    }
}
