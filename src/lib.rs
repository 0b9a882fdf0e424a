//! mnemonic_pdns library: passive DNS search client
//!
//! This library queries the mnemonic passive DNS search API, optionally pages
//! through every result, and exposes each observation as a typed [`Record`].
//!
//! # Example
//!
//! ```no_run
//! use mnemonic_pdns::{ClientConfig, PdnsClient, Query};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PdnsClient::new(&ClientConfig::default())?;
//! let records = client
//!     .search(&Query::new("example.com").record_types(["A"]))
//!     .await?;
//! for record in &records {
//!     println!("{}", record.summary()?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod output;
pub mod record;

// Re-export public API
pub use client::{PdnsClient, Query};
pub use config::{ClientConfig, LogFormat, LogLevel, Opt, OutputFormat, SearchOptions};
pub use error_handling::{PartialResults, PdnsError, RecordError};
pub use record::Record;
pub use run::{run_search, SearchOutcome};

// Internal run module (contains the search orchestration)
mod run {
    use log::{info, warn};

    use crate::client::PdnsClient;
    use crate::config::SearchOptions;
    use crate::error_handling::{PartialResults, PdnsError};
    use crate::record::Record;

    /// Result of a CLI-level search.
    ///
    /// Records fetched before a failure are kept: when fetch-all fails on a later
    /// page, `records` holds every earlier page and `error` the failure.
    #[derive(Debug)]
    pub struct SearchOutcome {
        /// Records in server order.
        pub records: Vec<Record>,
        /// The error that ended the search early, if any.
        pub error: Option<PdnsError>,
    }

    impl SearchOutcome {
        /// `true` if every requested page was fetched.
        pub fn is_complete(&self) -> bool {
            self.error.is_none()
        }
    }

    /// Runs a single search or a fetch-all, depending on `options.fetch_all`.
    ///
    /// Never fails as a whole; errors are reported in [`SearchOutcome::error`]
    /// alongside whatever was fetched before them.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mnemonic_pdns::{run_search, ClientConfig, PdnsClient, Query, SearchOptions};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PdnsClient::new(&ClientConfig::default())?;
    /// let options = SearchOptions {
    ///     query: Query::new("example.com").limit(500),
    ///     fetch_all: true,
    /// };
    /// let outcome = run_search(&client, &options).await;
    /// println!("{} records", outcome.records.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_search(client: &PdnsClient, options: &SearchOptions) -> SearchOutcome {
        if options.fetch_all {
            info!("Fetching all results for {}", options.query.search_term());
            match client.search_all(&options.query).await {
                Ok(records) => SearchOutcome {
                    records,
                    error: None,
                },
                Err(PartialResults { records, source }) => {
                    if !records.is_empty() {
                        warn!(
                            "Search stopped early; returning {} record(s) fetched before the error",
                            records.len()
                        );
                    }
                    SearchOutcome {
                        records,
                        error: Some(source),
                    }
                }
            }
        } else {
            match client.search(&options.query).await {
                Ok(records) => SearchOutcome {
                    records,
                    error: None,
                },
                Err(e) => SearchOutcome {
                    records: Vec::new(),
                    error: Some(e),
                },
            }
        }
    }

}
