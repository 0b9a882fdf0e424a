//! Configuration constants.
//!
//! This module defines the fixed values of the passive DNS API contract and the
//! defaults used when the caller does not override them.

/// Passive DNS search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.mnemonic.no/pdns/v3/search";

/// Default User-Agent string for search requests.
///
/// The same string is sent as the `Referer` header. The API has historically been
/// queried with this browser-style pair, so it is kept as the default.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; rv:68.0) Gecko/20100101 Firefox/68.0";

/// Default page size for a single search request.
pub const DEFAULT_LIMIT: i64 = 100;

/// Page size used by fetch-all when the caller passes a non-positive limit.
pub const FALLBACK_PAGE_SIZE: i64 = 100;

/// Default offset for a single search request.
pub const DEFAULT_OFFSET: i64 = 0;

/// Environment variable holding the API key.
///
/// Read by the CLI (and from a `.env` file, if present) when `--api-key` is not given.
pub const API_KEY_ENV: &str = "MNEMONIC_API_KEY";

/// Exit status for a completed run, including a search the API rejected.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status for network, decoding or output failures.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for invalid command-line values.
pub const EXIT_USAGE: i32 = 2;
