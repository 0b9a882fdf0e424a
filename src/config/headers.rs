//! HTTP header constants.
//!
//! The standard headers (`Accept`, `Content-Type`, `User-Agent`, `Referer`) use the
//! `reqwest::header` constants; only the API-specific ones are defined here.

/// Optional authentication header.
///
/// Header names are case-insensitive; the lower-case form is required by
/// `HeaderName::from_static`.
pub const HEADER_API_KEY: &str = "argus-api-key";

/// Media type used for both `Accept` and `Content-Type`.
pub const MEDIA_TYPE_JSON: &str = "application/json";
