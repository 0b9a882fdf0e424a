//! HTTP client initialization.
//!
//! This module builds the `reqwest::Client` and the per-instance header map
//! sent with every search request.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, REFERER, USER_AGENT,
};
use reqwest::ClientBuilder;

use crate::config::{ClientConfig, HEADER_API_KEY, MEDIA_TYPE_JSON};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client.
///
/// Creates a `reqwest::Client` configured with the optional request timeout.
/// Without a timeout the HTTP stack defaults apply.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &ClientConfig) -> Result<reqwest::Client, InitializationError> {
    let mut builder = ClientBuilder::new();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Builds the header map for one client instance.
///
/// Always contains `Accept`, `Content-Type`, `User-Agent` and `Referer`; contains
/// `Argus-API-Key` only when a non-empty key is configured.
///
/// # Errors
///
/// Returns `InitializationError::InvalidHeader` if the user-agent or API key contains
/// characters that cannot be sent in a header.
pub fn build_headers(config: &ClientConfig) -> Result<HeaderMap, InitializationError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE_JSON));

    let user_agent = header_value("user-agent", &config.user_agent)?;
    headers.insert(REFERER, user_agent.clone());
    headers.insert(USER_AGENT, user_agent);

    if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
        let mut value = header_value(HEADER_API_KEY, key)?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(HEADER_API_KEY), value);
    }

    Ok(headers)
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, InitializationError> {
    HeaderValue::from_str(value)
        .map_err(|source| InitializationError::InvalidHeader { header, source })
}
