//! Passive DNS search client.
//!
//! [`PdnsClient::search`] performs exactly one POST against the search endpoint.
//! [`PdnsClient::search_all`] pages through every result by repeating the search
//! with an advancing offset until the server returns an empty page.
//!
//! Requests are issued one at a time; each is awaited before the next is sent.

mod query;
mod response;

use log::{debug, error, info};
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};

use crate::config::{ClientConfig, FALLBACK_PAGE_SIZE};
use crate::error_handling::{InitializationError, PartialResults, PdnsError};
use crate::initialization::{build_headers, init_client};
use crate::record::Record;

pub use query::Query;
pub use response::{ErrorMessage, ErrorResponse, SearchResponse};

/// Client for the passive DNS search endpoint.
///
/// Each instance owns its header map, built once at construction. Two clients
/// configured with different API keys never see each other's headers.
#[derive(Debug, Clone)]
pub struct PdnsClient {
    http: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
}

impl PdnsClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the endpoint is not a URL, a header value
    /// is invalid, or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, InitializationError> {
        let endpoint = Url::parse(&config.endpoint)?;
        let headers = build_headers(config)?;
        let http = init_client(config)?;
        Ok(Self {
            http,
            endpoint,
            headers,
        })
    }

    /// The endpoint searches are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Runs one search and returns the page of records in server order.
    ///
    /// Logs a one-line pagination summary (`offset+size/count`) on success and the
    /// server's first error message on failure.
    ///
    /// # Errors
    ///
    /// - `PdnsError::Network` if the request cannot be sent or the body cannot be read
    /// - `PdnsError::Api` if the server answers with any status other than 200
    /// - `PdnsError::Decode` if the body is not the expected JSON envelope
    pub async fn search(&self, query: &Query) -> Result<Vec<Record>, PdnsError> {
        debug!(
            "POST {} query={} offset={} limit={}",
            self.endpoint,
            query.search_term(),
            query.page_offset(),
            query.page_limit()
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(&query.to_request())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            let page: SearchResponse = serde_json::from_str(&body)?;
            info!(
                "{}+{}/{} elements retrieved",
                page.offset, page.size, page.count
            );
            Ok(page.into_records())
        } else {
            let failure: ErrorResponse = serde_json::from_str(&body)?;
            let message = failure
                .first_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            error!("{}", message);
            Err(PdnsError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetches every page of `query`, concatenated in order.
    ///
    /// The query's limit is the page size (non-positive limits fall back to 100).
    /// Paging starts at the query's offset (negative offsets start at 0) and stops
    /// at the first empty page. Type and class filters apply to every page.
    ///
    /// # Errors
    ///
    /// Returns `PartialResults` holding every record fetched before the failing
    /// request together with the error.
    pub async fn search_all(&self, query: &Query) -> Result<Vec<Record>, PartialResults> {
        let page_size = if query.page_limit() <= 0 {
            FALLBACK_PAGE_SIZE
        } else {
            query.page_limit()
        };

        let mut records = Vec::new();
        let mut offset = query.page_offset().max(0);
        let mut requests = 0usize;

        loop {
            requests += 1;
            let page = match self.search(&query.at_page(offset, page_size)).await {
                Ok(page) => page,
                Err(source) => {
                    debug!(
                        "Pagination aborted after {} request(s) with {} record(s) fetched",
                        requests,
                        records.len()
                    );
                    return Err(PartialResults { records, source });
                }
            };
            if page.is_empty() {
                break;
            }
            records.extend(page);
            offset = offset.saturating_add(page_size);
        }

        debug!(
            "Pagination finished after {} request(s), {} record(s)",
            requests,
            records.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{all_of, matchers::*, responders::*, Expectation, Server};
    use serde_json::{json, Value};

    const SEARCH_PATH: &str = "/pdns/v3/search";

    fn client_for(server: &Server, api_key: Option<&str>) -> PdnsClient {
        PdnsClient::new(&ClientConfig {
            endpoint: server.url(SEARCH_PATH).to_string(),
            api_key: api_key.map(str::to_string),
            ..Default::default()
        })
        .expect("Failed to create client")
    }

    fn entry(i: usize) -> Value {
        json!({
            "query": format!("host{}.example.com", i),
            "answer": "192.0.2.1",
            "rrtype": "a",
            "rrclass": "in",
            "firstSeenTimestamp": 1700000000123_i64,
            "lastSeenTimestamp": 1700000001000_i64,
            "times": 3,
            "minTtl": 60,
            "maxTtl": 300
        })
    }

    fn page(offset: i64, size: usize, count: i64) -> Value {
        json!({
            "offset": offset,
            "size": size,
            "count": count,
            "limit": size,
            "data": (0..size).map(entry).collect::<Vec<_>>()
        })
    }

    fn request_body(term: &str, offset: i64, limit: i64, rr_type: Value) -> Value {
        json!({
            "query": term,
            "aggregateResult": true,
            "includeAnonymousResults": true,
            "rrClass": [],
            "rrType": rr_type,
            "customerID": [],
            "tlp": [],
            "offset": offset,
            "limit": limit
        })
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let result = PdnsClient::new(&ClientConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(InitializationError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_clients_keep_their_own_headers() {
        let keyed = PdnsClient::new(&ClientConfig {
            api_key: Some("key-a".to_string()),
            ..Default::default()
        })
        .unwrap();
        let anonymous = PdnsClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(keyed.headers().get("argus-api-key").unwrap(), "key-a");
        assert!(anonymous.headers().get("argus-api-key").is_none());
    }

    #[tokio::test]
    async fn test_search_sends_one_post_and_returns_page() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", SEARCH_PATH),
                request::headers(contains(("accept", "application/json"))),
                request::headers(contains(("content-type", "application/json"))),
                request::headers(not(contains(key("argus-api-key")))),
                request::body(json_decoded(eq(request_body(
                    "example.com",
                    0,
                    100,
                    json!([])
                )))),
            ])
            .times(1)
            .respond_with(json_encoded(page(0, 3, 57))),
        );

        let client = client_for(&server, None);
        let records = client.search(&Query::new("example.com")).await.unwrap();

        // Length follows the page size, not the total count
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].query().unwrap(), "host0.example.com");
        assert_eq!(records[2].query().unwrap(), "host2.example.com");
    }

    #[tokio::test]
    async fn test_search_sends_api_key_and_lower_cased_filters() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", SEARCH_PATH),
                request::headers(contains(("argus-api-key", "secret"))),
                request::body(json_decoded(eq(json!({
                    "query": "example.com",
                    "aggregateResult": true,
                    "includeAnonymousResults": true,
                    "rrClass": ["in"],
                    "rrType": ["a", "mx"],
                    "customerID": [],
                    "tlp": [],
                    "offset": 10,
                    "limit": 5
                })))),
            ])
            .respond_with(json_encoded(json!({
                "offset": 10,
                "size": 1,
                "count": 11,
                "data": [{
                    "query": "example.com",
                    "answer": "mail.example.com",
                    "rrtype": "mx",
                    "rrclass": "in",
                    "firstSeenTimestamp": 1700000000000_i64,
                    "lastSeenTimestamp": 1700000000000_i64,
                    "times": 1,
                    "minTtl": 3600,
                    "maxTtl": 3600
                }]
            }))),
        );

        let client = client_for(&server, Some("secret"));
        let query = Query::new("example.com")
            .limit(5)
            .offset(10)
            .record_types(["MX", "A"])
            .record_classes(["In"]);
        let records = client.search(&query).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type().unwrap(), "MX");
        assert_eq!(records[0].record_class().unwrap(), "IN");
    }

    #[tokio::test]
    async fn test_search_non_200_is_api_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", SEARCH_PATH)).respond_with(
                status_code(402)
                    .append_header("Content-Type", "application/json")
                    .body(
                        json!({
                            "responseCode": 402,
                            "messages": [{"message": "quota exceeded", "type": "ACTION_ERROR"}]
                        })
                        .to_string(),
                    ),
            ),
        );

        let client = client_for(&server, None);
        let err = client
            .search(&Query::new("example.com"))
            .await
            .unwrap_err();

        assert!(err.is_api_error());
        assert_eq!(err.to_string(), "quota exceeded");
        match err {
            PdnsError::Api { status, .. } => assert_eq!(status, 402),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_error_without_messages_uses_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", SEARCH_PATH))
                .respond_with(status_code(503).body(r#"{"messages": []}"#)),
        );

        let client = client_for(&server, None);
        let err = client
            .search(&Query::new("example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[tokio::test]
    async fn test_search_non_json_body_is_decode_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", SEARCH_PATH))
                .respond_with(status_code(200).body("<html>maintenance</html>")),
        );

        let client = client_for(&server, None);
        let err = client
            .search(&Query::new("example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, PdnsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_non_json_error_body_is_decode_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", SEARCH_PATH))
                .respond_with(status_code(502).body("Bad Gateway")),
        );

        let client = client_for(&server, None);
        let err = client
            .search(&Query::new("example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, PdnsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_connection_refused_is_network_error() {
        // Bind and drop a listener to get a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = PdnsClient::new(&ClientConfig {
            endpoint: format!("http://127.0.0.1:{}{}", port, SEARCH_PATH),
            ..Default::default()
        })
        .unwrap();

        let err = client
            .search(&Query::new("example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, PdnsError::Network(_)));
    }

    #[tokio::test]
    async fn test_search_all_stops_at_first_empty_page() {
        let server = Server::run();
        for (offset, size) in [(0, 100), (100, 100), (200, 37), (300, 0)] {
            server.expect(
                Expectation::matching(all_of![
                    request::method_path("POST", SEARCH_PATH),
                    request::body(json_decoded(eq(request_body(
                        "example.com",
                        offset,
                        100,
                        json!([])
                    )))),
                ])
                .times(1)
                .respond_with(json_encoded(page(offset, size, 237))),
            );
        }

        let client = client_for(&server, None);
        let records = client
            .search_all(&Query::new("example.com"))
            .await
            .unwrap();

        assert_eq!(records.len(), 237);
        // Server verifies on drop that each page was requested exactly once
    }

    #[tokio::test]
    async fn test_search_all_non_positive_limit_uses_default_page_size() {
        let server = Server::run();
        for (offset, size) in [(0, 2), (100, 0)] {
            server.expect(
                Expectation::matching(request::body(json_decoded(eq(request_body(
                    "example.com",
                    offset,
                    100,
                    json!([])
                )))))
                .times(1)
                .respond_with(json_encoded(page(offset, size, 2))),
            );
        }

        let client = client_for(&server, None);
        let records = client
            .search_all(&Query::new("example.com").limit(0))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_search_all_keeps_filters_on_every_page() {
        let server = Server::run();
        for (offset, size) in [(0, 10), (10, 0)] {
            server.expect(
                Expectation::matching(request::body(json_decoded(eq(request_body(
                    "example.com",
                    offset,
                    10,
                    json!(["ns"])
                )))))
                .times(1)
                .respond_with(json_encoded(page(offset, size, 10))),
            );
        }

        let client = client_for(&server, None);
        let query = Query::new("example.com").limit(10).record_types(["NS"]);
        let records = client.search_all(&query).await.unwrap();
        assert_eq!(records.len(), 10);
    }

    #[tokio::test]
    async fn test_search_all_failure_keeps_fetched_pages() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::body(json_decoded(eq(request_body(
                "example.com",
                0,
                50,
                json!([])
            )))))
            .times(1)
            .respond_with(json_encoded(page(0, 50, 500))),
        );
        server.expect(
            Expectation::matching(request::body(json_decoded(eq(request_body(
                "example.com",
                50,
                50,
                json!([])
            )))))
            .times(1)
            .respond_with(
                status_code(429).body(json!({"messages": [{"message": "rate limited"}]}).to_string()),
            ),
        );

        let client = client_for(&server, None);
        let partial = client
            .search_all(&Query::new("example.com").limit(50))
            .await
            .unwrap_err();

        assert_eq!(partial.records.len(), 50);
        assert_eq!(partial.records[0].query().unwrap(), "host0.example.com");
        assert!(partial.source.is_api_error());
        assert_eq!(partial.to_string(), "rate limited");
    }
}
