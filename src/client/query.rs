//! Search query model and request body serialization.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{DEFAULT_LIMIT, DEFAULT_OFFSET};

/// Parameters of one passive DNS search.
///
/// Record type and class filters are stored lower-cased and de-duplicated.
/// Paging values are forwarded to the API as given, including zero or negative values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    search_term: String,
    limit: i64,
    offset: i64,
    record_types: BTreeSet<String>,
    record_classes: BTreeSet<String>,
}

impl Query {
    /// Creates a query for `search_term` with the default page (`limit` 100, `offset` 0)
    /// and no filters.
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            record_types: BTreeSet::new(),
            record_classes: BTreeSet::new(),
        }
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the page offset.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Restricts results to the given record types (`A`, `mx`, ...).
    pub fn record_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.record_types = normalize(types);
        self
    }

    /// Restricts results to the given record classes (`IN`, ...).
    pub fn record_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.record_classes = normalize(classes);
        self
    }

    /// The search term (domain, IP address or free text).
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Requested page size.
    pub fn page_limit(&self) -> i64 {
        self.limit
    }

    /// Requested page offset.
    pub fn page_offset(&self) -> i64 {
        self.offset
    }

    /// Lower-cased record type filter.
    pub fn types(&self) -> &BTreeSet<String> {
        &self.record_types
    }

    /// Lower-cased record class filter.
    pub fn classes(&self) -> &BTreeSet<String> {
        &self.record_classes
    }

    /// Copy of this query pointing at another page.
    pub(crate) fn at_page(&self, offset: i64, limit: i64) -> Self {
        Self {
            limit,
            offset,
            ..self.clone()
        }
    }

    /// Request body for this query, including the fixed auxiliary flags.
    pub(crate) fn to_request(&self) -> SearchRequest<'_> {
        SearchRequest {
            query: &self.search_term,
            aggregate_result: true,
            include_anonymous_results: true,
            rr_class: self.record_classes.iter().map(String::as_str).collect(),
            rr_type: self.record_types.iter().map(String::as_str).collect(),
            customer_id: Vec::new(),
            tlp: Vec::new(),
            offset: self.offset,
            limit: self.limit,
        }
    }
}

fn normalize<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// JSON body of `POST /pdns/v3/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
    pub aggregate_result: bool,
    pub include_anonymous_results: bool,
    pub rr_class: Vec<&'a str>,
    pub rr_type: Vec<&'a str>,
    #[serde(rename = "customerID")]
    pub customer_id: Vec<u64>,
    pub tlp: Vec<String>,
    pub offset: i64,
    pub limit: i64,
}
