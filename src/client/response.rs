//! Response envelopes of the search endpoint.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::record::Record;

/// Successful search response: one page of records plus paging metadata.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Offset of the returned page.
    pub offset: i64,
    /// Number of records in this page.
    pub size: i64,
    /// Total number of records matching the query.
    pub count: i64,
    /// The records themselves.
    pub data: Vec<Map<String, Value>>,
}

impl SearchResponse {
    /// Wraps the page's entries as records, preserving server order.
    pub fn into_records(self) -> Vec<Record> {
        self.data.into_iter().map(Record::from).collect()
    }
}

/// Error response body.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Server messages, most relevant first.
    pub messages: Vec<ErrorMessage>,
}

/// One server-side error message.
///
/// The API sends additional fields (message template, type, field) which are not used.
#[derive(Debug, Deserialize)]
pub struct ErrorMessage {
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// The first message, if the server provided any.
    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(|m| m.message.as_str())
    }
}
