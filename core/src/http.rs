//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe one HTTP exchange as plain data. `UserInfoClient`
//! builds an `HttpRequest` and parses an `HttpResponse` without touching the
//! network; [`crate::transport`] (or a test harness) performs the round-trip
//! in between. Query parameters stay separate from the path so the executor
//! can percent-encode them.

use std::time::Duration;

/// HTTP method for a request. The user-info endpoint only reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Upper bound on the whole round-trip.
    pub timeout: Duration,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
