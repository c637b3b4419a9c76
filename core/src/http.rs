//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe a GET request and its response as plain data. The
//! client builds `HttpRequest` values and parses `HttpResponse` values; a
//! `Transport` (see `transport`) or any other host code performs the I/O.
//! Every News API call is a GET, so the request carries no method or body.

use std::time::Duration;

use url::Url;

/// An authenticated GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Endpoint URL without a query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// The endpoint URL with the percent-encoded query string appended.
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
