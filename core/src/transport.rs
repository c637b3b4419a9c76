//! Executing `HttpRequest` values against the network.
//!
//! The client never performs I/O itself; `Transport` is the seam where a host
//! plugs in its HTTP stack. `UreqTransport` is the blocking implementation
//! used by the convenience `get_*` methods.

use std::fmt;

use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    /// Perform one round-trip. Non-2xx statuses are returned as data, not as
    /// errors; only I/O-level failures produce `Err`.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by `ureq`.
///
/// One agent is built up front and shared by clones, so repeated calls reuse
/// its connection pool. The timeout is applied per request from
/// `HttpRequest::timeout`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes come back as data so the client can read error envelopes.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.full_url()?;

        let mut builder = self
            .agent
            .get(url.as_str())
            .config()
            .timeout_global(Some(request.timeout))
            .build();
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.call()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;
        debug!(url = %request.url, status, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
