//! Stateless request builder and response parser for the News API.
//!
//! # Design
//! `NewsApiClient` holds only its configuration and carries no mutable state
//! between calls. Each endpoint has a `build_*` method that validates the
//! arguments and produces an authenticated `HttpRequest`, and all endpoints
//! share `parse_response`. The `get_*` methods chain the two through a
//! `Transport`; a validation error returns before the transport is touched.

use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{attach_auth, ApiKey};
use crate::config::ClientConfig;
use crate::domains::{EVERYTHING_PATH, SOURCES_PATH, TOP_HEADLINES_PATH};
use crate::error::{ApiError, ErrorEnvelope};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::{Everything, Sources, TopHeadlines};
use crate::transport::Transport;
use crate::types::QueryParams;

/// Client for the three News API endpoints.
///
/// `build_*` validates arguments and returns an authenticated `HttpRequest`
/// without touching the network; the host sends it and hands the result to
/// `parse_response`. `get_*` does both through a `Transport`.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    config: ClientConfig,
}

impl NewsApiClient {
    /// A client for the public API with the default 30 s timeout.
    pub fn new(api_key: &str) -> Self {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.config.api_key
    }

    pub fn build_top_headlines(&self, args: &TopHeadlines) -> Result<HttpRequest, ApiError> {
        Ok(self.request(TOP_HEADLINES_PATH, args.validate()?))
    }

    pub fn build_everything(&self, args: &Everything) -> Result<HttpRequest, ApiError> {
        Ok(self.request(EVERYTHING_PATH, args.validate()?))
    }

    pub fn build_sources(&self, args: &Sources) -> Result<HttpRequest, ApiError> {
        Ok(self.request(SOURCES_PATH, args.validate()?))
    }

    /// Return the JSON body unchanged on success.
    ///
    /// Anything other than HTTP 200 with `"status": "ok"` is an error:
    /// `ApiError::Upstream` when the body is a complete error envelope,
    /// otherwise `ApiError::HttpError` carrying the raw body.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        let body: Value = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            Err(e) if response.status == 200 => {
                return Err(ApiError::DeserializationError(e.to_string()));
            }
            Err(_) => {
                return Err(ApiError::HttpError {
                    status: response.status,
                    body: response.body,
                });
            }
        };

        let envelope_ok = body.get("status").and_then(Value::as_str) == Some("ok");
        if response.status == 200 && envelope_ok {
            return Ok(body);
        }

        match serde_json::from_value::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                warn!(
                    http_status = response.status,
                    code = %envelope.code,
                    message = %envelope.message,
                    "News API returned an error"
                );
                Err(ApiError::Upstream(envelope))
            }
            Err(_) => Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            }),
        }
    }

    pub fn get_top_headlines<T: Transport>(
        &self,
        transport: T,
        args: &TopHeadlines,
    ) -> Result<Value, ApiError> {
        let request = self.build_top_headlines(args)?;
        self.send(transport, &request)
    }

    pub fn get_everything<T: Transport>(
        &self,
        transport: T,
        args: &Everything,
    ) -> Result<Value, ApiError> {
        let request = self.build_everything(args)?;
        self.send(transport, &request)
    }

    pub fn get_sources<T: Transport>(&self, transport: T, args: &Sources) -> Result<Value, ApiError> {
        let request = self.build_sources(args)?;
        self.send(transport, &request)
    }

    fn send<T: Transport>(&self, transport: T, request: &HttpRequest) -> Result<Value, ApiError> {
        let response = transport.execute(request).map_err(ApiError::Transport)?;
        self.parse_response(response)
    }

    fn request(&self, path: &str, params: QueryParams) -> HttpRequest {
        let url = format!("{}{path}", self.config.base_url);
        debug!(%url, params = params.len(), "built request");
        HttpRequest {
            url,
            query: params.to_pairs(),
            headers: attach_auth(Vec::new(), &self.config.api_key),
            timeout: self.config.timeout,
        }
    }
}
