//! Synchronous client core for the News API (`newsapi.org`).
//!
//! # Overview
//! Validates endpoint arguments, builds authenticated `HttpRequest` values and
//! parses `HttpResponse` values for `/v2/top-headlines`, `/v2/everything` and
//! `/v2/sources`. The network round-trip is delegated to a `Transport`, so
//! request construction stays deterministic and testable.
//!
//! # Design
//! - `NewsApiClient` is stateless; it holds only a `ClientConfig`.
//! - Arguments are collected by `TopHeadlines`, `Everything` and `Sources`
//!   and checked in a fixed order; every validation error is raised before a
//!   request exists.
//! - Successful responses are returned as untyped JSON; error envelopes become
//!   `ApiError::Upstream`.
//!
//! ```no_run
//! use newsapi_core::{NewsApiClient, TopHeadlines, UreqTransport};
//!
//! let client = NewsApiClient::new("your-api-key");
//! let headlines = client
//!     .get_top_headlines(UreqTransport::new(), &TopHeadlines::new().country("us").page_size(10))
//!     .unwrap();
//! println!("{}", headlines["totalResults"]);
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod dates;
pub mod domains;
pub mod error;
pub mod http;
pub mod params;
pub mod transport;
pub mod types;

pub use auth::{attach_auth, auth_headers, ApiKey};
pub use client::NewsApiClient;
pub use config::{ClientConfig, ConfigError};
pub use dates::stringify_date;
pub use domains::Domain;
pub use error::{ApiError, ErrorEnvelope, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use params::{Everything, Sources, TopHeadlines};
pub use transport::{Transport, UreqTransport};
pub use types::{ParamValue, QueryParams, QueryValue};
