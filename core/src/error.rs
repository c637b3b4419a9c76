//! Error types for the News API client.
//!
//! # Design
//! Validation failures (`TypeMismatch`, `InvalidParameterValue`,
//! `IncompatibleParameters`, `OutOfRange`, `MalformedDate`) are raised while
//! assembling the query map, so no request is ever built from a bad argument.
//! `Upstream` is only produced after a round-trip, when the API answers with a
//! non-"ok" envelope. Transport failures are carried untouched as the source
//! of `Transport`.

use serde::Deserialize;

/// Boxed error produced by a `Transport` implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The `{"status", "code", "message"}` envelope the API returns on failure.
///
/// All three fields are required, so an arbitrary JSON object (a proxy error
/// page, a truncated success body) does not parse as an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    pub status: String,
    pub code: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by `NewsApiClient`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An argument was supplied with the wrong type.
    #[error("{param} param should be of type {expected}, got {found}")]
    TypeMismatch {
        param: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Right type, but not a member of the parameter's enumerated domain.
    #[error("invalid {param}: {value:?}")]
    InvalidParameterValue { param: &'static str, value: String },

    /// Two parameters that the API refuses to combine were both supplied.
    #[error("incompatible parameters: {message}")]
    IncompatibleParameters { message: String },

    /// A numeric argument fell outside its allowed bounds.
    #[error("{param} param out of range ({expected}), got {value}")]
    OutOfRange {
        param: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A date string that is neither `YYYY-MM-DD` nor `YYYY-MM-DDTHH:MM:SS`.
    #[error("{param} should be in format of either YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got {value:?}")]
    MalformedDate { param: &'static str, value: String },

    /// The API answered with an error envelope.
    #[error("News API error {}: {}", .0.code, .0.message)]
    Upstream(ErrorEnvelope),

    /// A non-200 response whose body is not an error envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A 200 response whose body is not JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),
}

impl ApiError {
    /// The parsed error envelope, if this is an upstream error.
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            ApiError::Upstream(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// True for errors raised before any network call was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ApiError::TypeMismatch { .. }
                | ApiError::InvalidParameterValue { .. }
                | ApiError::IncompatibleParameters { .. }
                | ApiError::OutOfRange { .. }
                | ApiError::MalformedDate { .. }
        )
    }
}
