//! API-key authentication headers.

use std::fmt;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE_VALUE: &str = "Application/JSON";

/// A News API key. `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Headers sent with every request.
pub fn auth_headers(api_key: &ApiKey) -> Vec<(String, String)> {
    vec![
        (CONTENT_TYPE.to_string(), CONTENT_TYPE_VALUE.to_string()),
        (AUTHORIZATION.to_string(), api_key.as_str().to_string()),
    ]
}

/// Replace any existing content-type and authorization headers with the
/// authenticated pair, keeping all other headers in place.
pub fn attach_auth(mut headers: Vec<(String, String)>, api_key: &ApiKey) -> Vec<(String, String)> {
    headers.retain(|(name, _)| {
        !name.eq_ignore_ascii_case(CONTENT_TYPE) && !name.eq_ignore_ascii_case(AUTHORIZATION)
    });
    headers.extend(auth_headers(api_key));
    headers
}
