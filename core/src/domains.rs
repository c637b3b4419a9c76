//! Fixed endpoint locations and the closed value sets the API accepts.
//!
//! Membership checks are case-sensitive: `"US"` is not a country.

use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";
pub const EVERYTHING_PATH: &str = "/v2/everything";
pub const SOURCES_PATH: &str = "/v2/sources";

/// 2-letter ISO-639-1 language codes.
pub const LANGUAGES: &[&str] = &[
    "ar", "en", "cn", "de", "es", "fr", "he", "it", "nl", "no", "pt", "ru", "sv", "se", "ud", "zh",
];

/// 2-letter ISO-3166-1 country codes.
pub const COUNTRIES: &[&str] = &[
    "ae", "ar", "at", "au", "be", "bg", "br", "ca", "ch", "cn", "co", "cu", "cz", "de", "eg", "es",
    "fr", "gb", "gr", "hk", "hu", "id", "ie", "il", "in", "is", "it", "jp", "kr", "lt", "lv", "ma",
    "mx", "my", "ng", "nl", "no", "nz", "ph", "pk", "pl", "pt", "ro", "rs", "ru", "sa", "se", "sg",
    "si", "sk", "th", "tr", "tw", "ua", "us", "ve", "za", "zh",
];

pub const CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

pub const SORT_METHODS: &[&str] = &["relevancy", "popularity", "publishedAt"];

/// One of the enumerated parameter domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Language,
    Country,
    Category,
    SortBy,
}

impl Domain {
    pub fn values(self) -> &'static [&'static str] {
        match self {
            Domain::Language => LANGUAGES,
            Domain::Country => COUNTRIES,
            Domain::Category => CATEGORIES,
            Domain::SortBy => SORT_METHODS,
        }
    }

    pub fn contains(self, value: &str) -> bool {
        self.values().contains(&value)
    }

    /// Accept `value` if it is a member of this domain.
    pub fn validate(self, param: &'static str, value: &str) -> Result<(), ApiError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(ApiError::InvalidParameterValue {
                param,
                value: value.to_string(),
            })
        }
    }
}
