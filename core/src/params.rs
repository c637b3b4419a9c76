//! Per-endpoint argument builders.
//!
//! # Design
//! Each builder records which arguments the caller supplied and nothing else.
//! `validate` then walks the parameters in a fixed order, and for each one
//! present checks its type, checks its domain or bounds, and finally inserts it
//! under the API's external name. The first failure aborts the walk, so a
//! returned `QueryParams` only ever holds validated values and arguments that
//! were never supplied never show up as keys.

use crate::dates::stringify_date;
use crate::domains::Domain;
use crate::error::ApiError;
use crate::types::{ParamValue, QueryParams};

const PAGE_SIZE_MAX: i64 = 100;

fn expect_str<'a>(param: &'static str, value: &'a ParamValue) -> Result<&'a str, ApiError> {
    match value {
        ParamValue::Str(s) => Ok(s),
        other => Err(ApiError::TypeMismatch {
            param,
            expected: "str",
            found: other.type_name(),
        }),
    }
}

fn expect_int(param: &'static str, value: &ParamValue) -> Result<i64, ApiError> {
    match value {
        ParamValue::Int(n) => Ok(*n),
        other => Err(ApiError::TypeMismatch {
            param,
            expected: "int",
            found: other.type_name(),
        }),
    }
}

fn put_str(
    out: &mut QueryParams,
    param: &'static str,
    key: &'static str,
    value: Option<&ParamValue>,
) -> Result<(), ApiError> {
    if let Some(value) = value {
        let s = expect_str(param, value)?;
        out.insert(key, s);
    }
    Ok(())
}

fn put_enum(
    out: &mut QueryParams,
    param: &'static str,
    key: &'static str,
    domain: Domain,
    value: Option<&ParamValue>,
) -> Result<(), ApiError> {
    if let Some(value) = value {
        let s = expect_str(param, value)?;
        domain.validate(param, s)?;
        out.insert(key, s);
    }
    Ok(())
}

fn put_date(
    out: &mut QueryParams,
    param: &'static str,
    key: &'static str,
    value: Option<&ParamValue>,
) -> Result<(), ApiError> {
    if let Some(value) = value {
        out.insert(key, stringify_date(param, value)?);
    }
    Ok(())
}

fn put_page_size(out: &mut QueryParams, value: Option<&ParamValue>) -> Result<(), ApiError> {
    if let Some(value) = value {
        let n = expect_int("page_size", value)?;
        if !(0..=PAGE_SIZE_MAX).contains(&n) {
            return Err(ApiError::OutOfRange {
                param: "page_size",
                value: n.to_string(),
                expected: "0..=100",
            });
        }
        out.insert("pageSize", n);
    }
    Ok(())
}

fn put_page(out: &mut QueryParams, value: Option<&ParamValue>) -> Result<(), ApiError> {
    if let Some(value) = value {
        let n = expect_int("page", value)?;
        if n <= 0 {
            return Err(ApiError::OutOfRange {
                param: "page",
                value: n.to_string(),
                expected: "> 0",
            });
        }
        out.insert("page", n);
    }
    Ok(())
}

/// Arguments for `/v2/top-headlines`.
///
/// Setters accept anything convertible to `ParamValue` and never fail; every
/// check runs in `validate`, which `NewsApiClient::build_top_headlines` calls.
/// `language` starts out as `"en"`; call `without_language` to leave it out.
/// `sources` cannot be combined with `country` or `category`.
#[derive(Debug, Clone, PartialEq)]
pub struct TopHeadlines {
    q: Option<ParamValue>,
    qintitle: Option<ParamValue>,
    sources: Option<ParamValue>,
    language: Option<ParamValue>,
    country: Option<ParamValue>,
    category: Option<ParamValue>,
    page_size: Option<ParamValue>,
    page: Option<ParamValue>,
}

impl Default for TopHeadlines {
    fn default() -> Self {
        Self {
            q: None,
            qintitle: None,
            sources: None,
            language: Some(ParamValue::from("en")),
            country: None,
            category: None,
            page_size: None,
            page: None,
        }
    }
}

impl TopHeadlines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn q(mut self, value: impl Into<ParamValue>) -> Self {
        self.q = Some(value.into());
        self
    }

    pub fn qintitle(mut self, value: impl Into<ParamValue>) -> Self {
        self.qintitle = Some(value.into());
        self
    }

    pub fn sources(mut self, value: impl Into<ParamValue>) -> Self {
        self.sources = Some(value.into());
        self
    }

    pub fn language(mut self, value: impl Into<ParamValue>) -> Self {
        self.language = Some(value.into());
        self
    }

    pub fn without_language(mut self) -> Self {
        self.language = None;
        self
    }

    pub fn country(mut self, value: impl Into<ParamValue>) -> Self {
        self.country = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<ParamValue>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn page_size(mut self, value: impl Into<ParamValue>) -> Self {
        self.page_size = Some(value.into());
        self
    }

    pub fn page(mut self, value: impl Into<ParamValue>) -> Self {
        self.page = Some(value.into());
        self
    }

    pub fn validate(&self) -> Result<QueryParams, ApiError> {
        let mut out = QueryParams::new();
        put_str(&mut out, "q", "q", self.q.as_ref())?;
        put_str(&mut out, "qintitle", "qintitle", self.qintitle.as_ref())?;

        // The API itself rejects this combination.
        if self.sources.is_some() && (self.country.is_some() || self.category.is_some()) {
            return Err(ApiError::IncompatibleParameters {
                message: "cannot mix country/category param with sources param".to_string(),
            });
        }

        put_str(&mut out, "sources", "sources", self.sources.as_ref())?;
        put_enum(&mut out, "language", "language", Domain::Language, self.language.as_ref())?;
        put_enum(&mut out, "country", "country", Domain::Country, self.country.as_ref())?;
        put_enum(&mut out, "category", "category", Domain::Category, self.category.as_ref())?;
        put_page_size(&mut out, self.page_size.as_ref())?;
        put_page(&mut out, self.page.as_ref())?;
        Ok(out)
    }
}

/// Arguments for `/v2/everything`.
///
/// Nothing is sent unless set. `from` and `to` accept a `YYYY-MM-DD` or
/// `YYYY-MM-DDTHH:MM:SS` string, a chrono date or date-time, or a Unix
/// timestamp. Unlike top-headlines, `sources` may be combined with anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Everything {
    q: Option<ParamValue>,
    qintitle: Option<ParamValue>,
    sources: Option<ParamValue>,
    domains: Option<ParamValue>,
    exclude_domains: Option<ParamValue>,
    from: Option<ParamValue>,
    to: Option<ParamValue>,
    language: Option<ParamValue>,
    sort_by: Option<ParamValue>,
    page: Option<ParamValue>,
    page_size: Option<ParamValue>,
}

impl Everything {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn q(mut self, value: impl Into<ParamValue>) -> Self {
        self.q = Some(value.into());
        self
    }

    pub fn qintitle(mut self, value: impl Into<ParamValue>) -> Self {
        self.qintitle = Some(value.into());
        self
    }

    pub fn sources(mut self, value: impl Into<ParamValue>) -> Self {
        self.sources = Some(value.into());
        self
    }

    pub fn domains(mut self, value: impl Into<ParamValue>) -> Self {
        self.domains = Some(value.into());
        self
    }

    pub fn exclude_domains(mut self, value: impl Into<ParamValue>) -> Self {
        self.exclude_domains = Some(value.into());
        self
    }

    pub fn from(mut self, value: impl Into<ParamValue>) -> Self {
        self.from = Some(value.into());
        self
    }

    pub fn to(mut self, value: impl Into<ParamValue>) -> Self {
        self.to = Some(value.into());
        self
    }

    pub fn language(mut self, value: impl Into<ParamValue>) -> Self {
        self.language = Some(value.into());
        self
    }

    pub fn sort_by(mut self, value: impl Into<ParamValue>) -> Self {
        self.sort_by = Some(value.into());
        self
    }

    pub fn page(mut self, value: impl Into<ParamValue>) -> Self {
        self.page = Some(value.into());
        self
    }

    pub fn page_size(mut self, value: impl Into<ParamValue>) -> Self {
        self.page_size = Some(value.into());
        self
    }

    pub fn validate(&self) -> Result<QueryParams, ApiError> {
        let mut out = QueryParams::new();
        put_str(&mut out, "q", "q", self.q.as_ref())?;
        put_str(&mut out, "qintitle", "qintitle", self.qintitle.as_ref())?;
        put_str(&mut out, "sources", "sources", self.sources.as_ref())?;
        put_str(&mut out, "domains", "domains", self.domains.as_ref())?;
        put_str(&mut out, "exclude_domains", "excludeDomains", self.exclude_domains.as_ref())?;
        put_date(&mut out, "from_param", "from", self.from.as_ref())?;
        put_date(&mut out, "to", "to", self.to.as_ref())?;
        put_enum(&mut out, "language", "language", Domain::Language, self.language.as_ref())?;
        put_enum(&mut out, "sort_by", "sortBy", Domain::SortBy, self.sort_by.as_ref())?;
        put_page_size(&mut out, self.page_size.as_ref())?;
        put_page(&mut out, self.page.as_ref())?;
        Ok(out)
    }
}

/// Arguments for `/v2/sources`.
///
/// Each filter is optional and checked against its fixed domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sources {
    category: Option<ParamValue>,
    language: Option<ParamValue>,
    country: Option<ParamValue>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, value: impl Into<ParamValue>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn language(mut self, value: impl Into<ParamValue>) -> Self {
        self.language = Some(value.into());
        self
    }

    pub fn country(mut self, value: impl Into<ParamValue>) -> Self {
        self.country = Some(value.into());
        self
    }

    pub fn validate(&self) -> Result<QueryParams, ApiError> {
        let mut out = QueryParams::new();
        put_enum(&mut out, "language", "language", Domain::Language, self.language.as_ref())?;
        put_enum(&mut out, "country", "country", Domain::Country, self.country.as_ref())?;
        put_enum(&mut out, "category", "category", Domain::Category, self.category.as_ref())?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domains::{CATEGORIES, COUNTRIES, LANGUAGES, SORT_METHODS};
    use crate::types::QueryValue;

    fn str_value(s: &str) -> QueryValue {
        QueryValue::Str(s.to_string())
    }

    // --- top-headlines ---

    #[test]
    fn top_headlines_defaults_to_english() {
        let params = TopHeadlines::new().validate().unwrap();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["language"]);
        assert_eq!(params.get("language"), Some(&str_value("en")));

        let params = TopHeadlines::new().without_language().validate().unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn top_headlines_full_argument_set() {
        let params = TopHeadlines::new()
            .q("bitcoin")
            .qintitle("crypto")
            .language("de")
            .country("de")
            .category("business")
            .page_size(20)
            .page(2)
            .validate()
            .unwrap();
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["q", "qintitle", "language", "country", "category", "pageSize", "page"]
        );
        assert_eq!(params.get("pageSize"), Some(&QueryValue::Int(20)));
        assert_eq!(params.get("page"), Some(&QueryValue::Int(2)));
    }

    #[test]
    fn top_headlines_rejects_sources_with_country_or_category() {
        let err = TopHeadlines::new().sources("techcrunch").country("us").validate().unwrap_err();
        assert!(matches!(err, ApiError::IncompatibleParameters { .. }));

        let err = TopHeadlines::new()
            .sources("techcrunch")
            .category("technology")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::IncompatibleParameters { .. }));
    }

    #[test]
    fn incompatibility_is_reported_before_field_checks() {
        // Both fields are also individually invalid.
        let err = TopHeadlines::new().sources(1).country("xx").validate().unwrap_err();
        assert!(matches!(err, ApiError::IncompatibleParameters { .. }));
    }

    #[test]
    fn top_headlines_sources_alone_is_fine() {
        let params = TopHeadlines::new().sources("techcrunch,wired").validate().unwrap();
        assert_eq!(params.get("sources"), Some(&str_value("techcrunch,wired")));
    }

    #[test]
    fn top_headlines_page_size_bounds_are_inclusive() {
        for ok in [0, 100] {
            let params = TopHeadlines::new().page_size(ok).validate().unwrap();
            assert_eq!(params.get("pageSize"), Some(&QueryValue::Int(i64::from(ok))));
        }
        for bad in [-1, 101, 1000] {
            let err = TopHeadlines::new().page_size(bad).validate().unwrap_err();
            assert!(matches!(err, ApiError::OutOfRange { param: "page_size", .. }), "{bad}");
        }
    }

    #[test]
    fn page_must_be_positive() {
        assert!(TopHeadlines::new().page(1).validate().is_ok());
        for bad in [0, -5] {
            let err = TopHeadlines::new().page(bad).validate().unwrap_err();
            assert!(matches!(err, ApiError::OutOfRange { param: "page", .. }));
        }
    }

    #[test]
    fn numeric_params_require_integers() {
        let err = TopHeadlines::new().page_size("20").validate().unwrap_err();
        assert!(matches!(
            err,
            ApiError::TypeMismatch { param: "page_size", expected: "int", found: "str" }
        ));
        let err = TopHeadlines::new().page(1.0).validate().unwrap_err();
        assert!(matches!(err, ApiError::TypeMismatch { param: "page", found: "float", .. }));
        let err = Everything::new().page_size(true).validate().unwrap_err();
        assert!(matches!(err, ApiError::TypeMismatch { param: "page_size", found: "bool", .. }));
    }

    #[test]
    fn string_params_require_strings() {
        let cases: Vec<(&str, TopHeadlines)> = vec![
            ("q", TopHeadlines::new().q(1)),
            ("qintitle", TopHeadlines::new().qintitle(1)),
            ("sources", TopHeadlines::new().sources(1)),
            ("language", TopHeadlines::new().language(1)),
            ("country", TopHeadlines::new().country(1)),
            ("category", TopHeadlines::new().category(1)),
        ];
        for (name, args) in cases {
            let err = args.validate().unwrap_err();
            assert!(
                matches!(err, ApiError::TypeMismatch { param, expected: "str", .. } if param == name),
                "{name}: {err:?}"
            );
        }
    }

    #[test]
    fn enum_params_reject_unknown_values() {
        let err = TopHeadlines::new().language("xx").validate().unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue { param: "language", .. }));
        let err = TopHeadlines::new().country("XX").validate().unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue { param: "country", .. }));
        let err = TopHeadlines::new().category("weather").validate().unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue { param: "category", .. }));
    }

    #[test]
    fn enum_inputs_are_not_lowercased() {
        let err = Sources::new().country("US").validate().unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue { param: "country", ref value } if value == "US"));
    }

    #[test]
    fn every_domain_member_is_accepted() {
        for lang in LANGUAGES {
            assert!(Everything::new().language(*lang).validate().is_ok());
        }
        for country in COUNTRIES {
            assert!(Sources::new().country(*country).validate().is_ok());
        }
        for category in CATEGORIES {
            assert!(TopHeadlines::new().category(*category).validate().is_ok());
        }
        for sort in SORT_METHODS {
            assert!(Everything::new().sort_by(*sort).validate().is_ok());
        }
    }

    // --- everything ---

    #[test]
    fn everything_uses_external_key_names() {
        let params = Everything::new()
            .q("rust")
            .sources("bbc-news")
            .domains("bbc.co.uk,techcrunch.com")
            .exclude_domains("engadget.com")
            .from("2019-09-01")
            .to(NaiveDate::from_ymd_opt(2019, 9, 7).unwrap())
            .language("en")
            .sort_by("publishedAt")
            .page(3)
            .page_size(50)
            .validate()
            .unwrap();
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec![
                "q",
                "sources",
                "domains",
                "excludeDomains",
                "from",
                "to",
                "language",
                "sortBy",
                "pageSize",
                "page"
            ]
        );
        assert_eq!(params.get("excludeDomains"), Some(&str_value("engadget.com")));
        assert_eq!(params.get("to"), Some(&str_value("2019-09-07")));
        assert!(!params.contains_key("exclude_domains"));
        assert!(!params.contains_key("from_param"));
    }

    #[test]
    fn everything_normalizes_timestamps() {
        let params = Everything::new().from(1567786668_i64).validate().unwrap();
        assert_eq!(params.get("from"), Some(&str_value("2019-09-06T16:17:48")));
    }

    #[test]
    fn everything_rejects_dates_past_year_9999() {
        let err = Everything::new().q("x").from(253402300800_i64).validate().unwrap_err();
        assert!(matches!(err, ApiError::OutOfRange { param: "from_param", .. }));
        let err = Everything::new()
            .q("x")
            .to(NaiveDate::from_ymd_opt(12345, 1, 1).unwrap())
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::OutOfRange { param: "to", .. }));
    }

    #[test]
    fn everything_rejects_malformed_dates() {
        let err = Everything::new().from("2019/01/01").validate().unwrap_err();
        assert!(matches!(err, ApiError::MalformedDate { param: "from_param", .. }));
        let err = Everything::new().to("20190101").validate().unwrap_err();
        assert!(matches!(err, ApiError::MalformedDate { param: "to", .. }));
    }

    #[test]
    fn everything_allows_sources_with_anything() {
        let params = Everything::new().sources("techcrunch").language("en").validate().unwrap();
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn everything_without_arguments_is_empty() {
        assert!(Everything::new().validate().unwrap().is_empty());
    }

    #[test]
    fn everything_rejects_invalid_sort() {
        let err = Everything::new().sort_by("newest").validate().unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameterValue { param: "sort_by", .. }));
        let err = Everything::new().exclude_domains(7).validate().unwrap_err();
        assert!(matches!(err, ApiError::TypeMismatch { param: "exclude_domains", .. }));
    }

    // --- sources ---

    #[test]
    fn sources_validates_each_domain() {
        let params = Sources::new()
            .category("science")
            .language("fr")
            .country("fr")
            .validate()
            .unwrap();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["language", "country", "category"]);

        assert!(Sources::new().validate().unwrap().is_empty());
        let err = Sources::new().category(3).validate().unwrap_err();
        assert!(matches!(err, ApiError::TypeMismatch { param: "category", .. }));
    }
}
