//! Argument and query-map value types.
//!
//! # Design
//! Endpoint arguments behave like keyword arguments: each one is optional and
//! may arrive with any of the types in `ParamValue`. The builders in
//! `params` check the type per parameter, so a string passed where an integer
//! belongs is reported as `ApiError::TypeMismatch` instead of being coerced.
//! Validated values land in a `QueryParams` map keyed by the API's external
//! parameter names.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A single caller-supplied argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl ParamValue {
    /// Short type name used in `TypeMismatch` messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Str(_) => "str",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Bool(_) => "bool",
            ParamValue::Date(_) => "date",
            ParamValue::DateTime(_) => "datetime",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u8> for ParamValue {
    fn from(value: u8) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(f64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        ParamValue::Date(value)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(value: NaiveDateTime) -> Self {
        ParamValue::DateTime(value)
    }
}

/// Uses the UTC wall clock of `value`.
impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::DateTime(value.naive_utc())
    }
}

/// A validated value in the outgoing query map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

/// Query parameters keyed by external name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(&'static str, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`.
    pub fn insert(&mut self, key: &'static str, value: impl Into<QueryValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Render every value as a string, ready for the query string.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(ParamValue::from("us"), ParamValue::Str("us".to_string()));
        assert_eq!(ParamValue::from(20), ParamValue::Int(20));
        assert_eq!(ParamValue::from(1.5), ParamValue::Float(1.5));
        assert_eq!(ParamValue::from(true).type_name(), "bool");

        let date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert_eq!(ParamValue::from(date).type_name(), "date");
        let dt = date.and_hms_opt(4, 5, 6).unwrap();
        assert_eq!(ParamValue::from(dt.and_utc()), ParamValue::DateTime(dt));
    }

    #[test]
    fn insert_preserves_order_and_replaces() {
        let mut params = QueryParams::new();
        params.insert("q", "bitcoin");
        params.insert("pageSize", 20_i64);
        params.insert("q", "ethereum");

        assert_eq!(params.len(), 2);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["q", "pageSize"]);
        assert_eq!(params.get("q"), Some(&QueryValue::Str("ethereum".to_string())));
        assert_eq!(
            params.to_pairs(),
            vec![
                ("q".to_string(), "ethereum".to_string()),
                ("pageSize".to_string(), "20".to_string()),
            ]
        );
    }
}
