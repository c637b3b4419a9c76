//! Normalization of `from`/`to` arguments into the API's date strings.
//!
//! Output is always `YYYY-MM-DD` (dates) or `YYYY-MM-DDTHH:MM:SS`
//! (date-times and timestamps). Timestamps are read as UTC; date-time values
//! are formatted from their wall clock with no zone conversion.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike};

use crate::error::ApiError;
use crate::types::ParamValue;

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

const DATE_SHAPE: &[u8] = b"DDDD-DD-DD";
const DATETIME_SHAPE: &[u8] = b"DDDD-DD-DDTDD:DD:DD";

/// Years that `%Y` renders as exactly four digits with no sign.
const CANONICAL_YEARS: RangeInclusive<i32> = 1..=9999;
const YEAR_BOUNDS: &str = "a year between 1 and 9999";

/// Convert a date-like argument into its canonical string.
pub fn stringify_date(param: &'static str, value: &ParamValue) -> Result<String, ApiError> {
    match value {
        ParamValue::Str(s) => {
            if matches_shape(s, DATE_SHAPE) || matches_shape(s, DATETIME_SHAPE) {
                Ok(s.clone())
            } else {
                Err(ApiError::MalformedDate {
                    param,
                    value: s.clone(),
                })
            }
        }
        ParamValue::Date(d) => {
            check_year(param, d.year(), || d.to_string())?;
            Ok(d.format(DATE_FMT).to_string())
        }
        ParamValue::DateTime(dt) => {
            check_year(param, dt.year(), || dt.to_string())?;
            Ok(dt.format(DATETIME_FMT).to_string())
        }
        ParamValue::Int(secs) => from_timestamp(param, *secs, || secs.to_string()),
        ParamValue::Float(secs) => {
            let floored = secs.floor();
            if !floored.is_finite() || floored < i64::MIN as f64 || floored > i64::MAX as f64 {
                return Err(ApiError::OutOfRange {
                    param,
                    value: secs.to_string(),
                    expected: "a representable Unix timestamp",
                });
            }
            from_timestamp(param, floored as i64, || secs.to_string())
        }
        ParamValue::Bool(_) => Err(ApiError::TypeMismatch {
            param,
            expected: "str, date, datetime, int or float",
            found: value.type_name(),
        }),
    }
}

fn from_timestamp(
    param: &'static str,
    secs: i64,
    shown: impl FnOnce() -> String,
) -> Result<String, ApiError> {
    let Some(dt) = DateTime::from_timestamp(secs, 0) else {
        return Err(ApiError::OutOfRange {
            param,
            value: shown(),
            expected: "a representable Unix timestamp",
        });
    };
    check_year(param, dt.year(), shown)?;
    Ok(dt.format(DATETIME_FMT).to_string())
}

fn check_year(param: &'static str, year: i32, shown: impl FnOnce() -> String) -> Result<(), ApiError> {
    if CANONICAL_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(ApiError::OutOfRange {
            param,
            value: shown(),
            expected: YEAR_BOUNDS,
        })
    }
}

/// `D` in `shape` stands for an ASCII digit; every other byte must match exactly.
fn matches_shape(s: &str, shape: &[u8]) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape).all(|(c, &p)| match p {
            b'D' => c.is_ascii_digit(),
            _ => c == p,
        })
}
