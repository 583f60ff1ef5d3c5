//! Field coercion library.
//!
//! Every assignment to a record field goes through one of these casts, so a
//! stored value is always `None` or of the field's declared type. Raw input is
//! whatever the extraction stage produced, represented as a
//! [`serde_json::Value`].
//!
//! Under the default [`NullPolicy::Falsy`] any falsy input (`null`, `false`,
//! `0`, `0.0`, `""`, `[]`, `{}`) is stored as `None`. This matches the
//! database the wiki tooling has always produced, including the loss of real
//! zero values such as `max_hit: 0`. [`NullPolicy::Absent`] keeps those values
//! and only maps an explicit `null` to `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RecordError, RecordResult};
use crate::value::{FieldType, FieldValue, DATE_FORMAT};

/// Which raw inputs are stored as `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Anything falsy becomes `None`
    #[default]
    Falsy,
    /// Only an explicit `null` becomes `None`
    Absent,
}

impl NullPolicy {
    /// Whether `raw` is stored as `None` under this policy
    pub fn is_null(&self, raw: &Value) -> bool {
        match self {
            Self::Falsy => is_falsy(raw),
            Self::Absent => raw.is_null(),
        }
    }
}

impl std::fmt::Display for NullPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Falsy => write!(f, "falsy"),
            Self::Absent => write!(f, "absent"),
        }
    }
}

impl std::str::FromStr for NullPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "falsy" => Ok(Self::Falsy),
            "absent" => Ok(Self::Absent),
            _ => Err(format!("unknown null policy: {}", s)),
        }
    }
}

/// General truthiness: zero, empty text, empty containers, `false` and `null`
/// are falsy.
pub fn is_falsy(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Coerce `raw` into a value of type `ty` for the field named `field`
pub fn coerce(
    field: &str,
    ty: FieldType,
    raw: &Value,
    policy: NullPolicy,
) -> RecordResult<Option<FieldValue>> {
    let value = match ty {
        FieldType::String => cast_str(field, raw, policy)?.map(FieldValue::String),
        FieldType::Integer => cast_int(field, raw, policy)?.map(FieldValue::Integer),
        FieldType::Float => cast_float(field, raw, policy)?.map(FieldValue::Float),
        FieldType::Boolean => cast_bool(raw, policy).map(FieldValue::Boolean),
        FieldType::Date => cast_date(field, raw, policy)?.map(FieldValue::Date),
        FieldType::StringList => cast_list(field, raw, policy)?.map(FieldValue::StringList),
    };
    Ok(value)
}

pub fn cast_str(field: &str, raw: &Value, policy: NullPolicy) -> RecordResult<Option<String>> {
    if policy.is_null(raw) {
        return Ok(None);
    }
    scalar_text(raw)
        .map(Some)
        .ok_or_else(|| mismatch(field, FieldType::String, raw))
}

pub fn cast_int(field: &str, raw: &Value, policy: NullPolicy) -> RecordResult<Option<i64>> {
    if policy.is_null(raw) {
        return Ok(None);
    }
    let parsed = match raw {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| {
            if n.is_u64() {
                // Integral but wider than i64
                None
            } else {
                n.as_f64().and_then(truncate)
            }
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| mismatch(field, FieldType::Integer, raw))
}

pub fn cast_float(field: &str, raw: &Value, policy: NullPolicy) -> RecordResult<Option<f64>> {
    if policy.is_null(raw) {
        return Ok(None);
    }
    let parsed = match raw {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| mismatch(field, FieldType::Float, raw))
}

/// Boolean cast is plain truthiness and cannot fail.
pub fn cast_bool(raw: &Value, policy: NullPolicy) -> Option<bool> {
    if policy.is_null(raw) {
        return None;
    }
    Some(!is_falsy(raw))
}

pub fn cast_date(field: &str, raw: &Value, policy: NullPolicy) -> RecordResult<Option<NaiveDate>> {
    if policy.is_null(raw) {
        return Ok(None);
    }
    let text = raw
        .as_str()
        .ok_or_else(|| mismatch(field, FieldType::Date, raw))?;
    let format_error = || RecordError::Format {
        field: field.to_string(),
        value: text.to_string(),
    };
    // chrono also takes abbreviated months, 2-digit years and missing spaces
    if !has_date_shape(text) {
        return Err(format_error());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Some)
        .map_err(|_| format_error())
}

/// A lone string is accepted as a one-element list.
pub fn cast_list(field: &str, raw: &Value, policy: NullPolicy) -> RecordResult<Option<Vec<String>>> {
    if policy.is_null(raw) {
        return Ok(None);
    }
    match raw {
        Value::String(s) => Ok(Some(vec![s.clone()])),
        Value::Array(items) => items
            .iter()
            .map(|item| scalar_text(item).ok_or_else(|| mismatch(field, FieldType::StringList, raw)))
            .collect::<RecordResult<Vec<_>>>()
            .map(Some),
        _ => Err(mismatch(field, FieldType::StringList, raw)),
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Exactly `<1-2 digit day> <full month name> <4 digit year>`
fn has_date_shape(text: &str) -> bool {
    if text.trim() != text {
        return false;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    match text.split_whitespace().collect::<Vec<_>>().as_slice() {
        [day, month, year] => {
            (1..=2).contains(&day.len())
                && all_digits(*day)
                && MONTH_NAMES.iter().any(|m| m.eq_ignore_ascii_case(*month))
                && year.len() == 4
                && all_digits(*year)
        }
        _ => false,
    }
}

fn scalar_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn truncate(n: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; 2^63 is the first value out of range
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = n.trunc();
    (t.is_finite() && t >= -LIMIT && t < LIMIT).then(|| t as i64)
}

fn mismatch(field: &str, expected: FieldType, raw: &Value) -> RecordError {
    RecordError::TypeConversion {
        field: field.to_string(),
        expected: expected.name(),
        found: describe(raw),
    }
}

fn describe(raw: &Value) -> String {
    match raw {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "list".to_string(),
        Value::Object(_) => "dictionary".to_string(),
    }
}
