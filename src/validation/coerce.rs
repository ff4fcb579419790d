//! Type resolution for primitive fields: exact-match detection, the legal
//! coercion conversions, and ISO-8601 timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::types::PrimitiveType;

/// How a raw value relates to a field's declared primitive type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolution {
    /// The observed type already matches; use the value unchanged.
    Exact,
    /// A legal source type was converted; carries the replacement value.
    Coerced(Value),
    /// Neither an exact match nor a legal coercion source.
    Mismatch,
    /// A legal source type, but the conversion itself failed.
    Failed { reason: String },
}

/// Classifies a JSON scalar into the primitive type it carries, if any.
///
/// JSON has no timestamp scalar, so `Timestamp` never classifies;
/// timestamp fields accept values only through the `String` coercion
/// source.
pub(crate) fn classify(value: &Value) -> Option<PrimitiveType> {
    match value {
        Value::String(_) => Some(PrimitiveType::String),
        Value::Bool(_) => Some(PrimitiveType::Boolean),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(PrimitiveType::Integer),
        Value::Number(_) => Some(PrimitiveType::Float),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// JSON type name for report messages.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolves a raw value against a declared primitive type.
///
/// An exact type match is accepted unchanged. Otherwise, when the field
/// enables coercion and the observed type is a registered source for the
/// declared type, the value is converted; anything else is a mismatch.
pub(crate) fn resolve(
    declared: PrimitiveType,
    tz_aware: bool,
    coerce: bool,
    value: &Value,
) -> Resolution {
    let Some(observed) = classify(value) else {
        return Resolution::Mismatch;
    };
    if observed == declared {
        return Resolution::Exact;
    }
    if coerce && declared.accepts_coercion_from(observed) {
        return convert(declared, tz_aware, value);
    }
    Resolution::Mismatch
}

fn convert(declared: PrimitiveType, tz_aware: bool, value: &Value) -> Resolution {
    match declared {
        PrimitiveType::String => match value {
            Value::Number(n) => Resolution::Coerced(Value::String(n.to_string())),
            _ => Resolution::Mismatch,
        },
        PrimitiveType::Integer => match value {
            Value::String(s) => match s.parse::<i64>() {
                Ok(n) => Resolution::Coerced(Value::from(n)),
                Err(_) => Resolution::Failed {
                    reason: format!("'{s}' is not a decimal integer"),
                },
            },
            Value::Number(n) => {
                let Some(f) = n.as_f64() else {
                    return Resolution::Mismatch;
                };
                if f.fract() != 0.0 {
                    Resolution::Failed {
                        reason: format!("{f} has a fractional part and cannot become an integer"),
                    }
                // `i64::MAX as f64` rounds up to 2^63, one past i64 range,
                // so the upper bound is exclusive; `i64::MIN as f64` is
                // exact and stays inclusive.
                } else if f < i64::MIN as f64 || f >= i64::MAX as f64 {
                    Resolution::Failed {
                        reason: format!("{f} is out of integer range"),
                    }
                } else {
                    Resolution::Coerced(Value::from(f as i64))
                }
            }
            _ => Resolution::Mismatch,
        },
        PrimitiveType::Float => match value {
            Value::Number(n) => match n.as_f64() {
                Some(f) => Resolution::Coerced(Value::from(f)),
                None => Resolution::Mismatch,
            },
            Value::String(s) => match s.parse::<f64>() {
                Ok(f) if f.is_finite() => Resolution::Coerced(Value::from(f)),
                _ => Resolution::Failed {
                    reason: format!("'{s}' is not a decimal number"),
                },
            },
            _ => Resolution::Mismatch,
        },
        PrimitiveType::Boolean => match value {
            Value::String(s) => match s.as_str() {
                "true" => Resolution::Coerced(Value::Bool(true)),
                "false" => Resolution::Coerced(Value::Bool(false)),
                _ => Resolution::Failed {
                    reason: format!("'{s}' is neither 'true' nor 'false'"),
                },
            },
            _ => Resolution::Mismatch,
        },
        // The validated string is kept as written; JSON has no richer
        // representation to normalize into.
        PrimitiveType::Timestamp => match value {
            Value::String(s) => match parse_timestamp(s, tz_aware) {
                Ok(()) => Resolution::Coerced(value.clone()),
                Err(reason) => Resolution::Failed { reason },
            },
            _ => Resolution::Mismatch,
        },
    }
}

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parses_naive(s: &str) -> bool {
    NAIVE_DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(s, format).is_ok())
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Accepts a timestamp string matching the field's awareness: aware fields
/// require an RFC 3339 offset, naive fields forbid one. A string that
/// parses only under the opposite awareness is reported as a timezone
/// mismatch rather than a generic parse failure.
fn parse_timestamp(s: &str, tz_aware: bool) -> std::result::Result<(), String> {
    if tz_aware {
        if DateTime::parse_from_rfc3339(s).is_ok() {
            return Ok(());
        }
        if parses_naive(s) {
            return Err(format!(
                "'{s}' has no timezone offset but the field is timezone-aware"
            ));
        }
        Err(format!("'{s}' is not an ISO-8601 timestamp"))
    } else {
        if parses_naive(s) {
            return Ok(());
        }
        if DateTime::parse_from_rfc3339(s).is_ok() {
            return Err(format!(
                "'{s}' carries a timezone offset but the field is naive"
            ));
        }
        Err(format!("'{s}' is not an ISO-8601 timestamp"))
    }
}
