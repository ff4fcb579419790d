use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::field::PrimitiveType;
use crate::{Result, SchemaError};

/// A single, self-contained predicate over one primitive value.
///
/// Constraints are immutable and side-effect free: evaluating one never
/// fails, it only answers whether the value passes. Invalid parameters
/// (inverted bounds, an uncompilable pattern, an empty allowed set) are
/// rejected eagerly by the constructors and again by
/// [`SchemaNode::validate`](super::SchemaNode::validate), so a constraint
/// that exists is always evaluable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// Numeric bound check; `inclusive` selects `<=`/`>=` over `<`/`>`.
    Range {
        min: f64,
        max: f64,
        #[serde(default = "default_inclusive")]
        inclusive: bool,
    },
    /// Regular-expression match. The pattern is compiled at construction,
    /// including the deserialization path, and matches unanchored unless
    /// the pattern itself anchors with `^...$`.
    Regex {
        #[serde(with = "regex_serde")]
        pattern: Regex,
    },
    /// String length bounds, inclusive, measured in characters not bytes.
    Length { min: usize, max: usize },
    /// Case-sensitive membership in a fixed set of allowed strings.
    OneOf { allowed: BTreeSet<String> },
}

fn default_inclusive() -> bool {
    true
}

impl Constraint {
    /// Inclusive numeric range `[min, max]`.
    pub fn range(min: f64, max: f64) -> Result<Self> {
        let constraint = Constraint::Range {
            min,
            max,
            inclusive: true,
        };
        constraint.validate()?;
        Ok(constraint)
    }

    /// Exclusive numeric range `(min, max)`.
    pub fn range_exclusive(min: f64, max: f64) -> Result<Self> {
        let constraint = Constraint::Range {
            min,
            max,
            inclusive: false,
        };
        constraint.validate()?;
        Ok(constraint)
    }

    /// Pattern constraint; fails if `pattern` does not compile.
    pub fn regex(pattern: &str) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|e| SchemaError::Constraint {
            message: format!("invalid pattern '{pattern}': {e}"),
        })?;
        Ok(Constraint::Regex { pattern: compiled })
    }

    /// Inclusive character-length bounds.
    pub fn length(min: usize, max: usize) -> Result<Self> {
        let constraint = Constraint::Length { min, max };
        constraint.validate()?;
        Ok(constraint)
    }

    /// Allowed-value set; fails on an empty set.
    pub fn one_of<I, S>(allowed: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let constraint = Constraint::OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
        };
        constraint.validate()?;
        Ok(constraint)
    }

    /// Checks the kind's own parameter invariants.
    ///
    /// The constructors call this eagerly; schema validation calls it
    /// again because serde deserialization bypasses the constructors.
    pub fn validate(&self) -> Result<()> {
        match self {
            Constraint::Range { min, max, .. } => {
                if !(min <= max) {
                    return Err(SchemaError::Constraint {
                        message: format!("range bounds are inverted: min {min} > max {max}"),
                    });
                }
            }
            Constraint::Regex { .. } => {}
            Constraint::Length { min, max } => {
                if min > max {
                    return Err(SchemaError::Constraint {
                        message: format!("length bounds are inverted: min {min} > max {max}"),
                    });
                }
            }
            Constraint::OneOf { allowed } => {
                if allowed.is_empty() {
                    return Err(SchemaError::Constraint {
                        message: "allowed-value set cannot be empty".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Evaluates the predicate against a raw JSON value.
    ///
    /// Total and pure: a value of an unexpected shape simply fails the
    /// check rather than raising.
    pub fn is_satisfied_by(&self, value: &serde_json::Value) -> bool {
        match self {
            Constraint::Range {
                min,
                max,
                inclusive,
            } => match value.as_f64() {
                Some(n) if *inclusive => *min <= n && n <= *max,
                Some(n) => *min < n && n < *max,
                None => false,
            },
            Constraint::Regex { pattern } => value.as_str().is_some_and(|s| pattern.is_match(s)),
            Constraint::Length { min, max } => value.as_str().is_some_and(|s| {
                let chars = s.chars().count();
                *min <= chars && chars <= *max
            }),
            Constraint::OneOf { allowed } => value.as_str().is_some_and(|s| allowed.contains(s)),
        }
    }

    /// The fixed failure description carried verbatim by
    /// `constraint-violation` report entries.
    pub fn description(&self) -> String {
        match self {
            Constraint::Range {
                min,
                max,
                inclusive: true,
            } => format!("value must be within [{min}, {max}]"),
            Constraint::Range {
                min,
                max,
                inclusive: false,
            } => format!("value must be within ({min}, {max})"),
            Constraint::Regex { pattern } => {
                format!("value must match pattern '{}'", pattern.as_str())
            }
            Constraint::Length { min, max } => {
                format!("length must be between {min} and {max} characters")
            }
            Constraint::OneOf { allowed } => {
                let values: Vec<&str> = allowed.iter().map(String::as_str).collect();
                format!("value must be one of [{}]", values.join(", "))
            }
        }
    }

    /// Construction-time compatibility between a constraint kind and the
    /// primitive type of the field carrying it: ranges fit numeric fields,
    /// the string kinds fit string fields, nothing else.
    pub fn check_applicable(&self, field_type: PrimitiveType) -> Result<()> {
        let applicable = match self {
            Constraint::Range { .. } => {
                matches!(field_type, PrimitiveType::Integer | PrimitiveType::Float)
            }
            Constraint::Regex { .. } | Constraint::Length { .. } | Constraint::OneOf { .. } => {
                field_type == PrimitiveType::String
            }
        };
        if applicable {
            Ok(())
        } else {
            Err(SchemaError::Schema {
                message: format!(
                    "{} constraint does not apply to {field_type} fields",
                    self.kind_name()
                ),
            })
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Constraint::Range { .. } => "range",
            Constraint::Regex { .. } => "regex",
            Constraint::Length { .. } => "length",
            Constraint::OneOf { .. } => "one_of",
        }
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Constraint::Range {
                    min: a_min,
                    max: a_max,
                    inclusive: a_inclusive,
                },
                Constraint::Range {
                    min: b_min,
                    max: b_max,
                    inclusive: b_inclusive,
                },
            ) => a_min == b_min && a_max == b_max && a_inclusive == b_inclusive,
            // Compiled programs are opaque; patterns compare by text.
            (Constraint::Regex { pattern: a }, Constraint::Regex { pattern: b }) => {
                a.as_str() == b.as_str()
            }
            (
                Constraint::Length {
                    min: a_min,
                    max: a_max,
                },
                Constraint::Length {
                    min: b_min,
                    max: b_max,
                },
            ) => a_min == b_min && a_max == b_max,
            (Constraint::OneOf { allowed: a }, Constraint::OneOf { allowed: b }) => a == b,
            _ => false,
        }
    }
}

mod regex_serde {
    use regex::Regex;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(pattern: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(pattern.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Regex, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Regex::new(&pattern).map_err(|e| D::Error::custom(format!("invalid pattern '{pattern}': {e}")))
    }
}

/// Shared constraint values for field formats that recur across record
/// shapes. Compiled once, copied by value into the specs that use them.
pub mod well_known {
    use once_cell::sync::Lazy;

    use super::Constraint;

    /// Loose e-mail shape: something before and after a single `@`, with
    /// a dot somewhere in the domain part.
    pub static EMAIL: Lazy<Constraint> = Lazy::new(|| {
        Constraint::regex(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("e-mail pattern compiles")
    });

    /// Hyphenated lowercase UUID.
    pub static UUID: Lazy<Constraint> = Lazy::new(|| {
        Constraint::regex(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("uuid pattern compiles")
    });

    /// 32 lowercase hex digits.
    pub static MD5_HEX: Lazy<Constraint> =
        Lazy::new(|| Constraint::regex(r"^[0-9a-f]{32}$").expect("md5 pattern compiles"));

    /// 40 lowercase hex digits.
    pub static SHA1_HEX: Lazy<Constraint> =
        Lazy::new(|| Constraint::regex(r"^[0-9a-f]{40}$").expect("sha1 pattern compiles"));

    /// 64 lowercase hex digits.
    pub static SHA256_HEX: Lazy<Constraint> =
        Lazy::new(|| Constraint::regex(r"^[0-9a-f]{64}$").expect("sha256 pattern compiles"));
}
