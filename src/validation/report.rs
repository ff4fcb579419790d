use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// The validation-time data-error taxonomy.
///
/// These are values carried inside a [`ValidationReport`], never process
/// failures: one malformed record cannot abort a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum ErrorKind {
    MissingRequiredField,
    TypeMismatch,
    CoercionFailure,
    ConstraintViolation { description: String },
}

impl ErrorKind {
    /// Stable kebab-case code, also used as the serialized tag.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingRequiredField => "missing-required-field",
            ErrorKind::TypeMismatch => "type-mismatch",
            ErrorKind::CoercionFailure => "coercion-failure",
            ErrorKind::ConstraintViolation { .. } => "constraint-violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Ordered field-name segments locating a value inside a nested record,
/// relative to the record root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

/// Shown as the observed value when a required field is absent entirely.
pub const ABSENT: &str = "(absent)";

/// Renders a raw value the way report entries display it: scalars as
/// JSON, composites abbreviated.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Object(_) => "<object>".to_string(),
        Value::Array(_) => "<array>".to_string(),
        scalar => scalar.to_string(),
    }
}

/// One path-qualified validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub path: FieldPath,
    #[serde(flatten)]
    pub kind: ErrorKind,
    /// The offending raw value rendered for display.
    pub observed: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        path: FieldPath,
        kind: ErrorKind,
        observed: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            kind,
            observed: observed.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The outcome of one validation call: every error in discovery order.
///
/// An empty report is the sole "valid" state; there is no partial-valid
/// notion. Reports are plain values owned by the caller and never mutated
/// once returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
