//! The validation engine: a recursive, two-mode walk of a record against
//! a schema node, producing a path-keyed error report.

mod coerce;
pub mod report;

pub use report::{ABSENT, ErrorKind, FieldPath, ValidationError, ValidationReport, render_value};

use serde_json::{Map, Value};

use crate::types::{FieldSpec, FieldType, SchemaNode};
use coerce::{Resolution, resolve, value_type_name};

/// Traversal behavior when an error is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first error; the report holds at most one entry.
    /// For cheap accept/reject checks.
    FailFast,
    /// Keep walking past errors and report every violation in one pass.
    /// For diagnostics that must show everything wrong with a record.
    #[default]
    CollectAll,
}

/// Walks records against an immutable [`SchemaNode`].
///
/// Stateless between calls; one schema may serve any number of concurrent
/// validations without synchronization.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    mode: ValidationMode,
}

impl Validator {
    /// Collect-all validator.
    pub fn new() -> Self {
        Self {
            mode: ValidationMode::CollectAll,
        }
    }

    /// Fail-fast validator.
    pub fn fail_fast() -> Self {
        Self {
            mode: ValidationMode::FailFast,
        }
    }

    pub fn with_mode(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validates a record, returning every discovered error in traversal
    /// order (at most one in fail-fast mode). Never fails itself: all
    /// data problems surface inside the report.
    pub fn validate(&self, record: &Value, schema: &SchemaNode) -> ValidationReport {
        let mut context = ValidationContext::new(self.mode);
        self.validate_record(record, schema, &mut context);
        context.into_report()
    }

    /// Validates like [`validate`](Validator::validate) and additionally
    /// returns a copy of the record with every successful coercion applied,
    /// so postal code `90210` comes back as `"90210"`. Fields that
    /// produced any error keep their observed value.
    pub fn normalize(&self, record: &Value, schema: &SchemaNode) -> (Value, ValidationReport) {
        let mut context = ValidationContext::new(self.mode);
        self.validate_record(record, schema, &mut context);
        let mut normalized = record.clone();
        for (path, coerced) in std::mem::take(&mut context.coercions) {
            set_value_at_path(&mut normalized, &path, coerced);
        }
        (normalized, context.into_report())
    }

    fn validate_record(
        &self,
        record: &Value,
        schema: &SchemaNode,
        context: &mut ValidationContext,
    ) {
        tracing::trace!(schema = %schema.name, mode = ?self.mode, "validating record");
        let Some(object) = record.as_object() else {
            context.add_error(
                ErrorKind::TypeMismatch,
                render_value(record),
                format!(
                    "expected an object record, found {}",
                    value_type_name(record)
                ),
            );
            return;
        };
        self.validate_node(object, schema, context);
    }

    fn validate_node(
        &self,
        object: &Map<String, Value>,
        node: &SchemaNode,
        context: &mut ValidationContext,
    ) {
        // Declared order drives traversal; unknown input fields are
        // ignored.
        for field in &node.fields {
            if context.halted {
                return;
            }
            context.push_path(&field.name);
            self.validate_field(object.get(&field.name), field, context);
            context.pop_path();
        }
    }

    fn validate_field(
        &self,
        value: Option<&Value>,
        field: &FieldSpec,
        context: &mut ValidationContext,
    ) {
        let value = match value {
            None => {
                if field.is_required() {
                    context.add_error(
                        ErrorKind::MissingRequiredField,
                        ABSENT,
                        format!("required field '{}' is missing", field.name),
                    );
                }
                return;
            }
            // An explicit null counts as missing but keeps its own
            // observed rendering, so the two stay distinguishable.
            Some(Value::Null) => {
                if field.is_required() {
                    context.add_error(
                        ErrorKind::MissingRequiredField,
                        "null",
                        format!("required field '{}' is null", field.name),
                    );
                }
                return;
            }
            Some(value) => value,
        };

        match &field.field_type {
            FieldType::Node(node) => {
                let Some(object) = value.as_object() else {
                    context.add_error(
                        ErrorKind::TypeMismatch,
                        render_value(value),
                        format!("expected a nested object, found {}", value_type_name(value)),
                    );
                    return;
                };
                self.validate_node(object, node, context);
            }
            FieldType::Primitive(primitive) => {
                match resolve(*primitive, field.tz_aware, field.coerce, value) {
                    Resolution::Exact => self.evaluate_constraints(value, field, context),
                    Resolution::Coerced(coerced) => {
                        let errors_before = context.errors.len();
                        self.evaluate_constraints(&coerced, field, context);
                        // A coercion is only worth keeping if the field
                        // came through clean.
                        if context.errors.len() == errors_before {
                            context.record_coercion(coerced);
                        }
                    }
                    Resolution::Mismatch => context.add_error(
                        ErrorKind::TypeMismatch,
                        render_value(value),
                        format!("expected {primitive}, found {}", value_type_name(value)),
                    ),
                    Resolution::Failed { reason } => {
                        context.add_error(ErrorKind::CoercionFailure, render_value(value), reason)
                    }
                }
            }
        }
    }

    fn evaluate_constraints(
        &self,
        value: &Value,
        field: &FieldSpec,
        context: &mut ValidationContext,
    ) {
        // Collect-all keeps evaluating the remaining constraints even
        // after one fails, so a single field can contribute several
        // entries.
        for constraint in &field.constraints {
            if !constraint.is_satisfied_by(value) {
                let description = constraint.description();
                context.add_error(
                    ErrorKind::ConstraintViolation {
                        description: description.clone(),
                    },
                    render_value(value),
                    description,
                );
                if context.halted {
                    return;
                }
            }
        }
    }
}

/// Mutable traversal state: the current path, accumulated errors, the log
/// of successful coercions, and the fail-fast halt flag.
#[derive(Debug)]
struct ValidationContext {
    mode: ValidationMode,
    path: FieldPath,
    errors: Vec<ValidationError>,
    coercions: Vec<(FieldPath, Value)>,
    halted: bool,
}

impl ValidationContext {
    fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            path: FieldPath::root(),
            errors: Vec::new(),
            coercions: Vec::new(),
            halted: false,
        }
    }

    fn push_path(&mut self, segment: &str) {
        self.path.push(segment);
    }

    fn pop_path(&mut self) {
        self.path.pop();
    }

    fn add_error(
        &mut self,
        kind: ErrorKind,
        observed: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors
            .push(ValidationError::new(self.path.clone(), kind, observed, message));
        if self.mode == ValidationMode::FailFast {
            self.halted = true;
        }
    }

    fn record_coercion(&mut self, coerced: Value) {
        self.coercions.push((self.path.clone(), coerced));
    }

    fn into_report(self) -> ValidationReport {
        ValidationReport::from_errors(self.errors)
    }
}

/// Writes a replacement value at a nested path; the mutable counterpart
/// of walking a record by field names.
fn set_value_at_path(record: &mut Value, path: &FieldPath, new_value: Value) {
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    let mut current = record;
    for segment in parents {
        let Some(next) = current.get_mut(segment) else {
            return;
        };
        current = next;
    }
    if let Some(object) = current.as_object_mut() {
        object.insert(last.clone(), new_value);
    }
}
