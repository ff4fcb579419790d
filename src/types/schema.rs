use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::{FieldSpec, FieldType, PrimitiveType};
use crate::{Result, SchemaError};

/// A named, ordered collection of field specs describing one record shape.
///
/// Nested nodes are owned by value, so a schema is a tree by construction;
/// [`validate`](SchemaNode::validate) additionally rejects a nested node
/// that reuses an ancestor's name, keeping name-level composition acyclic.
/// Immutable once built and safe to share across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaNode {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl SchemaNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Validates and returns the node; the blessed end of a builder chain.
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Looks up a field spec by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks every structural invariant of the schema tree.
    ///
    /// Called by every blessed construction path ([`build`](SchemaNode::build),
    /// codec parse), so an invalid node is never handed to a validator:
    /// names are non-empty and unique per node, constraint parameters are
    /// sound, constraints sit only on primitive fields of a compatible
    /// type, `tz_aware` only on timestamp fields, and no nested node
    /// reuses an ancestor's name.
    pub fn validate(&self) -> Result<()> {
        let mut ancestors = Vec::new();
        self.validate_at(&mut ancestors)
    }

    fn validate_at(&self, ancestors: &mut Vec<String>) -> Result<()> {
        if self.name.is_empty() {
            return Err(SchemaError::Schema {
                message: "schema node name cannot be empty".to_string(),
            });
        }
        if ancestors.iter().any(|ancestor| *ancestor == self.name) {
            return Err(SchemaError::Schema {
                message: format!(
                    "cyclic nesting: node '{}' is already an ancestor along {}",
                    self.name,
                    ancestors.join(".")
                ),
            });
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::Schema {
                    message: format!("node '{}' contains a field with an empty name", self.name),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::Schema {
                    message: format!("duplicate field '{}' in node '{}'", field.name, self.name),
                });
            }

            match &field.field_type {
                FieldType::Primitive(primitive) => {
                    for constraint in &field.constraints {
                        constraint.validate()?;
                        constraint.check_applicable(*primitive)?;
                    }
                    if field.tz_aware && *primitive != PrimitiveType::Timestamp {
                        return Err(SchemaError::Schema {
                            message: format!(
                                "field '{}' is not a timestamp and cannot be tz-aware",
                                field.name
                            ),
                        });
                    }
                }
                FieldType::Node(node) => {
                    if !field.constraints.is_empty() {
                        return Err(SchemaError::Schema {
                            message: format!(
                                "field '{}' nests a schema node and cannot carry constraints",
                                field.name
                            ),
                        });
                    }
                    if field.tz_aware {
                        return Err(SchemaError::Schema {
                            message: format!(
                                "field '{}' is not a timestamp and cannot be tz-aware",
                                field.name
                            ),
                        });
                    }
                    ancestors.push(self.name.clone());
                    node.validate_at(ancestors)?;
                    ancestors.pop();
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaNode({}, {} fields)", self.name, self.fields.len())
    }
}
