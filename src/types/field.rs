use std::fmt;

use serde::{Deserialize, Serialize};

use super::constraint::Constraint;
use super::schema::SchemaNode;

/// The semantic scalar types a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
}

impl PrimitiveType {
    /// The fixed table of observed types a value may have and still be
    /// converted into this one when the owning field enables coercion.
    ///
    /// The table is the single place the legal conversions live:
    ///
    /// * `String` <- `Integer`, `Float` (digit rendering)
    /// * `Integer` <- `String` (decimal parse), `Float` (zero fraction only)
    /// * `Float` <- `Integer`, `String` (decimal parse)
    /// * `Boolean` <- `String` (exactly `"true"` / `"false"`)
    /// * `Timestamp` <- `String` (ISO-8601; see the field's `tz_aware` flag)
    pub fn coercion_sources(self) -> &'static [PrimitiveType] {
        match self {
            PrimitiveType::String => &[PrimitiveType::Integer, PrimitiveType::Float],
            PrimitiveType::Integer => &[PrimitiveType::String, PrimitiveType::Float],
            PrimitiveType::Float => &[PrimitiveType::Integer, PrimitiveType::String],
            PrimitiveType::Boolean => &[PrimitiveType::String],
            PrimitiveType::Timestamp => &[PrimitiveType::String],
        }
    }

    /// Whether a value observed as `source` may coerce into this type.
    pub fn accepts_coercion_from(self, source: PrimitiveType) -> bool {
        self.coercion_sources().contains(&source)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Float => "float",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A field's declared type: a primitive scalar or a nested schema node.
///
/// Serialized untagged, so a primitive appears as a bare scalar
/// (`type: string`) and a nested node as a mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldType {
    Primitive(PrimitiveType),
    Node(SchemaNode),
}

impl FieldType {
    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            FieldType::Primitive(primitive) => Some(*primitive),
            FieldType::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&SchemaNode> {
        match self {
            FieldType::Primitive(_) => None,
            FieldType::Node(node) => Some(node),
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, FieldType::Node(_))
    }
}

impl From<PrimitiveType> for FieldType {
    fn from(primitive: PrimitiveType) -> Self {
        FieldType::Primitive(primitive)
    }
}

impl From<SchemaNode> for FieldType {
    fn from(node: SchemaNode) -> Self {
        FieldType::Node(node)
    }
}

/// Describes one field of a record: declared type, nullability,
/// constraints, and coercion behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Nullable fields may be absent or JSON `null`; either skips every
    /// remaining check for the field.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,

    /// Accept values whose observed type is a registered coercion source
    /// for the declared type (see [`PrimitiveType::coercion_sources`]).
    #[serde(default, skip_serializing_if = "is_false")]
    pub coerce: bool,

    /// Timestamp fields only: `true` requires an explicit UTC offset in
    /// the value, `false` forbids one. Persisted as its own attribute so
    /// round-tripping a schema can never silently drop awareness.
    #[serde(default, skip_serializing_if = "is_false")]
    pub tz_aware: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            nullable: false,
            constraints: Vec::new(),
            coerce: false,
            tz_aware: false,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_coercion(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    pub fn with_tz_aware(mut self, tz_aware: bool) -> Self {
        self.tz_aware = tz_aware;
        self
    }

    /// A field is required exactly when it is not nullable.
    pub fn is_required(&self) -> bool {
        !self.nullable
    }
}
