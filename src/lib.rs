//! # recschema
//!
//! A declarative validation engine for nested, JSON-shaped records:
//! describe a record's fields, types, nullability, and per-field
//! constraints as data, then walk records against that schema and get a
//! structured, field-path-keyed error report back.
//!
//! ## Features
//!
//! - **Declarative schemas**: nodes, field specs, and constraint values
//!   (ranges, patterns, length bounds, allowed sets) built in code or
//!   loaded from YAML with an exact round-trip
//! - **Two validation modes**: fail-fast for cheap accept/reject checks,
//!   collect-all for complete diagnostics in one pass
//! - **Explicit coercion**: per-field opt-in conversions from an
//!   auditable source-type table, so postal code `90210` can become
//!   `"90210"` without loss
//! - **Reports as values**: data errors are ordinary values, never
//!   process failures; the caller decides how to render them
//! - **NDJSON replay**: feed stored record batches through a schema
//!
//! ## Quick Start
//!
//! ```rust
//! use recschema::{Constraint, FieldSpec, PrimitiveType, SchemaNode, Validator};
//! use serde_json::json;
//!
//! # fn main() -> recschema::Result<()> {
//! let schema = SchemaNode::new("user")
//!     .with_field(
//!         FieldSpec::new("gender", PrimitiveType::String)
//!             .with_constraint(Constraint::one_of(["male", "female"])?),
//!     )
//!     .with_field(
//!         FieldSpec::new("age", PrimitiveType::Integer)
//!             .with_constraint(Constraint::range(0.0, 100.0)?),
//!     )
//!     .build()?;
//!
//! let report = Validator::new().validate(&json!({"gender": "female", "age": 42}), &schema);
//! assert!(report.is_valid());
//!
//! let report = Validator::new().validate(&json!({"gender": "other", "age": 150}), &schema);
//! assert_eq!(report.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod source;
pub mod types;
pub mod validation;

pub use codec::SchemaCodec;
pub use error::{Result, SchemaError};
pub use source::{RecordSource, read_records};
pub use types::{Constraint, FieldSpec, FieldType, PrimitiveType, SchemaNode, well_known};
pub use validation::{
    ErrorKind, FieldPath, ValidationError, ValidationMode, ValidationReport, Validator,
};
