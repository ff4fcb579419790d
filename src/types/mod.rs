pub mod constraint;
pub mod field;
pub mod schema;

pub use constraint::{Constraint, well_known};
pub use field::{FieldSpec, FieldType, PrimitiveType};
pub use schema::SchemaNode;
