//! Schema persistence: YAML serialization with an exact structural
//! round-trip, plus file load/save conveniences.

use std::fs;
use std::path::Path;

use crate::types::SchemaNode;
use crate::{Result, SchemaError};

/// Converts schema nodes to and from their persisted YAML form.
///
/// Parsing always re-validates, so a structurally invalid document can
/// never produce a usable node. The round-trip
/// `from_yaml(to_yaml(schema))` is structurally exact for every
/// constructible schema, covering every constraint kind and the timestamp
/// `tz_aware` flag.
pub struct SchemaCodec;

impl SchemaCodec {
    /// Serializes a schema to YAML text.
    pub fn to_yaml(schema: &SchemaNode) -> Result<String> {
        Ok(serde_yaml::to_string(schema)?)
    }

    /// Parses YAML text into a validated schema node.
    pub fn from_yaml(text: &str) -> Result<SchemaNode> {
        let schema: SchemaNode = serde_yaml::from_str(text)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Reads and parses a schema file.
    pub fn load(path: impl AsRef<Path>) -> Result<SchemaNode> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SchemaError::Load {
            message: format!("failed to read schema file '{}': {e}", path.display()),
        })?;
        let schema = Self::from_yaml(&text)?;
        tracing::debug!(schema = %schema.name, path = %path.display(), "loaded schema");
        Ok(schema)
    }

    /// Validates and writes a schema file.
    pub fn save(schema: &SchemaNode, path: impl AsRef<Path>) -> Result<()> {
        schema.validate()?;
        let path = path.as_ref();
        let text = Self::to_yaml(schema)?;
        fs::write(path, text).map_err(|e| SchemaError::Load {
            message: format!("failed to write schema file '{}': {e}", path.display()),
        })?;
        tracing::debug!(schema = %schema.name, path = %path.display(), "saved schema");
        Ok(())
    }
}
