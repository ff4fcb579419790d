use thiserror::Error;

/// Fatal, construction-time failures.
///
/// Everything here prevents a schema from being built, loaded, or saved.
/// Data problems found while walking a record are never a `SchemaError`;
/// they surface as entries in a
/// [`ValidationReport`](crate::validation::ValidationReport).
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Constraint error: {message}")]
    Constraint { message: String },

    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Load error: {message}")]
    Load { message: String },

    #[error("Record parse error at line {line}: {message}")]
    Record { line: usize, message: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
