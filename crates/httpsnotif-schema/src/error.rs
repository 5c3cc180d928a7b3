/// Errors that can occur while loading or applying the schema model.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema description could not be read.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// The schema description could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The document does not conform to the schema.
    #[error("schema validation failed: {message}")]
    ValidationFailed { message: String },

    /// The schema description is not valid JSON.
    #[error("schema description is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
