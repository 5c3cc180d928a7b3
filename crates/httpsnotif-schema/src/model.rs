use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use httpsnotif_codec::ParsedDocument;
use jsonschema::Validator;
use serde_json::Value;
use tracing::error;

use crate::config::ModelConfig;
use crate::error::{Result, SchemaError};
use crate::validator::validate_document;

/// A compiled, read-only schema model.
///
/// Owns no mutable state after construction; concurrent validation calls
/// need no locking.
pub struct SchemaModel {
    validator: Validator,
    config: ModelConfig,
}

impl SchemaModel {
    /// Compile a schema model from a JSON Schema description string.
    pub fn from_str(schema_json: &str, config: ModelConfig) -> Result<Self> {
        let schema: Value = serde_json::from_str(schema_json)?;
        Self::from_value(&schema, config)
    }

    /// Compile a schema model from a JSON Schema description value.
    pub fn from_value(schema: &Value, config: ModelConfig) -> Result<Self> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|err| SchemaError::CompileFailed(err.to_string()))?;
        Ok(Self { validator, config })
    }

    /// Load and compile a schema description from a file.
    ///
    /// The read is bounded by [`ModelConfig::max_schema_file_size`].
    pub fn from_file(path: &Path, config: ModelConfig) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|err| SchemaError::LoadFailed(format!("{}: {err}", path.display())))?;

        let metadata = file
            .metadata()
            .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
        if metadata.len() > config.max_schema_file_size as u64 {
            return Err(SchemaError::LoadFailed(format!(
                "schema file too large ({} bytes, max {}): {}",
                metadata.len(),
                config.max_schema_file_size,
                path.display()
            )));
        }

        let read_limit = u64::try_from(config.max_schema_file_size.saturating_add(1))
            .unwrap_or(u64::MAX);
        let mut content = String::new();
        file.take(read_limit)
            .read_to_string(&mut content)
            .map_err(|err| {
                SchemaError::LoadFailed(format!("failed reading schema {}: {err}", path.display()))
            })?;
        if content.len() > config.max_schema_file_size {
            return Err(SchemaError::LoadFailed(format!(
                "schema file too large while reading: {}",
                path.display()
            )));
        }

        Self::from_str(&content, config)
    }

    /// Validate a parsed notification document against the model.
    pub fn validate(&self, document: &ParsedDocument) -> Result<()> {
        self.validate_value(document.root())
    }

    /// Validate a raw document tree against the model.
    pub fn validate_value(&self, root: &Value) -> Result<()> {
        validate_document(root, &self.validator)
    }

    /// Model configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl std::fmt::Debug for SchemaModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaModel")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The terminal outcome of the one-time schema load.
///
/// Constructed once at process start and never transitions again.
#[derive(Debug)]
pub enum SchemaState {
    /// The model compiled and is ready to validate.
    Ready(SchemaModel),
    /// Loading or compilation failed; every validation call observes this
    /// deterministically until the process is restarted with a good schema.
    Failed(String),
}

impl SchemaState {
    /// Load a schema file into a terminal state.
    ///
    /// A load failure is reported as a process-wide diagnostic and becomes
    /// [`SchemaState::Failed`]; it never aborts the caller.
    pub fn load(path: &Path, config: ModelConfig) -> Self {
        match SchemaModel::from_file(path, config) {
            Ok(model) => SchemaState::Ready(model),
            Err(err) => {
                error!(schema = %path.display(), %err, "schema load failed; relay notifications will be rejected");
                SchemaState::Failed(err.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SchemaState::Ready(_))
    }
}

/// Single-assignment slot publishing the schema state to request handlers.
///
/// Readers never block and never observe a partial value: before `publish`
/// the slot reads as `None` ("not loaded"), afterwards every read returns
/// the same terminal state.
#[derive(Debug, Default)]
pub struct SchemaHandle {
    slot: OnceLock<SchemaState>,
}

impl SchemaHandle {
    pub fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Publish the load outcome. Returns `false` if a state was already
    /// published; the original value is kept.
    pub fn publish(&self, state: SchemaState) -> bool {
        self.slot.set(state).is_ok()
    }

    /// The published state, or `None` while the load has not completed.
    pub fn state(&self) -> Option<&SchemaState> {
        self.slot.get()
    }

    /// The ready model, if one was published.
    pub fn model(&self) -> Option<&SchemaModel> {
        match self.slot.get() {
            Some(SchemaState::Ready(model)) => Some(model),
            _ => None,
        }
    }
}
