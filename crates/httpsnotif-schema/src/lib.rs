//! Load-once schema model for validating relay notifications.
//!
//! The schema description is compiled to a JSON Schema validator exactly once,
//! at process start. The outcome — [`SchemaState::Ready`] or
//! [`SchemaState::Failed`] — is published through a single-assignment
//! [`SchemaHandle`] that every request handler reads without locking. A
//! handler that runs before publication observes "not loaded", never a
//! half-initialized model.

pub mod config;
pub mod error;
pub mod model;
pub mod validator;

pub use config::ModelConfig;
pub use error::{Result, SchemaError};
pub use model::{SchemaHandle, SchemaModel, SchemaState};
