//! Relay-notification validation pipeline and HTTP surface.
//!
//! Orchestrates the codec and schema layers behind two endpoints:
//! - `GET /capabilities` — advertise enabled encodings, negotiated against
//!   the client's Accept header
//! - `POST /relay-notification` — admit, parse, and schema-validate an
//!   inbound notification, answering 204 or a precise rejection status
//!
//! The capability set and the schema handle are injected at construction;
//! nothing here is a mutable global.

pub mod config;
pub mod error;
mod handlers;
pub mod routes;
pub mod validator;

use httpsnotif_codec::CapabilitySet;
use httpsnotif_schema::SchemaHandle;

pub use config::ReceiverConfig;
pub use error::{RelayError, Result};
pub use routes::build_router;
pub use validator::validate_relay_notification;

/// Shared, immutable per-server state.
///
/// The capability set is fixed at startup; the schema handle is written at
/// most once by the loader and read lock-free by every request handler.
#[derive(Debug)]
pub struct AppState {
    capabilities: CapabilitySet,
    schema: SchemaHandle,
}

impl AppState {
    pub fn new(capabilities: CapabilitySet) -> Self {
        Self {
            capabilities,
            schema: SchemaHandle::new(),
        }
    }

    /// Encodings currently enabled, in advertised order.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// The single-assignment schema slot.
    pub fn schema(&self) -> &SchemaHandle {
        &self.schema
    }
}
