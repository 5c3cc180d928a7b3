//! HTTPS notification receiver with capability discovery and schema validation.
//!
//! httpsnotif accepts relay notifications over HTTP in JSON or XML,
//! advertises which encodings it accepts, and validates every inbound
//! notification against a load-once schema model before acknowledging it.
//!
//! # Crate Structure
//!
//! - [`codec`] — Encoding negotiation and notification payload parsing
//! - [`schema`] — Load-once schema model and validation
//! - [`service`] — Validation pipeline and HTTP surface

/// Re-export codec types.
pub mod codec {
    pub use httpsnotif_codec::*;
}

/// Re-export schema types.
pub mod schema {
    pub use httpsnotif_schema::*;
}

/// Re-export service types.
pub mod service {
    pub use httpsnotif_service::*;
}
