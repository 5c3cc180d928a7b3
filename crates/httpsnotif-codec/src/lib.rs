//! Encoding negotiation and notification payload parsing.
//!
//! This is the core value-add layer of httpsnotif. Everything here is a pure
//! function over bytes and headers:
//! - [`Encoding`] / [`CapabilitySet`] — which wire encodings the receiver accepts
//! - [`AcceptPreference`] — q-weighted media-type preferences from an Accept header
//! - payload parsing into an encoding-agnostic document tree, with a one-shot
//!   fallback to the other recognized encoding
//! - capability-document serialization in either encoding
//!
//! No I/O, no shared state, no global flags.

pub mod capability;
pub mod encoding;
pub mod error;
pub mod negotiate;
pub mod payload;

pub use capability::build_capabilities;
pub use encoding::{CapabilitySet, Encoding, MIME_APPLICATION_JSON, MIME_APPLICATION_XML};
pub use error::{CodecError, Result};
pub use negotiate::{select_encoding, AcceptPreference};
pub use payload::{parse, parse_with_fallback, FailedAttempt, ParsedDocument, RawPayload};
