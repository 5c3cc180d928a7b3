use axum::http::StatusCode;

/// Terminal rejection reasons for a relay notification.
///
/// All request-local and non-fatal; none triggers a retry. Each maps to
/// exactly one HTTP status and its `Display` text is the plain-text reason
/// sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The request carried no Content-Type header.
    #[error("missing Content-Type header")]
    MissingContentType,

    /// The declared content type is unrecognized, or recognized but disabled.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Neither the declared encoding nor the fallback could parse the body.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The schema model has not been published or failed to load.
    #[error("schema model unavailable: {0}")]
    SchemaUnavailable(String),

    /// The parsed document does not conform to the schema model.
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

impl RelayError {
    /// The HTTP status this rejection is surfaced as.
    ///
    /// `SchemaUnavailable` maps to 400 alongside `SchemaViolation`: without
    /// extra signaling the client cannot distinguish a transient server
    /// condition from a bad request, so both share the status while keeping
    /// distinct reason strings.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingContentType | RelayError::UnsupportedEncoding(_) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            RelayError::MalformedPayload(_)
            | RelayError::SchemaUnavailable(_)
            | RelayError::SchemaViolation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable taxonomy name, for reports and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MissingContentType => "missing-content-type",
            RelayError::UnsupportedEncoding(_) => "unsupported-encoding",
            RelayError::MalformedPayload(_) => "malformed-payload",
            RelayError::SchemaUnavailable(_) => "schema-unavailable",
            RelayError::SchemaViolation(_) => "schema-violation",
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
