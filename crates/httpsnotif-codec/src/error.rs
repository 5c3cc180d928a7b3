use crate::encoding::Encoding;
use crate::payload::FailedAttempt;

/// Errors that can occur while negotiating or parsing notification bodies.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The body could not be parsed as the given encoding.
    #[error("{encoding} parse failed: {detail}")]
    ParseFailed {
        encoding: Encoding,
        detail: String,
    },

    /// Every parse attempt failed, declared encoding and fallback included.
    #[error("payload unparseable: {}", format_attempts(.attempts))]
    Unparseable { attempts: Vec<FailedAttempt> },

    /// The capability document could not be serialized.
    #[error("capability document serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn format_attempts(attempts: &[FailedAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, CodecError>;
