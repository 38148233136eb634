//! Error types for the library layer.

use understat_api::types::MatchId;

/// Errors produced while turning Understat pages into shot tables.
#[derive(thiserror::Error, Debug)]
pub enum UnderstatError {
    /// The page could not be fetched (transport failure, timeout, non-2xx).
    #[error("network error: {0}")]
    Network(#[from] understat_api::Error),
    /// No script element holds the expected payload.
    #[error("payload not found: {0}")]
    PayloadNotFound(String),
    /// The script text lacks the `('` / `')` delimiters.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// Unescaping or JSON parsing of the payload failed.
    #[error("payload decode failed: {reason} | raw: {raw}")]
    PayloadDecode { reason: String, raw: String },
    /// The decoded payload lacks an expected key or field.
    #[error("schema error: {0}")]
    Schema(String),
    /// One match in a batch failed; the batch was aborted.
    #[error("match {match_id} failed: {source}")]
    Aggregation {
        match_id: MatchId,
        #[source]
        source: Box<UnderstatError>,
    },
    /// User-provided input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A worker task panicked or was aborted unexpectedly.
    #[error("worker task failed: {0}")]
    TaskFailed(String),
    /// The batch was stopped through its cancellation token.
    #[error("cancelled")]
    Cancelled,
}

impl UnderstatError {
    /// Appends the page URL to extraction and schema errors. Network errors
    /// already carry it.
    pub(crate) fn at(self, url: &str) -> Self {
        match self {
            Self::PayloadNotFound(msg) => Self::PayloadNotFound(format!("{} at {}", msg, url)),
            Self::MalformedPayload(msg) => Self::MalformedPayload(format!("{} at {}", msg, url)),
            Self::PayloadDecode { reason, raw } => Self::PayloadDecode {
                reason: format!("{} at {}", reason, url),
                raw,
            },
            Self::Schema(msg) => Self::Schema(format!("{} at {}", msg, url)),
            other => other,
        }
    }
}
