//! Error types for pick extraction
//!
//! None of these escape the extraction stage: [`super::PickExtractor::extract`]
//! logs them and substitutes the fallback record.

use thiserror::Error;

/// Result type for a single extraction attempt
pub type LlmResult<T> = Result<T, ExtractionError>;

/// Reasons a model round trip did not yield a usable record
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Connection, timeout or body decoding failure
    #[error("LLM request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("LLM backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend answered but the message content was empty
    #[error("LLM reply was empty")]
    EmptyReply,

    /// Reply content is not valid JSON
    #[error("LLM reply is not valid JSON ({reason}): {excerpt}")]
    MalformedReply { reason: String, excerpt: String },

    /// Reply parsed but is not a JSON object
    #[error("LLM reply is JSON but not an object: {excerpt}")]
    NotAnObject { excerpt: String },

    /// Required key absent from the reply object
    #[error("LLM reply is missing key '{0}'")]
    MissingField(&'static str),

    /// Key present but holding an array, object or boolean
    #[error("LLM reply key '{field}' holds an unsupported {kind} value")]
    UnsupportedValue {
        field: &'static str,
        kind: &'static str,
    },
}

impl ExtractionError {
    /// Transport-level failures may succeed on a later run
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Whether the model answered but broke the reply contract
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptyReply
                | Self::MalformedReply { .. }
                | Self::NotAnObject { .. }
                | Self::MissingField(_)
                | Self::UnsupportedValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_recoverability() {
        let server = ExtractionError::Status {
            status: 503,
            body: String::new(),
        };
        let client = ExtractionError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(server.is_recoverable());
        assert!(!client.is_recoverable());
    }

    #[test]
    fn test_contract_violations() {
        assert!(ExtractionError::MissingField("Pick").is_contract_violation());
        assert!(!ExtractionError::MissingField("Pick").is_recoverable());
        assert_eq!(
            ExtractionError::MissingField("Odds").to_string(),
            "LLM reply is missing key 'Odds'"
        );
    }
}
