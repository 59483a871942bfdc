use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("Message content is not valid UTF-8 (invalid byte at offset {offset})")]
    EncodingError { offset: usize },

    #[error("Message content is {length} characters, exceeding the limit of {max}")]
    LengthExceeded { length: usize, max: usize },

    #[error("Unsupported content type: {0}")]
    InvalidContentType(String),

    #[error("Invalid channel identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Resolved channel identifier is invalid: {0}")]
    InvalidResolvedIdentifier(String),

    #[error("Invalid thread timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Channel {channel} is not permitted by the {mode} policy")]
    PolicyDenied { channel: String, mode: String },

    #[error("Failed to resolve channel reference: {0}")]
    ResolutionFailed(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl GuardError {
    /// Stable label for audit logs and error responses.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GuardError::EncodingError { .. } => "encoding_error",
            GuardError::LengthExceeded { .. } => "length_exceeded",
            GuardError::InvalidContentType(_) => "invalid_content_type",
            GuardError::InvalidIdentifier(_) => "invalid_identifier",
            GuardError::InvalidResolvedIdentifier(_) => "invalid_resolved_identifier",
            GuardError::InvalidTimestamp(_) => "invalid_timestamp",
            GuardError::PolicyDenied { .. } => "policy_denied",
            GuardError::ResolutionFailed(_) => "resolution_failed",
            GuardError::ConfigError(_) => "config_error",
        }
    }
}

impl From<SlackClientError> for GuardError {
    fn from(error: SlackClientError) -> Self {
        GuardError::ResolutionFailed(error.to_string())
    }
}
