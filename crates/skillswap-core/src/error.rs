//! Error types for the SkillSwap client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire SkillSwap client.
///
/// The first three variants are the failure taxonomy of remote operations:
/// the request never completed, the server rejected it, or it never left the
/// client because local validation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillSwapError {
    /// Network/transport failure (connect, timeout, unreadable body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a structured error response
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Local validation failure; nothing was sent and nothing changed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SkillSwapError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Rejected error
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if the server rejected the request
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Check if this is a local validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came back from the remote side (either failure mode).
    pub fn is_remote_failure(&self) -> bool {
        self.is_transport() || self.is_rejected()
    }

    /// Message supplied by the server, if any.
    ///
    /// Used to prefer the server's wording over a generic notice.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SkillSwapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SkillSwapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SkillSwapError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SkillSwapError>`.
pub type Result<T> = std::result::Result<T, SkillSwapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_rejections() {
        let rejected = SkillSwapError::rejected(404, "Sender not found");
        assert_eq!(rejected.server_message(), Some("Sender not found"));

        let blank = SkillSwapError::rejected(500, "  ");
        assert_eq!(blank.server_message(), None);

        let transport = SkillSwapError::transport("connection refused");
        assert_eq!(transport.server_message(), None);
    }

    #[test]
    fn test_remote_failure_classification() {
        assert!(SkillSwapError::transport("timeout").is_remote_failure());
        assert!(SkillSwapError::rejected(400, "bad").is_remote_failure());
        assert!(!SkillSwapError::validation("empty").is_remote_failure());
    }

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: SkillSwapError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        match err {
            SkillSwapError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
