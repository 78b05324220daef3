//! User-facing notices.
//!
//! Failed remote operations are recovered where they happen; what is left for
//! the user is a short message queued here and drained by the presentation
//! layer.

use serde::Serialize;
use skillswap_core::SkillSwapError;

pub const SEND_FAILED: &str = "Failed to send message. Please try again.";
pub const START_CHAT_FAILED: &str = "Failed to start chat. Please try again.";
pub const RATING_FAILED: &str = "Failed to submit rating. Please try again.";
pub const RATING_THANKS: &str = "Thank you for your feedback!";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile.";
pub const IMAGE_UPLOAD_FAILED: &str = "Failed to upload image. Please try again.";
pub const LOAD_MESSAGES_FAILED: &str = "Failed to load messages.";
pub const LOAD_CONVERSATIONS_FAILED: &str = "Failed to load conversations.";
pub const MARK_READ_FAILED: &str = "Failed to mark messages as read.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Error notice preferring the server's own wording over `fallback`.
    pub fn from_failure(err: &SkillSwapError, fallback: &str) -> Self {
        match err {
            SkillSwapError::Validation(message) => Self::error(message.clone()),
            other => Self::error(other.server_message().unwrap_or(fallback)),
        }
    }
}
