//! Chat message types.

use crate::error::{Result, SkillSwapError};
use crate::ids::{ConversationId, CorrelationId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether the server has acknowledged a message yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "correlation_id", rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Shown locally, waiting for the create request to finish
    Pending(CorrelationId),
    /// Returned by the server
    Confirmed,
}

/// A message of a conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Server id; `None` while the message is provisional
    pub id: Option<MessageId>,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub sender_name: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub status: DeliveryStatus,
}

impl Message {
    /// Builds the locally shown copy of an outgoing message.
    pub fn provisional(draft: &NewMessage, correlation_id: CorrelationId) -> Self {
        Self {
            id: None,
            conversation_id: draft.conversation_id,
            sender_id: draft.sender_id,
            sender_name: Some(draft.sender_name.clone()),
            content: draft.content.clone(),
            timestamp: draft.timestamp,
            is_read: false,
            status: DeliveryStatus::Pending(correlation_id),
        }
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self.status, DeliveryStatus::Pending(_))
    }

    pub fn correlation_id(&self) -> Option<CorrelationId> {
        match self.status {
            DeliveryStatus::Pending(id) => Some(id),
            DeliveryStatus::Confirmed => None,
        }
    }

    pub fn is_from(&self, user: UserId) -> bool {
        self.sender_id == user
    }
}

/// Payload of a "create message" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl NewMessage {
    /// Validates and trims the text; whitespace-only text is rejected.
    pub fn new(
        conversation_id: ConversationId,
        sender_id: UserId,
        sender_name: impl Into<String>,
        text: &str,
    ) -> Result<Self> {
        let content = text.trim();
        if content.is_empty() {
            return Err(SkillSwapError::validation("Message text must not be empty"));
        }
        Ok(Self {
            conversation_id,
            sender_id,
            sender_name: sender_name.into(),
            content: content.to_string(),
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_rejects_blank_text() {
        let err = NewMessage::new(ConversationId(1), UserId(1), "Ada", " \n\t ").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_new_message_trims_text() {
        let draft = NewMessage::new(ConversationId(1), UserId(1), "Ada", "  hi there ").unwrap();
        assert_eq!(draft.content, "hi there");
    }

    #[test]
    fn test_provisional_copy_has_no_server_id() {
        let draft = NewMessage::new(ConversationId(4), UserId(2), "Bob", "hello").unwrap();
        let correlation = CorrelationId::new();
        let message = Message::provisional(&draft, correlation);

        assert!(message.id.is_none());
        assert!(message.is_provisional());
        assert_eq!(message.correlation_id(), Some(correlation));
        assert_eq!(message.timestamp, draft.timestamp);
        assert!(message.is_from(UserId(2)));
    }
}
