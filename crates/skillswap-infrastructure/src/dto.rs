//! Data Transfer Objects (DTOs) for the REST API.
//!
//! These DTOs mirror the JSON documents exchanged with the server. They are
//! private to the infrastructure layer; everything above it only sees the
//! domain models they convert into.
//!
//! ## Wire quirks
//!
//! - Chat records are flat: both participant slots are spelled out as
//!   `user1_*` / `user2_*` fields.
//! - Listings arrive either wrapped (`{"chats": [...]}`) or as a bare array.
//! - Timestamps are ISO-8601, with or without an offset. Values without an
//!   offset are UTC.
//! - Error bodies carry their text under `error`, `message` or `details`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use skillswap_core::conversation::{
    DeliveryStatus, Message, NewConversation, NewMessage, NewRating, Participant, Rating,
    RawConversation,
};
use skillswap_core::user::AuthIdentity;
use skillswap_core::{ConversationId, MessageId, UserId};

// ============================================================================
// Chats
// ============================================================================

/// A chat record as served by `GET /chats/{user_id}` and `POST /chats`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatDto {
    pub id: i64,
    pub user1_id: i64,
    pub user2_id: i64,
    #[serde(default)]
    pub user1_name: Option<String>,
    #[serde(default)]
    pub user2_name: Option<String>,
    #[serde(default)]
    pub user1_avatar: Option<String>,
    #[serde(default)]
    pub user2_avatar: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub is_rated_by_current_user: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ChatDto> for RawConversation {
    fn from(dto: ChatDto) -> Self {
        RawConversation {
            id: ConversationId(dto.id),
            participant_a: Participant::new(
                UserId(dto.user1_id),
                dto.user1_name.unwrap_or_default(),
                dto.user1_avatar,
            ),
            participant_b: Participant::new(
                UserId(dto.user2_id),
                dto.user2_name.unwrap_or_default(),
                dto.user2_avatar,
            ),
            unread_count: dto.unread_count,
            is_rated_by_viewer: dto.is_rated_by_current_user,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChatListing {
    Wrapped { chats: Vec<ChatDto> },
    Bare(Vec<ChatDto>),
}

impl ChatListing {
    pub fn into_conversations(self) -> Vec<RawConversation> {
        let chats = match self {
            Self::Wrapped { chats } | Self::Bare(chats) => chats,
        };
        chats.into_iter().map(RawConversation::from).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CreateChatBody {
    pub user1_id: i64,
    pub user2_id: i64,
}

impl From<&NewConversation> for CreateChatBody {
    fn from(request: &NewConversation) -> Self {
        Self {
            user1_id: request.initiator.0,
            user2_id: request.counterpart.0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkReadBody {
    pub user_id: i64,
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub content: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_read: bool,
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        Message {
            id: Some(MessageId(dto.id)),
            conversation_id: ConversationId(dto.chat_id),
            sender_id: UserId(dto.sender_id),
            sender_name: dto.sender_name,
            content: dto.content,
            timestamp: dto.timestamp.unwrap_or_else(Utc::now),
            is_read: dto.is_read,
            status: DeliveryStatus::Confirmed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageListing {
    Wrapped { messages: Vec<MessageDto> },
    Bare(Vec<MessageDto>),
}

impl MessageListing {
    pub fn into_messages(self) -> Vec<Message> {
        let messages = match self {
            Self::Wrapped { messages } | Self::Bare(messages) => messages,
        };
        messages.into_iter().map(Message::from).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CreateMessageBody<'a> {
    pub sender_id: i64,
    pub content: &'a str,
    pub sender_name: &'a str,
    pub timestamp: DateTime<Utc>,
}

impl<'a> From<&'a NewMessage> for CreateMessageBody<'a> {
    fn from(message: &'a NewMessage) -> Self {
        Self {
            sender_id: message.sender_id.0,
            content: &message.content,
            sender_name: &message.sender_name,
            timestamp: message.timestamp,
        }
    }
}

// ============================================================================
// Ratings
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RatingBody<'a> {
    pub rater_id: i64,
    pub rated_id: i64,
    pub chat_id: i64,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
}

impl<'a> From<&'a NewRating> for RatingBody<'a> {
    fn from(rating: &'a NewRating) -> Self {
        Self {
            rater_id: rating.rater_id.0,
            rated_id: rating.rated_id.0,
            chat_id: rating.conversation_id.0,
            rating: rating.score,
            comment: rating.comment.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingDto {
    pub id: i64,
    pub rater_id: i64,
    pub rated_id: i64,
    pub chat_id: i64,
    #[serde(default)]
    pub rater_name: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<RatingDto> for Rating {
    fn from(dto: RatingDto) -> Self {
        Rating {
            id: dto.id,
            rater_id: UserId(dto.rater_id),
            rated_id: UserId(dto.rated_id),
            conversation_id: ConversationId(dto.chat_id),
            rater_name: dto.rater_name,
            score: dto.rating,
            comment: dto.comment,
            timestamp: dto.timestamp,
        }
    }
}

// ============================================================================
// Auth, uploads and errors
// ============================================================================

/// Login answers `{user_id, name}`; signup answers the full user object.
#[derive(Debug, Deserialize)]
pub struct AuthDto {
    #[serde(alias = "id")]
    pub user_id: i64,
    pub name: String,
}

impl From<AuthDto> for AuthIdentity {
    fn from(dto: AuthDto) -> Self {
        AuthIdentity {
            user_id: UserId(dto.user_id),
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadDto {
    pub image_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorBody {
    /// Extracts the server's error text from a response body.
    ///
    /// Returns an empty string when the body is not a recognizable error
    /// document.
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error.or(parsed.message).or(parsed.details))
            .unwrap_or_default()
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parses an ISO-8601 timestamp; values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|value| {
        let parsed = parse_timestamp(value);
        if parsed.is_none() {
            tracing::warn!("[Dto] Ignoring unparseable timestamp: {}", value);
        }
        parsed
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_flat_chat_record_maps_both_slots() {
        let dto: ChatDto = serde_json::from_value(json!({
            "id": 11,
            "user1_id": 3,
            "user2_id": 1,
            "user1_name": "Grace",
            "user2_name": "Ada",
            "user1_avatar": "/upload/uploads/profile_images/profile_3_a.png",
            "user2_avatar": null,
            "unread_count": 2,
            "is_rated_by_current_user": true,
            "created_at": "2025-07-14T09:30:00.123456+00:00"
        }))
        .unwrap();

        let raw = RawConversation::from(dto);
        assert_eq!(raw.id, ConversationId(11));
        assert_eq!(raw.participant_a.name, "Grace");
        assert!(raw.participant_a.avatar.is_some());
        assert_eq!(raw.participant_b.id, UserId(1));
        assert_eq!(raw.unread_count, 2);
        assert!(raw.is_rated_by_viewer);
        assert_eq!(raw.created_at.unwrap().hour(), 9);
    }

    #[test]
    fn test_chat_listing_accepts_both_envelopes() {
        let record = json!({"id": 1, "user1_id": 1, "user2_id": 2});
        let wrapped: ChatListing =
            serde_json::from_value(json!({ "chats": [record.clone()] })).unwrap();
        let bare: ChatListing = serde_json::from_value(json!([record])).unwrap();

        assert_eq!(wrapped.into_conversations().len(), 1);
        let bare = bare.into_conversations();
        assert_eq!(bare[0].unread_count, 0);
        assert!(!bare[0].is_rated_by_viewer);
    }

    #[test]
    fn test_message_listing_keeps_order() {
        let listing: MessageListing = serde_json::from_value(json!({
            "messages": [
                {"id": 1, "chat_id": 4, "sender_id": 1, "sender_name": "Ada",
                 "content": "hi", "timestamp": "2025-07-14T09:30:00", "is_read": true},
                {"id": 2, "chat_id": 4, "sender_id": 2, "content": "hello",
                 "timestamp": "2025-07-14T09:31:00+00:00"}
            ]
        }))
        .unwrap();

        let messages = listing.into_messages();
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].id, Some(MessageId(2)));
        assert!(!messages[1].is_read);
        assert!(messages.iter().all(|m| !m.is_provisional()));
    }

    #[test]
    fn test_offsetless_timestamp_is_utc() {
        let parsed = parse_timestamp("2025-01-02T03:04:05.678").unwrap();
        assert_eq!((parsed.year(), parsed.hour()), (2025, 3));

        let shifted = parse_timestamp("2025-01-02T03:04:05+02:00").unwrap();
        assert_eq!(shifted.hour(), 1);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_outgoing_bodies_use_wire_names() {
        let message = NewMessage::new(ConversationId(4), UserId(1), "Ada", "hi").unwrap();
        let body = serde_json::to_value(CreateMessageBody::from(&message)).unwrap();
        assert_eq!(body["sender_id"], 1);
        assert_eq!(body["sender_name"], "Ada");
        assert!(body.get("chat_id").is_none());

        let rating = NewRating::new(UserId(1), UserId(2), ConversationId(4), 5, None).unwrap();
        let body = serde_json::to_value(RatingBody::from(&rating)).unwrap();
        assert_eq!(body, json!({"rater_id": 1, "rated_id": 2, "chat_id": 4, "rating": 5}));
    }

    #[test]
    fn test_auth_accepts_login_and_signup_shapes() {
        let login: AuthDto =
            serde_json::from_value(json!({"message": "Login successful", "user_id": 7, "name": "Ada"}))
                .unwrap();
        let signup: AuthDto = serde_json::from_value(json!({
            "id": 8, "name": "Grace", "email": "g@example.com", "message": "User created successfully"
        }))
        .unwrap();
        assert_eq!(AuthIdentity::from(login).user_id, UserId(7));
        assert_eq!(AuthIdentity::from(signup).user_id, UserId(8));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(ErrorBody::message_from(r#"{"error": "Sender not found"}"#), "Sender not found");
        assert_eq!(ErrorBody::message_from(r#"{"message": "Chat 9 not found"}"#), "Chat 9 not found");
        assert_eq!(ErrorBody::message_from(r#"{"details": "Invalid data: 'x'"}"#), "Invalid data: 'x'");
        assert_eq!(ErrorBody::message_from("<html>502</html>"), "");
    }
}
