//! Remote API trait.
//!
//! Defines the interface to the SkillSwap server. All durable state lives
//! behind it; the client only keeps what the current screen needs.

use crate::conversation::{Message, NewConversation, NewMessage, NewRating, Rating, RawConversation};
use crate::error::Result;
use crate::ids::{ConversationId, UserId};
use crate::matching::MatchList;
use crate::user::{AuthIdentity, Credentials, ProfileImage, ProfileUpdate, SignupRequest, UserProfile};
use async_trait::async_trait;

/// An abstract client for the SkillSwap REST API.
///
/// This trait decouples the application's state handling from the transport
/// (HTTP in production, in-memory fakes in tests).
///
/// # Errors
///
/// Every method reports failures as
/// - `SkillSwapError::Transport`: the request never completed
/// - `SkillSwapError::Rejected`: the server answered with an error response
#[async_trait]
pub trait SkillExchangeApi: Send + Sync {
    /// Authenticates with email and password.
    async fn login(&self, credentials: &Credentials) -> Result<AuthIdentity>;

    /// Creates an account and returns its identity.
    async fn signup(&self, request: &SignupRequest) -> Result<AuthIdentity>;

    /// Fetches the full profile of a user.
    async fn fetch_profile(&self, user_id: UserId) -> Result<UserProfile>;

    /// Applies a partial update and returns the stored profile.
    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate) -> Result<UserProfile>;

    /// Uploads an avatar image and returns its URL.
    async fn upload_profile_image(&self, user_id: UserId, image: &ProfileImage) -> Result<String>;

    /// Lists match suggestions for a user.
    async fn list_matches(&self, user_id: UserId) -> Result<MatchList>;

    /// Lists all chats the viewer takes part in, in server order.
    async fn list_conversations(&self, viewer: UserId) -> Result<Vec<RawConversation>>;

    /// Lists the messages of a chat, oldest first.
    async fn list_messages(&self, conversation_id: ConversationId) -> Result<Vec<Message>>;

    /// Creates a message and returns the stored copy.
    async fn create_message(&self, message: &NewMessage) -> Result<Message>;

    /// Creates a chat between two users and returns the stored record.
    async fn create_conversation(&self, request: &NewConversation) -> Result<RawConversation>;

    /// Marks every message of a chat not sent by `viewer` as read.
    async fn mark_read(&self, conversation_id: ConversationId, viewer: UserId) -> Result<()>;

    /// Stores a post-session rating.
    async fn submit_rating(&self, rating: &NewRating) -> Result<Rating>;
}
