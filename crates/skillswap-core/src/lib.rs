//! Domain layer for the SkillSwap client.
//!
//! Holds the models shared by every other crate, the error type and the
//! [`SkillExchangeApi`] trait through which the server is reached.

pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod ids;
pub mod matching;
pub mod user;

// Re-export common types
pub use api::SkillExchangeApi;
pub use error::{Result, SkillSwapError};
pub use ids::{ConversationId, CorrelationId, MessageId, UserId};
