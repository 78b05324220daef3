//! Application layer for the SkillSwap client.
//!
//! This crate provides the use cases that drive the domain state against the
//! remote API: session handling, the conversation synchronizer and match
//! suggestions.

pub mod conversation;
pub mod conversation_usecase;
pub mod match_usecase;
pub mod notice;
pub mod session_usecase;

pub use conversation::{ConversationSnapshot, ConversationState};
pub use conversation_usecase::ConversationUseCase;
pub use match_usecase::{CARDS_PER_VIEW, MatchCarousel, MatchUseCase};
pub use notice::{Notice, NoticeLevel};
pub use session_usecase::SessionUseCase;
