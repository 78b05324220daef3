//! Conversation domain module.
//!
//! This module contains the chat records, messages and ratings the
//! synchronizer works on.
//!
//! # Module Structure
//!
//! - `model`: raw chat records, viewer-centric `Conversation`, participants
//! - `message`: thread messages and the "create message" payload
//! - `rating`: post-session ratings

mod message;
mod model;
mod rating;

// Re-export public API
pub use message::{DeliveryStatus, Message, NewMessage};
pub use model::{Conversation, NewConversation, Participant, RawConversation};
pub use rating::{MAX_SCORE, MIN_SCORE, NewRating, Rating};
