//! Conversation domain model.
//!
//! A conversation (chat) is held between exactly two users and stored by the
//! server as two explicit participant slots. The client presents it from the
//! viewer's side, so every `Conversation` carries the derived counterpart: the
//! slot that is not the viewer.

use crate::ids::{ConversationId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One side of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
    pub avatar: Option<String>,
}

impl Participant {
    pub fn new(id: UserId, name: impl Into<String>, avatar: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar,
        }
    }
}

/// A chat record exactly as the server describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawConversation {
    pub id: ConversationId,
    pub participant_a: Participant,
    pub participant_b: Participant,
    pub unread_count: u32,
    pub is_rated_by_viewer: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl RawConversation {
    /// Returns true when the slots hold exactly `{first, second}`, in either order.
    pub fn is_between(&self, first: UserId, second: UserId) -> bool {
        let (a, b) = (self.participant_a.id, self.participant_b.id);
        (a == first && b == second) || (a == second && b == first)
    }

    /// The slot that is not `viewer`, or `None` when the viewer is in neither slot.
    pub fn counterpart_of(&self, viewer: UserId) -> Option<&Participant> {
        if self.participant_a.id == viewer {
            Some(&self.participant_b)
        } else if self.participant_b.id == viewer {
            Some(&self.participant_a)
        } else {
            None
        }
    }
}

/// A chat record seen from the viewer's side.
///
/// The participant pair can only be set at construction, together with the
/// counterpart derived for the viewer, so the two cannot drift apart. Only the unread count and the rated flag change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    #[serde(flatten)]
    raw: RawConversation,
    counterpart: Option<Participant>,
}

impl Conversation {
    /// Annotates a raw record for `viewer`.
    ///
    /// A record that does not involve the viewer is kept without a counterpart.
    pub fn annotate(raw: RawConversation, viewer: UserId) -> Self {
        let counterpart = raw.counterpart_of(viewer).cloned();
        Self { raw, counterpart }
    }

    pub fn id(&self) -> ConversationId {
        self.raw.id
    }

    pub fn raw(&self) -> &RawConversation {
        &self.raw
    }

    pub fn counterpart(&self) -> Option<&Participant> {
        self.counterpart.as_ref()
    }

    /// Display name shown for the conversation (the counterpart's name).
    pub fn display_name(&self) -> Option<&str> {
        self.counterpart.as_ref().map(|p| p.name.as_str())
    }

    pub fn unread_count(&self) -> u32 {
        self.raw.unread_count
    }

    pub fn has_unread(&self) -> bool {
        self.raw.unread_count > 0
    }

    pub fn is_rated_by_viewer(&self) -> bool {
        self.raw.is_rated_by_viewer
    }

    /// The server reported every message as read.
    pub fn clear_unread(&mut self) {
        self.raw.unread_count = 0;
    }

    pub fn mark_rated(&mut self) {
        self.raw.is_rated_by_viewer = true;
    }
}

/// Request to open a chat between the viewer and a counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewConversation {
    pub initiator: UserId,
    pub counterpart: UserId,
}
