//! Conversation state reducer.
//!
//! `ConversationState` owns the viewer's conversation list, the active
//! selection, the active thread and the in-flight sends. Every remote
//! operation is split into a `begin_*` step that validates and applies the
//! optimistic change, and a `complete_*` step that reconciles the outcome.
//! Both are synchronous; the network call happens in between, outside of
//! this type.

use super::normalizer::normalize_conversations;
use super::pending::PendingSends;
use super::selection::default_selection;
use super::thread::MessageThread;
use crate::notice::{self, Notice};
use serde::Serialize;
use skillswap_core::conversation::{
    Conversation, Message, NewConversation, NewMessage, NewRating, Rating, RawConversation,
};
use skillswap_core::{ConversationId, CorrelationId, Result, SkillSwapError, UserId};

/// Outcome of making a conversation active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub conversation_id: ConversationId,
    /// The active conversation changed and its thread needs loading
    pub changed: bool,
    /// A "mark read" request should be issued for the conversation
    pub needs_mark_read: bool,
}

/// A message send that has been applied locally and awaits the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    pub correlation_id: CorrelationId,
    pub request: NewMessage,
}

/// First step of opening a chat with someone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartConversation {
    /// A chat with this counterpart exists and is now active
    Existing(Selection),
    /// No chat exists yet; this request must be sent
    Create(NewConversation),
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSnapshot {
    pub viewer_id: Option<UserId>,
    pub conversations: Vec<Conversation>,
    pub active: Option<Conversation>,
    pub messages: Vec<Message>,
    pub pending_sends: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    viewer_id: Option<UserId>,
    conversations: Vec<Conversation>,
    active_id: Option<ConversationId>,
    thread: MessageThread,
    pending: PendingSends,
    notices: Vec<Notice>,
}

impl ConversationState {
    pub fn new(viewer_id: Option<UserId>) -> Self {
        Self {
            viewer_id,
            ..Self::default()
        }
    }

    /// Forgets everything and starts over for `viewer_id` (`None` on logout).
    pub fn reset(&mut self, viewer_id: Option<UserId>) {
        tracing::debug!("[ConversationState] reset for viewer {:?}", viewer_id);
        *self = Self::new(viewer_id);
    }

    // ============================================================================
    // Read access
    // ============================================================================

    pub fn viewer_id(&self) -> Option<UserId> {
        self.viewer_id
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn find(&self, conversation_id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id() == conversation_id)
    }

    pub fn active_id(&self) -> Option<ConversationId> {
        self.active_id
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active_id.and_then(|id| self.find(id))
    }

    pub fn thread(&self) -> &MessageThread {
        &self.thread
    }

    pub fn messages(&self) -> &[Message] {
        self.thread.messages()
    }

    pub fn pending_sends(&self) -> usize {
        self.pending.count()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            viewer_id: self.viewer_id,
            conversations: self.conversations.clone(),
            active: self.active().cloned(),
            messages: self.thread.messages().to_vec(),
            pending_sends: self.pending.count(),
        }
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ============================================================================
    // Conversation list and default selection
    // ============================================================================

    /// Replaces the list with a fresh server listing for `viewer`.
    ///
    /// A listing fetched for another viewer (the session changed meanwhile)
    /// is dropped. Returns the conversation chosen by the default-selection
    /// policy, if the policy changed the selection.
    pub fn replace_conversations(
        &mut self,
        viewer: UserId,
        raw: &[RawConversation],
    ) -> Option<ConversationId> {
        if self.viewer_id != Some(viewer) {
            tracing::debug!(
                "[ConversationState] Dropping listing for viewer {} (current: {:?})",
                viewer,
                self.viewer_id
            );
            return None;
        }

        self.conversations = normalize_conversations(viewer, raw);
        tracing::debug!(
            count = self.conversations.len(),
            "[ConversationState] Conversation list replaced"
        );

        if let Some(active) = self.active_id {
            if self.find(active).is_none() {
                tracing::warn!(
                    conversation_id = %active,
                    "[ConversationState] Active conversation disappeared from the list"
                );
                self.active_id = None;
                self.thread.reset(None);
            }
        }

        self.ensure_default_selection()
    }

    /// Applies the default-selection policy.
    ///
    /// Returns the newly selected conversation, or `None` when nothing
    /// changed (a selection already exists or the list is empty).
    pub fn ensure_default_selection(&mut self) -> Option<ConversationId> {
        let chosen = default_selection(&self.conversations, self.active_id);
        if chosen == self.active_id {
            return None;
        }
        self.active_id = chosen;
        self.thread.reset(chosen);
        tracing::debug!("[ConversationState] Default selection: {:?}", chosen);
        chosen
    }

    pub fn fail_refresh(&mut self, err: &SkillSwapError) {
        tracing::warn!("[ConversationState] Failed to load conversations: {}", err);
        self.notices
            .push(Notice::from_failure(err, notice::LOAD_CONVERSATIONS_FAILED));
    }

    // ============================================================================
    // Selection and read state
    // ============================================================================

    /// Makes `conversation_id` active.
    pub fn select(&mut self, conversation_id: ConversationId) -> Result<Selection> {
        let needs_mark_read = self
            .find(conversation_id)
            .ok_or_else(|| SkillSwapError::not_found("Conversation", conversation_id.to_string()))?
            .has_unread();
        let changed = self.activate(conversation_id);
        Ok(Selection {
            conversation_id,
            changed,
            needs_mark_read,
        })
    }

    /// Reconciles a "mark read" request.
    ///
    /// Success sets the unread count to zero; failure leaves it as it was.
    /// The selection is not touched either way.
    pub fn complete_mark_read(&mut self, conversation_id: ConversationId, result: Result<()>) {
        match result {
            Ok(()) => {
                if let Some(conversation) = self.find_mut(conversation_id) {
                    conversation.clear_unread();
                    tracing::debug!(
                        "[ConversationState] Conversation {} marked read",
                        conversation_id
                    );
                }
            }
            Err(err) => {
                tracing::warn!(
                    "[ConversationState] Failed to mark conversation {} read: {}",
                    conversation_id,
                    err
                );
                self.notices
                    .push(Notice::from_failure(&err, notice::MARK_READ_FAILED));
            }
        }
    }

    /// Reconciles a thread load; results for a conversation that is no longer
    /// active are dropped.
    pub fn complete_thread_load(
        &mut self,
        conversation_id: ConversationId,
        result: Result<Vec<Message>>,
    ) {
        if !self.thread.belongs_to(conversation_id) {
            tracing::debug!(
                "[ConversationState] Dropping stale messages of conversation {}",
                conversation_id
            );
            return;
        }
        match result {
            Ok(messages) => {
                let fetched: Vec<Message> = messages
                    .into_iter()
                    .filter(|m| m.conversation_id == conversation_id)
                    .collect();
                tracing::debug!(
                    conversation_id = %conversation_id,
                    count = fetched.len(),
                    "[ConversationState] Thread loaded"
                );
                self.thread.replace_history(fetched);
            }
            Err(err) => {
                tracing::warn!(
                    "[ConversationState] Failed to load messages of {}: {}",
                    conversation_id,
                    err
                );
                self.thread.clear_history();
                self.notices
                    .push(Notice::from_failure(&err, notice::LOAD_MESSAGES_FAILED));
            }
        }
    }

    // ============================================================================
    // Optimistic message send
    // ============================================================================

    /// Validates the send and shows the provisional message right away.
    ///
    /// Fails without touching any state when the text is blank, nobody is
    /// logged in, the sender is not the viewer, or the conversation is not
    /// the active one.
    pub fn begin_send(
        &mut self,
        conversation_id: ConversationId,
        sender_id: UserId,
        sender_name: &str,
        text: &str,
    ) -> Result<PendingMessage> {
        let viewer = self
            .viewer_id
            .ok_or_else(|| SkillSwapError::validation("No user is logged in"))?;
        if sender_id != viewer {
            return Err(SkillSwapError::validation(
                "Messages can only be sent as the logged-in user",
            ));
        }
        if self.active_id != Some(conversation_id) || !self.thread.belongs_to(conversation_id) {
            return Err(SkillSwapError::validation(
                "Messages can only be sent to the active conversation",
            ));
        }
        let request = NewMessage::new(conversation_id, sender_id, sender_name, text)?;

        let correlation_id = CorrelationId::new();
        self.thread.push(Message::provisional(&request, correlation_id));
        self.pending.insert(correlation_id, conversation_id);
        tracing::debug!(
            correlation_id = %correlation_id,
            conversation_id = %conversation_id,
            "[ConversationState] Provisional message applied"
        );

        Ok(PendingMessage {
            correlation_id,
            request,
        })
    }

    /// Resolves a send started by [`begin_send`](Self::begin_send).
    ///
    /// Success swaps the provisional message for the server copy in place;
    /// failure removes it and queues a notice. Either way only the message
    /// carrying `correlation_id` is touched.
    pub fn complete_send(
        &mut self,
        correlation_id: CorrelationId,
        result: Result<Message>,
    ) -> Result<Message> {
        if self.pending.remove(correlation_id).is_none() {
            tracing::warn!(
                "[ConversationState] Completion for unknown send {}",
                correlation_id
            );
        }
        match result {
            Ok(message) => {
                if !self.thread.confirm(correlation_id, message.clone()) {
                    tracing::debug!(
                        "[ConversationState] Send {} confirmed after its thread was closed",
                        correlation_id
                    );
                }
                Ok(message)
            }
            Err(err) => {
                self.thread.discard(correlation_id);
                tracing::warn!(
                    "[ConversationState] Send {} failed, provisional message removed: {}",
                    correlation_id,
                    err
                );
                self.notices.push(Notice::from_failure(&err, notice::SEND_FAILED));
                Err(err)
            }
        }
    }

    // ============================================================================
    // Ratings
    // ============================================================================

    /// Builds the rating request for a conversation the viewer has not rated.
    pub fn begin_rating(
        &self,
        conversation_id: ConversationId,
        score: u8,
        comment: Option<String>,
    ) -> Result<NewRating> {
        let viewer = self
            .viewer_id
            .ok_or_else(|| SkillSwapError::validation("Cannot submit rating. Missing information."))?;
        let conversation = self
            .find(conversation_id)
            .ok_or_else(|| SkillSwapError::not_found("Conversation", conversation_id.to_string()))?;
        let counterpart = conversation
            .counterpart()
            .ok_or_else(|| SkillSwapError::validation("Cannot submit rating. Missing information."))?;
        if conversation.is_rated_by_viewer() {
            return Err(SkillSwapError::validation(
                "This session has already been rated",
            ));
        }
        NewRating::new(viewer, counterpart.id, conversation_id, score, comment)
    }

    /// Marks exactly one conversation as rated when the submission succeeded.
    pub fn complete_rating(
        &mut self,
        conversation_id: ConversationId,
        result: Result<Rating>,
    ) -> Result<Rating> {
        match result {
            Ok(rating) => {
                if let Some(conversation) = self.find_mut(conversation_id) {
                    conversation.mark_rated();
                }
                self.notices.push(Notice::info(notice::RATING_THANKS));
                Ok(rating)
            }
            Err(err) => {
                tracing::warn!(
                    "[ConversationState] Rating for conversation {} failed: {}",
                    conversation_id,
                    err
                );
                self.notices.push(Notice::from_failure(&err, notice::RATING_FAILED));
                Err(err)
            }
        }
    }

    // ============================================================================
    // Conversation creation
    // ============================================================================

    /// Selects the existing chat with `counterpart`, or asks for one to be
    /// created. Never produces a second chat for the same pair.
    pub fn begin_conversation(&mut self, counterpart: UserId) -> Result<StartConversation> {
        let viewer = self
            .viewer_id
            .ok_or_else(|| SkillSwapError::validation("No user is logged in"))?;
        if counterpart == viewer {
            return Err(SkillSwapError::validation(
                "Cannot start a chat with yourself",
            ));
        }

        if let Some(existing) = self.find_pair(viewer, counterpart) {
            tracing::debug!(
                "[ConversationState] Reusing conversation {} with user {}",
                existing,
                counterpart
            );
            let changed = self.activate(existing);
            return Ok(StartConversation::Existing(Selection {
                conversation_id: existing,
                changed,
                needs_mark_read: false,
            }));
        }

        Ok(StartConversation::Create(NewConversation {
            initiator: viewer,
            counterpart,
        }))
    }

    /// Appends the created chat and makes it active.
    pub fn complete_conversation(
        &mut self,
        request: NewConversation,
        result: Result<RawConversation>,
    ) -> Result<Selection> {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    "[ConversationState] Failed to create conversation with {}: {}",
                    request.counterpart,
                    err
                );
                self.notices
                    .push(Notice::from_failure(&err, notice::START_CHAT_FAILED));
                return Err(err);
            }
        };

        if self.viewer_id != Some(request.initiator) {
            return Err(SkillSwapError::internal(
                "conversation created for a viewer that is no longer logged in",
            ));
        }

        let existing = self
            .find(raw.id)
            .map(Conversation::id)
            .or_else(|| self.find_pair(request.initiator, request.counterpart));
        let conversation_id = match existing {
            Some(id) => id,
            None => {
                let conversation = Conversation::annotate(raw, request.initiator);
                let id = conversation.id();
                self.conversations.push(conversation);
                tracing::debug!("[ConversationState] Conversation {} appended", id);
                id
            }
        };

        let changed = self.activate(conversation_id);
        Ok(Selection {
            conversation_id,
            changed,
            needs_mark_read: false,
        })
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn find_mut(&mut self, conversation_id: ConversationId) -> Option<&mut Conversation> {
        self.conversations
            .iter_mut()
            .find(|c| c.id() == conversation_id)
    }

    fn find_pair(&self, viewer: UserId, counterpart: UserId) -> Option<ConversationId> {
        self.conversations
            .iter()
            .find(|c| c.raw().is_between(viewer, counterpart))
            .map(Conversation::id)
    }

    /// Points the selection and thread at `conversation_id`; returns whether
    /// the active conversation changed.
    fn activate(&mut self, conversation_id: ConversationId) -> bool {
        if self.active_id == Some(conversation_id) {
            return false;
        }
        self.active_id = Some(conversation_id);
        self.thread.reset(Some(conversation_id));
        true
    }
}
