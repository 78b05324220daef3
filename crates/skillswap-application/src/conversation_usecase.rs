//! Conversation use case implementation.
//!
//! `ConversationUseCase` drives the [`ConversationState`] reducer against the
//! remote API. Every operation follows the same shape: take the write lock,
//! run the synchronous `begin_*` step, release the lock, await the network
//! call, then take the lock again for the `complete_*` step. The lock is never
//! held across an await on the API, so overlapping operations interleave
//! freely and each completion reconciles only the state it owns.

use crate::conversation::{ConversationSnapshot, ConversationState, Selection, StartConversation};
use crate::notice::{self, Notice};
use skillswap_core::conversation::{Message, Rating};
use skillswap_core::{ConversationId, Result, SkillExchangeApi, SkillSwapError, UserId};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Use case for the viewer's chats: listing, selection, messaging, ratings.
///
/// # Thread Safety
///
/// The state lives behind an `Arc<RwLock<_>>`; the use case itself can be
/// shared through an `Arc` and called from concurrent tasks.
pub struct ConversationUseCase {
    api: Arc<dyn SkillExchangeApi>,
    state: Arc<RwLock<ConversationState>>,
}

impl ConversationUseCase {
    pub fn new(api: Arc<dyn SkillExchangeApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ConversationState::default())),
        }
    }

    /// Drops all conversation state and starts over for `viewer`.
    pub async fn reset(&self, viewer: Option<UserId>) {
        self.state.write().await.reset(viewer);
    }

    pub async fn viewer_id(&self) -> Option<UserId> {
        self.state.read().await.viewer_id()
    }

    pub async fn active_id(&self) -> Option<ConversationId> {
        self.state.read().await.active_id()
    }

    pub async fn snapshot(&self) -> ConversationSnapshot {
        self.state.read().await.snapshot()
    }

    /// Drains the notices queued since the last call.
    pub async fn take_notices(&self) -> Vec<Notice> {
        self.state.write().await.take_notices()
    }

    pub async fn push_notice(&self, notice: Notice) {
        self.state.write().await.push_notice(notice);
    }

    // ============================================================================
    // Listing and selection
    // ============================================================================

    /// Reloads the conversation list for the current viewer.
    ///
    /// When the default-selection policy picks a conversation, its thread is
    /// loaded as well. No "mark read" request is issued for a default pick.
    pub async fn refresh(&self) -> Result<()> {
        let viewer = self.require_viewer().await?;
        tracing::debug!("[ConversationUseCase] Refreshing conversations for {}", viewer);

        let result = self.api.list_conversations(viewer).await;
        let selected = {
            let mut state = self.state.write().await;
            match result {
                Ok(raw) => state.replace_conversations(viewer, &raw),
                Err(err) => {
                    state.fail_refresh(&err);
                    return Err(err);
                }
            }
        };

        if let Some(conversation_id) = selected {
            self.load_thread(conversation_id).await;
        }
        Ok(())
    }

    /// Makes a conversation active, loading its thread and marking it read.
    ///
    /// The thread load and the "mark read" request run concurrently; a failed
    /// "mark read" keeps the unread count and the selection.
    pub async fn select(&self, conversation_id: ConversationId) -> Result<()> {
        let selection = self.state.write().await.select(conversation_id)?;
        tracing::info!(
            "[ConversationUseCase] Selected conversation {} (changed: {}, unread: {})",
            conversation_id,
            selection.changed,
            selection.needs_mark_read
        );
        self.follow_up(selection).await;
        Ok(())
    }

    /// Fetches the messages of `conversation_id`.
    ///
    /// A result arriving after another conversation became active is dropped.
    pub async fn load_thread(&self, conversation_id: ConversationId) {
        let result = self.api.list_messages(conversation_id).await;
        self.state
            .write()
            .await
            .complete_thread_load(conversation_id, result);
    }

    // ============================================================================
    // Messaging
    // ============================================================================

    /// Sends a message optimistically.
    ///
    /// The provisional message is visible in the thread before the request
    /// leaves; it is confirmed in place or removed when the server answers.
    pub async fn send_message(
        &self,
        conversation_id: ConversationId,
        sender_id: UserId,
        sender_name: &str,
        text: &str,
    ) -> Result<Message> {
        let pending = self
            .state
            .write()
            .await
            .begin_send(conversation_id, sender_id, sender_name, text)?;

        let result = self.api.create_message(&pending.request).await;
        self.state
            .write()
            .await
            .complete_send(pending.correlation_id, result)
    }

    // ============================================================================
    // Ratings
    // ============================================================================

    pub async fn submit_rating(
        &self,
        conversation_id: ConversationId,
        score: u8,
        comment: Option<String>,
    ) -> Result<Rating> {
        let request = {
            let mut state = self.state.write().await;
            match state.begin_rating(conversation_id, score, comment) {
                Ok(request) => request,
                Err(err) => {
                    state.push_notice(Notice::from_failure(&err, notice::RATING_FAILED));
                    return Err(err);
                }
            }
        };

        let result = self.api.submit_rating(&request).await;
        self.state
            .write()
            .await
            .complete_rating(conversation_id, result)
    }

    // ============================================================================
    // Conversation creation
    // ============================================================================

    /// Opens the chat with `counterpart`, creating it only when none exists.
    ///
    /// Returns the id of the chat that is now active.
    pub async fn start_conversation(&self, counterpart: UserId) -> Result<ConversationId> {
        let start = self.state.write().await.begin_conversation(counterpart)?;

        let selection = match start {
            StartConversation::Existing(selection) => selection,
            StartConversation::Create(request) => {
                tracing::info!(
                    "[ConversationUseCase] Creating conversation {} <-> {}",
                    request.initiator,
                    request.counterpart
                );
                let result = self.api.create_conversation(&request).await;
                self.state
                    .write()
                    .await
                    .complete_conversation(request, result)?
            }
        };

        self.follow_up(selection).await;
        Ok(selection.conversation_id)
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn require_viewer(&self) -> Result<UserId> {
        self.viewer_id()
            .await
            .ok_or_else(|| SkillSwapError::validation("No user is logged in"))
    }

    async fn follow_up(&self, selection: Selection) {
        let conversation_id = selection.conversation_id;
        let load = async {
            if selection.changed {
                self.load_thread(conversation_id).await;
            }
        };
        let mark_read = async {
            if selection.needs_mark_read {
                self.mark_read(conversation_id).await;
            }
        };
        tokio::join!(load, mark_read);
    }

    async fn mark_read(&self, conversation_id: ConversationId) {
        let Some(viewer) = self.viewer_id().await else {
            return;
        };
        let result = self.api.mark_read(conversation_id, viewer).await;
        self.state
            .write()
            .await
            .complete_mark_read(conversation_id, result);
    }
}
