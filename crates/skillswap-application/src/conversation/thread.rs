//! The message thread of the active conversation.

use skillswap_core::conversation::{DeliveryStatus, Message};
use skillswap_core::{ConversationId, CorrelationId, MessageId};
use std::collections::HashSet;

/// Messages of the active conversation.
///
/// Provisional messages are found by their correlation id, never by
/// position: other messages may be inserted or removed while a send is in
/// flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageThread {
    conversation_id: Option<ConversationId>,
    messages: Vec<Message>,
    loaded: bool,
}

impl MessageThread {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn belongs_to(&self, conversation_id: ConversationId) -> bool {
        self.conversation_id == Some(conversation_id)
    }

    /// Drops every message and points the thread at `conversation_id`.
    pub fn reset(&mut self, conversation_id: Option<ConversationId>) {
        self.conversation_id = conversation_id;
        self.messages.clear();
        self.loaded = false;
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Swaps the provisional message in place for the server copy.
    ///
    /// When a reload already brought in the server copy, the provisional
    /// message is dropped instead. Returns false when no provisional message
    /// carries `correlation_id`.
    pub fn confirm(&mut self, correlation_id: CorrelationId, mut confirmed: Message) -> bool {
        let Some(index) = self.position_of(correlation_id) else {
            return false;
        };
        let already_fetched = confirmed
            .id
            .is_some_and(|id| self.messages.iter().any(|m| m.id == Some(id)));
        if already_fetched {
            self.messages.remove(index);
        } else {
            confirmed.status = DeliveryStatus::Confirmed;
            self.messages[index] = confirmed;
        }
        true
    }

    /// Removes the provisional message carrying `correlation_id`.
    pub fn discard(&mut self, correlation_id: CorrelationId) -> bool {
        match self.position_of(correlation_id) {
            Some(index) => {
                self.messages.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the confirmed history with `fetched`.
    ///
    /// Messages confirmed locally that the fetch does not know yet follow the
    /// fetched ones, then the provisional messages still waiting for their
    /// send.
    pub fn replace_history(&mut self, fetched: Vec<Message>) {
        let fetched_ids: HashSet<MessageId> = fetched.iter().filter_map(|m| m.id).collect();
        let (provisional, confirmed): (Vec<Message>, Vec<Message>) = self
            .messages
            .drain(..)
            .partition(Message::is_provisional);

        self.messages = fetched;
        self.messages.extend(
            confirmed
                .into_iter()
                .filter(|m| m.id.is_some_and(|id| !fetched_ids.contains(&id))),
        );
        self.messages.extend(provisional);
        self.loaded = true;
    }

    /// Keeps only provisional messages (used when a load failed).
    pub fn clear_history(&mut self) {
        self.messages.retain(Message::is_provisional);
    }

    fn position_of(&self, correlation_id: CorrelationId) -> Option<usize> {
        self.messages
            .iter()
            .position(|m| m.correlation_id() == Some(correlation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_core::conversation::NewMessage;
    use skillswap_core::UserId;

    fn draft(text: &str) -> NewMessage {
        NewMessage::new(ConversationId(4), UserId(1), "Ada", text).unwrap()
    }

    fn stored(id: i64, text: &str) -> Message {
        let mut message = Message::provisional(&draft(text), CorrelationId::new());
        message.id = Some(MessageId(id));
        message.status = DeliveryStatus::Confirmed;
        message
    }

    #[test]
    fn test_confirm_keeps_position() {
        let mut thread = MessageThread::default();
        thread.reset(Some(ConversationId(4)));
        let first = CorrelationId::new();
        let second = CorrelationId::new();
        thread.push(Message::provisional(&draft("one"), first));
        thread.push(Message::provisional(&draft("two"), second));

        assert!(thread.confirm(first, stored(10, "one")));

        assert_eq!(thread.messages()[0].id, Some(MessageId(10)));
        assert_eq!(thread.messages()[1].correlation_id(), Some(second));
        assert!(!thread.confirm(first, stored(10, "one")));
    }

    #[test]
    fn test_discard_only_touches_its_message() {
        let mut thread = MessageThread::default();
        thread.reset(Some(ConversationId(4)));
        thread.push(stored(1, "kept"));
        let doomed = CorrelationId::new();
        thread.push(Message::provisional(&draft("kept"), doomed));

        assert!(thread.discard(doomed));
        assert_eq!(thread.messages().len(), 1);
        assert_eq!(thread.messages()[0].id, Some(MessageId(1)));
        assert!(!thread.discard(doomed));
    }

    #[test]
    fn test_failed_load_keeps_only_provisional() {
        let mut thread = MessageThread::default();
        thread.reset(Some(ConversationId(4)));
        thread.replace_history(vec![stored(1, "old")]);
        let pending = CorrelationId::new();
        thread.push(Message::provisional(&draft("new"), pending));

        thread.clear_history();

        assert_eq!(thread.messages().len(), 1);
        assert_eq!(thread.messages()[0].correlation_id(), Some(pending));
        assert!(thread.is_loaded());
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut thread = MessageThread::default();
        thread.reset(Some(ConversationId(4)));
        thread.replace_history(vec![stored(1, "old")]);

        thread.reset(Some(ConversationId(5)));

        assert!(thread.messages().is_empty());
        assert!(!thread.is_loaded());
        assert!(thread.belongs_to(ConversationId(5)));
    }
}
