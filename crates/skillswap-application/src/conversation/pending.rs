use skillswap_core::{ConversationId, CorrelationId};
use std::collections::HashMap;

/// In-flight message sends, keyed by the correlation id of their provisional
/// message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSends {
    sends: HashMap<CorrelationId, ConversationId>,
}

impl PendingSends {
    pub fn insert(&mut self, correlation_id: CorrelationId, conversation_id: ConversationId) {
        self.sends.insert(correlation_id, conversation_id);
    }

    /// Removes the entry and returns the conversation it was sent to.
    pub fn remove(&mut self, correlation_id: CorrelationId) -> Option<ConversationId> {
        self.sends.remove(&correlation_id)
    }

    pub fn count(&self) -> usize {
        self.sends.len()
    }
}
