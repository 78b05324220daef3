use skillswap_core::ConversationId;
use skillswap_core::conversation::Conversation;

/// Picks the conversation to make active when none is.
///
/// Returns `current` untouched when a selection exists. Otherwise the first
/// conversation with unread messages wins, then the first conversation.
pub fn default_selection(
    conversations: &[Conversation],
    current: Option<ConversationId>,
) -> Option<ConversationId> {
    if current.is_some() {
        return current;
    }
    conversations
        .iter()
        .find(|c| c.has_unread())
        .or_else(|| conversations.first())
        .map(Conversation::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_core::UserId;
    use skillswap_core::conversation::{Participant, RawConversation};

    fn conversations(unread: &[(i64, u32)]) -> Vec<Conversation> {
        unread
            .iter()
            .map(|&(id, unread_count)| {
                Conversation::annotate(
                    RawConversation {
                        id: ConversationId(id),
                        participant_a: Participant::new(UserId(1), "viewer", None),
                        participant_b: Participant::new(UserId(100 + id), "other", None),
                        unread_count,
                        is_rated_by_viewer: false,
                        created_at: None,
                    },
                    UserId(1),
                )
            })
            .collect()
    }

    #[test]
    fn test_first_unread_wins() {
        let list = conversations(&[(10, 0), (11, 3), (12, 0)]);
        assert_eq!(default_selection(&list, None), Some(ConversationId(11)));
    }

    #[test]
    fn test_first_conversation_when_all_read() {
        let list = conversations(&[(10, 0), (11, 0), (12, 0)]);
        assert_eq!(default_selection(&list, None), Some(ConversationId(10)));
    }

    #[test]
    fn test_empty_list_keeps_selection_absent() {
        assert_eq!(default_selection(&[], None), None);
    }

    #[test]
    fn test_existing_selection_is_never_overridden() {
        let list = conversations(&[(10, 0), (11, 3), (12, 0)]);
        let once = default_selection(&list, Some(ConversationId(12)));
        let twice = default_selection(&list, once);
        assert_eq!(once, Some(ConversationId(12)));
        assert_eq!(twice, once);
    }
}
