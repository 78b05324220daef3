use skillswap_core::UserId;
use skillswap_core::conversation::{Conversation, RawConversation};

/// Annotates raw chat records with the viewer's counterpart, keeping order.
///
/// A record that does not involve the viewer is passed through without a
/// counterpart instead of failing the batch.
pub fn normalize_conversations(viewer: UserId, raw: &[RawConversation]) -> Vec<Conversation> {
    raw.iter()
        .map(|record| {
            let conversation = Conversation::annotate(record.clone(), viewer);
            if conversation.counterpart().is_none() {
                tracing::warn!(
                    conversation_id = %record.id,
                    viewer_id = %viewer,
                    "[Normalizer] Chat record does not involve the viewer, passing through unannotated"
                );
            }
            conversation
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_core::ConversationId;
    use skillswap_core::conversation::Participant;

    fn record(id: i64, a: i64, b: i64) -> RawConversation {
        RawConversation {
            id: ConversationId(id),
            participant_a: Participant::new(UserId(a), format!("name{a}"), Some(format!("a{a}.png"))),
            participant_b: Participant::new(UserId(b), format!("name{b}"), None),
            unread_count: 0,
            is_rated_by_viewer: false,
            created_at: None,
        }
    }

    #[test]
    fn test_counterpart_matches_non_viewer_slot() {
        let raw = vec![record(10, 1, 2), record(11, 3, 1), record(12, 1, 4)];
        let normalized = normalize_conversations(UserId(1), &raw);

        let counterparts: Vec<_> = normalized
            .iter()
            .map(|c| c.counterpart().map(|p| p.id))
            .collect();
        assert_eq!(
            counterparts,
            vec![Some(UserId(2)), Some(UserId(3)), Some(UserId(4))]
        );

        let second = normalized[1].counterpart().unwrap();
        assert_eq!(second.name, "name3");
        assert_eq!(second.avatar.as_deref(), Some("a3.png"));
    }

    #[test]
    fn test_malformed_record_does_not_block_batch() {
        let raw = vec![record(10, 1, 2), record(11, 7, 8), record(12, 9, 1)];
        let normalized = normalize_conversations(UserId(1), &raw);

        assert_eq!(normalized.len(), 3);
        assert!(normalized[1].counterpart().is_none());
        assert_eq!(normalized[2].counterpart().unwrap().id, UserId(9));
    }

    #[test]
    fn test_input_is_left_untouched() {
        let raw = vec![record(10, 1, 2)];
        let before = raw.clone();
        let _ = normalize_conversations(UserId(1), &raw);
        assert_eq!(raw, before);
    }
}
