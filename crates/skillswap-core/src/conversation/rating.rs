//! Post-session ratings.

use crate::error::{Result, SkillSwapError};
use crate::ids::{ConversationId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lowest and highest star score.
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Payload of a "submit rating" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub rater_id: UserId,
    pub rated_id: UserId,
    pub conversation_id: ConversationId,
    pub score: u8,
    pub comment: Option<String>,
}

impl NewRating {
    pub fn new(
        rater_id: UserId,
        rated_id: UserId,
        conversation_id: ConversationId,
        score: u8,
        comment: Option<String>,
    ) -> Result<Self> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(SkillSwapError::validation(format!(
                "Rating must be between {MIN_SCORE} and {MAX_SCORE} stars"
            )));
        }
        if rater_id == rated_id {
            return Err(SkillSwapError::validation("Users cannot rate themselves"));
        }
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Ok(Self {
            rater_id,
            rated_id,
            conversation_id,
            score,
            comment,
        })
    }
}

/// A rating stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub id: i64,
    pub rater_id: UserId,
    pub rated_id: UserId,
    pub conversation_id: ConversationId,
    pub rater_name: Option<String>,
    pub score: u8,
    pub comment: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}
