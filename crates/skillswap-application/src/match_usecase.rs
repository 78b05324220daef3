//! Match suggestions and the card carousel that pages through them.

use skillswap_core::matching::{MatchList, MatchSuggestion};
use skillswap_core::{SkillExchangeApi, UserId};
use std::sync::Arc;

/// Number of match cards visible at once.
pub const CARDS_PER_VIEW: usize = 3;

pub struct MatchUseCase {
    api: Arc<dyn SkillExchangeApi>,
}

impl MatchUseCase {
    pub fn new(api: Arc<dyn SkillExchangeApi>) -> Self {
        Self { api }
    }

    /// Loads the suggestions for `viewer`. A failed lookup yields an empty list.
    pub async fn load(&self, viewer: UserId) -> MatchList {
        match self.api.list_matches(viewer).await {
            Ok(list) => {
                tracing::debug!(
                    count = list.matches.len(),
                    ai_enabled = list.ai_enabled,
                    "[MatchUseCase] Matches loaded"
                );
                list
            }
            Err(err) => {
                tracing::warn!("[MatchUseCase] Failed to load matches for {}: {}", viewer, err);
                MatchList::default()
            }
        }
    }
}

/// A window of [`CARDS_PER_VIEW`] cards over the match list.
#[derive(Debug, Clone, Default)]
pub struct MatchCarousel {
    matches: Vec<MatchSuggestion>,
    start: usize,
}

impl MatchCarousel {
    pub fn new(matches: Vec<MatchSuggestion>) -> Self {
        Self { matches, start: 0 }
    }

    pub fn start_index(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn visible(&self) -> &[MatchSuggestion] {
        let end = (self.start + CARDS_PER_VIEW).min(self.matches.len());
        &self.matches[self.start.min(end)..end]
    }

    /// Advances one page, stopping where the last page is full.
    pub fn next(&mut self) {
        let last_start = self.matches.len().saturating_sub(CARDS_PER_VIEW);
        self.start = (self.start + CARDS_PER_VIEW).min(last_start);
    }

    pub fn prev(&mut self) {
        self.start = self.start.saturating_sub(CARDS_PER_VIEW);
    }
}
