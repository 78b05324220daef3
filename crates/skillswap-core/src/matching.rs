//! Match suggestion models.

use crate::user::UserProfile;
use serde::{Deserialize, Serialize};

/// A candidate whose skills complement the viewer's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Viewer skills the candidate wants to learn
    #[serde(default)]
    pub offer_matches: Vec<String>,
    /// Candidate skills the viewer wants to learn
    #[serde(default)]
    pub learn_matches: Vec<String>,
}

/// Result of a match lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchList {
    #[serde(default)]
    pub matches: Vec<MatchSuggestion>,
    /// Whether the server used AI skill matching for this list
    #[serde(default)]
    pub ai_enabled: bool,
}
