use serde::{Deserialize, Serialize};

/// Moderation and voting counters for a single competition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionStats {
    pub image_entry_count: u64,
    pub image_entry_unmoderated_count: u64,
    pub image_entry_verified_count: u64,
    pub image_entry_hidden_count: u64,
    pub image_entry_blocked_count: u64,
    pub votes_count: u64,
    pub unique_voter_count: u64,
}
