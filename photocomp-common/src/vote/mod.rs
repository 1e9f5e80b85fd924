use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub vote_id: i64,
    /// Entry the vote was cast for.
    pub image_id: Uuid,
    /// Where the vote came from; one vote per address per entry.
    pub ip_address: String,
}
