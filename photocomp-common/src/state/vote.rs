use async_trait::async_trait;
use uuid::Uuid;

use crate::{error::Error, vote::Vote};

use super::base::BaseDbTrait;

#[async_trait]
pub trait VoteDbTrait: BaseDbTrait {
    /// Records one vote for `image_id` from `ip_address`.
    /// ---
    /// Only checks referential integrity: `NotFound` for an unknown entry
    /// and `Conflict` when the address already voted for it.
    /// Whether voting is open is decided by the caller.
    async fn add_vote(&self, image_id: Uuid, ip_address: &str) -> Result<Vote, Error>;
}
