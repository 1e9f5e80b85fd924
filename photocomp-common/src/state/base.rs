use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::Error;

#[async_trait]
pub trait BaseDbTrait: Send + Sync + Debug + 'static {
    /// Round-trips the backing store.
    /// ---
    /// Used by the `healthcheck` endpoint; must not touch any table.
    async fn health_check(&self) -> Result<(), Error>;
}
