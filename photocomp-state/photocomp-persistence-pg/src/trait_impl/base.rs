use async_trait::async_trait;
use photocomp_common::{error::Error, state::BaseDbTrait};

use crate::{db::PostgresStateDb, mapping::db_error_to_domain};

#[async_trait]
impl BaseDbTrait for PostgresStateDb {
    async fn health_check(&self) -> Result<(), Error> {
        self.conn.ping().await.map_err(db_error_to_domain)
    }
}
