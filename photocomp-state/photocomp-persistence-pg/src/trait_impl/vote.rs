use async_trait::async_trait;
use photocomp_common::{error::Error, state::VoteDbTrait, vote::Vote};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    EntityTrait, PaginatorTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    db::PostgresStateDb,
    entities::{image_entry, vote},
    mapping::{db_error_to_domain, db_write_error_to_domain, vote_to_domain},
};

#[async_trait]
impl VoteDbTrait for PostgresStateDb {
    async fn add_vote(&self, image_id: Uuid, ip_address: &str) -> Result<Vote, Error> {
        let entry_exists = image_entry::Entity::find_by_id(image_id)
            .count(&self.conn)
            .await
            .map_err(db_error_to_domain)?
            > 0;

        if !entry_exists {
            return Err(Error::not_found("ImageEntry", image_id));
        }

        // The unique (image_id, ip_address) index settles concurrent duplicates.
        let model = vote::ActiveModel {
            vote_id: NotSet,
            image_id: Set(image_id),
            ip_address: Set(ip_address.to_string()),
        }
        .insert(&self.conn)
        .await
        .map_err(|e| {
            db_write_error_to_domain(e, || {
                format!("{ip_address} already voted for image entry {image_id}")
            })
        })?;

        debug!(vote_id = model.vote_id, %image_id, "vote recorded");

        Ok(vote_to_domain(model))
    }
}
