use async_trait::async_trait;
use photocomp_common::{
    common::{ordering::SortOrder, pagination::Pagination},
    error::Error,
    filter::ImageEntryFilter,
    image_entry::{ImageEntry, ImageEntryPatch, ImageEntryWithScore},
    order::{ImageEntrySortField, ImageEntryWithScoreSortField},
    state::{ImageEntryDbTrait, RowSource},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use crate::{
    db::PostgresStateDb,
    entities::{competition, image_entry},
    mapping::{
        ScoredImageEntryRow, db_error_to_domain, db_write_error_to_domain,
        domain_image_entry_status_to_db, image_entry_to_domain, scored_image_entry_to_domain,
    },
    query::{
        image_entry_condition, order_by_submission, order_image_entries,
        order_scored_image_entries, scored_image_entries,
    },
};

async fn count_image_entries(
    db: &PostgresStateDb,
    filter: &ImageEntryFilter,
) -> Result<u64, Error> {
    image_entry::Entity::find()
        .filter(image_entry_condition(filter))
        .count(&db.conn)
        .await
        .map_err(db_error_to_domain)
}

#[async_trait]
impl RowSource<ImageEntrySortField, ImageEntryFilter> for PostgresStateDb {
    type Row = ImageEntry;

    async fn count(&self, filter: &ImageEntryFilter) -> Result<u64, Error> {
        count_image_entries(self, filter).await
    }

    async fn fetch_ordered(
        &self,
        pagination: &Pagination,
        sort_order: &SortOrder<ImageEntrySortField>,
        filter: &ImageEntryFilter,
    ) -> Result<Vec<ImageEntry>, Error> {
        let select = image_entry::Entity::find().filter(image_entry_condition(filter));

        let models = order_image_entries(select, sort_order)
            .offset(pagination.offset)
            .limit(pagination.limit)
            .all(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(models.into_iter().map(image_entry_to_domain).collect())
    }

    async fn fetch_all(&self, filter: &ImageEntryFilter) -> Result<Vec<ImageEntry>, Error> {
        let select = image_entry::Entity::find().filter(image_entry_condition(filter));

        let models = order_by_submission(select)
            .all(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(models.into_iter().map(image_entry_to_domain).collect())
    }
}

#[async_trait]
impl RowSource<ImageEntryWithScoreSortField, ImageEntryFilter> for PostgresStateDb {
    type Row = ImageEntryWithScore;

    async fn count(&self, filter: &ImageEntryFilter) -> Result<u64, Error> {
        count_image_entries(self, filter).await
    }

    async fn fetch_ordered(
        &self,
        pagination: &Pagination,
        sort_order: &SortOrder<ImageEntryWithScoreSortField>,
        filter: &ImageEntryFilter,
    ) -> Result<Vec<ImageEntryWithScore>, Error> {
        let select = scored_image_entries().filter(image_entry_condition(filter));

        let rows = order_scored_image_entries(select, sort_order)
            .offset(pagination.offset)
            .limit(pagination.limit)
            .into_model::<ScoredImageEntryRow>()
            .all(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(rows.into_iter().map(scored_image_entry_to_domain).collect())
    }

    async fn fetch_all(&self, filter: &ImageEntryFilter) -> Result<Vec<ImageEntryWithScore>, Error> {
        let select = scored_image_entries().filter(image_entry_condition(filter));

        let rows = order_by_submission(select)
            .into_model::<ScoredImageEntryRow>()
            .all(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(rows.into_iter().map(scored_image_entry_to_domain).collect())
    }
}

#[async_trait]
impl ImageEntryDbTrait for PostgresStateDb {
    async fn get_image_entry(&self, image_id: Uuid) -> Result<Option<ImageEntry>, Error> {
        let maybe_model = image_entry::Entity::find_by_id(image_id)
            .one(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(maybe_model.map(image_entry_to_domain))
    }

    async fn get_image_entry_with_score(
        &self,
        image_id: Uuid,
    ) -> Result<Option<ImageEntryWithScore>, Error> {
        let maybe_row = scored_image_entries()
            .filter(image_entry::Column::ImageId.eq(image_id))
            .into_model::<ScoredImageEntryRow>()
            .one(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(maybe_row.map(scored_image_entry_to_domain))
    }

    async fn create_image_entry(&self, entry: ImageEntry) -> Result<ImageEntry, Error> {
        let competition_exists = competition::Entity::find_by_id(entry.competition_id)
            .count(&self.conn)
            .await
            .map_err(db_error_to_domain)?
            > 0;

        if !competition_exists {
            return Err(Error::not_found("Competition", entry.competition_id));
        }

        let image_id = entry.image_id;
        let model = image_entry::ActiveModel {
            image_id: Set(entry.image_id),
            competition_id: Set(entry.competition_id),
            first_name: Set(entry.first_name),
            last_name: Set(entry.last_name),
            email: Set(entry.email),
            description: Set(entry.description),
            status: Set(domain_image_entry_status_to_db(entry.status)),
            date_submitted: Set(entry.date_submitted.into()),
            ip_address: Set(entry.ip_address),
            image_extension: Set(entry.image_extension),
            third_party_opt_in: Set(entry.third_party_opt_in),
        }
        .insert(&self.conn)
        .await
        .map_err(|e| {
            db_write_error_to_domain(e, || format!("Image entry {image_id} already exists"))
        })?;

        Ok(image_entry_to_domain(model))
    }

    async fn patch_image_entry(
        &self,
        image_id: Uuid,
        patch: &ImageEntryPatch,
    ) -> Result<ImageEntry, Error> {
        let model = image_entry::Entity::find_by_id(image_id)
            .one(&self.conn)
            .await
            .map_err(db_error_to_domain)?
            .ok_or_else(|| Error::not_found("ImageEntry", image_id))?;

        if !patch.contains_update() {
            return Ok(image_entry_to_domain(model));
        }

        let mut active = model.into_active_model();
        if let Some(first_name) = &patch.first_name {
            active.first_name = Set(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            active.last_name = Set(last_name.clone());
        }
        if let Some(email) = &patch.email {
            active.email = Set(email.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(status) = patch.status {
            active.status = Set(domain_image_entry_status_to_db(status));
        }

        let updated = active
            .update(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(image_entry_to_domain(updated))
    }
}
