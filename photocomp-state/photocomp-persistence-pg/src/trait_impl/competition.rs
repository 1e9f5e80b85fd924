use async_trait::async_trait;
use photocomp_common::{
    common::{ordering::SortOrder, pagination::Pagination},
    competition::{Competition, CompetitionStats, NewCompetition},
    error::Error,
    filter::CompetitionFilter,
    image_entry::ImageEntryStatus,
    order::CompetitionSortField,
    state::{CompetitionDbTrait, RowSource},
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use tracing::debug;

use crate::{
    db::PostgresStateDb,
    entities::{competition, image_entry, sea_orm_active_enums, vote},
    mapping::{
        competition_to_domain, db_error_to_domain, domain_competition_status_to_db,
        domain_image_entry_status_to_db, image_entry_status_to_domain,
    },
    query::{competition_condition, order_competitions},
};

#[async_trait]
impl RowSource<CompetitionSortField, CompetitionFilter> for PostgresStateDb {
    type Row = Competition;

    async fn count(&self, filter: &CompetitionFilter) -> Result<u64, Error> {
        competition::Entity::find()
            .filter(competition_condition(filter))
            .count(&self.conn)
            .await
            .map_err(db_error_to_domain)
    }

    async fn fetch_ordered(
        &self,
        pagination: &Pagination,
        sort_order: &SortOrder<CompetitionSortField>,
        filter: &CompetitionFilter,
    ) -> Result<Vec<Competition>, Error> {
        let select = competition::Entity::find().filter(competition_condition(filter));

        let models = order_competitions(select, sort_order)
            .offset(pagination.offset)
            .limit(pagination.limit)
            .all(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(models.into_iter().map(competition_to_domain).collect())
    }

    async fn fetch_all(&self, filter: &CompetitionFilter) -> Result<Vec<Competition>, Error> {
        let models = competition::Entity::find()
            .filter(competition_condition(filter))
            .order_by_asc(competition::Column::CompetitionId)
            .all(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(models.into_iter().map(competition_to_domain).collect())
    }
}

#[async_trait]
impl CompetitionDbTrait for PostgresStateDb {
    async fn get_competition(&self, competition_id: i32) -> Result<Option<Competition>, Error> {
        let maybe_model = competition::Entity::find_by_id(competition_id)
            .one(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        Ok(maybe_model.map(competition_to_domain))
    }

    async fn get_competition_stats(
        &self,
        competition_id: i32,
    ) -> Result<CompetitionStats, Error> {
        if self.get_competition(competition_id).await?.is_none() {
            return Err(Error::not_found("Competition", competition_id));
        }

        let per_status: Vec<(sea_orm_active_enums::ImageEntryStatus, i64)> =
            image_entry::Entity::find()
                .select_only()
                .column(image_entry::Column::Status)
                .column_as(image_entry::Column::ImageId.count(), "entry_count")
                .filter(image_entry::Column::CompetitionId.eq(competition_id))
                .group_by(image_entry::Column::Status)
                .into_tuple()
                .all(&self.conn)
                .await
                .map_err(db_error_to_domain)?;

        let mut stats = CompetitionStats::default();
        for (status, count) in per_status {
            let count = u64::try_from(count).unwrap_or(0);
            stats.image_entry_count += count;
            match image_entry_status_to_domain(status) {
                ImageEntryStatus::Unmoderated => stats.image_entry_unmoderated_count = count,
                ImageEntryStatus::Verified => stats.image_entry_verified_count = count,
                ImageEntryStatus::Hidden => stats.image_entry_hidden_count = count,
                ImageEntryStatus::Blocked => stats.image_entry_blocked_count = count,
            }
        }

        let votes: Option<(i64, i64)> = vote::Entity::find()
            .select_only()
            .column_as(vote::Column::VoteId.count(), "votes_count")
            .column_as(
                sea_orm::sea_query::Expr::col((vote::Entity, vote::Column::IpAddress))
                    .count_distinct(),
                "unique_voter_count",
            )
            .join(JoinType::InnerJoin, vote::Relation::ImageEntry.def())
            .filter(image_entry::Column::CompetitionId.eq(competition_id))
            .into_tuple()
            .one(&self.conn)
            .await
            .map_err(db_error_to_domain)?;

        if let Some((votes_count, unique_voter_count)) = votes {
            stats.votes_count = u64::try_from(votes_count).unwrap_or(0);
            stats.unique_voter_count = u64::try_from(unique_voter_count).unwrap_or(0);
        }

        Ok(stats)
    }

    async fn create_competition(&self, competition: NewCompetition) -> Result<Competition, Error> {
        let model = competition::ActiveModel {
            competition_id: NotSet,
            title: Set(competition.title),
            description: Set(competition.description),
            date_entries_close: Set(competition.date_entries_close.into()),
            date_votes_close: Set(competition.date_votes_close.into()),
            initial_status_of_images: Set(domain_image_entry_status_to_db(
                competition.initial_status_of_images,
            )),
            status: Set(domain_competition_status_to_db(competition.status)),
        }
        .insert(&self.conn)
        .await
        .map_err(db_error_to_domain)?;

        debug!(competition_id = model.competition_id, "competition created");

        Ok(competition_to_domain(model))
    }
}
