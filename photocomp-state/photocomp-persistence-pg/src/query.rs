//! Select builders shared by the row source impls.

use photocomp_common::{
    common::ordering::{SortDirection, SortField, SortOrder},
    filter::{CompetitionFilter, ImageEntryFilter},
    order::{CompetitionSortField, ImageEntrySortField, ImageEntryWithScoreSortField},
};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, Order, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
    sea_query::{Alias, Expr, SimpleExpr},
};

use crate::{
    entities::{competition, image_entry, vote},
    mapping::{domain_competition_status_to_db, domain_image_entry_status_to_db},
};

pub(crate) const SCORE_ALIAS: &str = "score";

pub(crate) fn competition_condition(filter: &CompetitionFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(statuses) = &filter.statuses {
        condition = condition.add(
            competition::Column::Status.is_in(
                statuses
                    .iter()
                    .map(|s| domain_competition_status_to_db(*s))
                    .collect::<Vec<_>>(),
            ),
        );
    }

    condition
}

pub(crate) fn image_entry_condition(filter: &ImageEntryFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(competition_ids) = &filter.competition_ids {
        condition =
            condition.add(image_entry::Column::CompetitionId.is_in(competition_ids.clone()));
    }

    if let Some(statuses) = &filter.statuses {
        condition = condition.add(
            image_entry::Column::Status.is_in(
                statuses
                    .iter()
                    .map(|s| domain_image_entry_status_to_db(*s))
                    .collect::<Vec<_>>(),
            ),
        );
    }

    condition
}

/// `image_entry` rows with their vote count selected as [SCORE_ALIAS].
pub(crate) fn scored_image_entries() -> Select<image_entry::Entity> {
    image_entry::Entity::find()
        .column_as(vote::Column::VoteId.count(), SCORE_ALIAS)
        .join(JoinType::LeftJoin, image_entry::Relation::Vote.def())
        .group_by(image_entry::Column::ImageId)
}

fn order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Ascending => Order::Asc,
        SortDirection::Descending => Order::Desc,
    }
}

fn column<C: ColumnTrait>(column: C) -> SimpleExpr {
    Expr::col((C::EntityName::default(), column)).into()
}

/// Statuses are postgres enums; order by their text so the result
/// matches the wire names rather than the enum declaration order.
fn status_as_text() -> SimpleExpr {
    Expr::col((image_entry::Entity, image_entry::Column::Status)).cast_as(Alias::new("text"))
}

fn apply_order<E, F>(
    mut select: Select<E>,
    sort_order: &SortOrder<F>,
    to_expr: impl Fn(F) -> Option<SimpleExpr>,
) -> Select<E>
where
    E: EntityTrait,
    F: SortField,
{
    for (field, direction) in sort_order.iter() {
        if let Some(expr) = to_expr(field) {
            select = select.order_by(expr, order(direction));
        }
    }
    select
}

pub(crate) fn order_competitions(
    select: Select<competition::Entity>,
    sort_order: &SortOrder<CompetitionSortField>,
) -> Select<competition::Entity> {
    apply_order(select, sort_order, |field| {
        Some(match field {
            CompetitionSortField::Id => column(competition::Column::CompetitionId),
            CompetitionSortField::DateEntriesClose => {
                column(competition::Column::DateEntriesClose)
            }
            CompetitionSortField::DateVotesClose => column(competition::Column::DateVotesClose),
        })
    })
}

pub(crate) fn order_image_entries(
    select: Select<image_entry::Entity>,
    sort_order: &SortOrder<ImageEntrySortField>,
) -> Select<image_entry::Entity> {
    apply_order(select, sort_order, |field| match field {
        ImageEntrySortField::FirstName => Some(column(image_entry::Column::FirstName)),
        ImageEntrySortField::LastName => Some(column(image_entry::Column::LastName)),
        ImageEntrySortField::Status => Some(status_as_text()),
        ImageEntrySortField::DateSubmitted => Some(column(image_entry::Column::DateSubmitted)),
        ImageEntrySortField::Rand => None,
    })
}

pub(crate) fn order_scored_image_entries(
    select: Select<image_entry::Entity>,
    sort_order: &SortOrder<ImageEntryWithScoreSortField>,
) -> Select<image_entry::Entity> {
    apply_order(select, sort_order, |field| match field {
        ImageEntryWithScoreSortField::FirstName => Some(column(image_entry::Column::FirstName)),
        ImageEntryWithScoreSortField::LastName => Some(column(image_entry::Column::LastName)),
        ImageEntryWithScoreSortField::Status => Some(status_as_text()),
        ImageEntryWithScoreSortField::DateSubmitted => {
            Some(column(image_entry::Column::DateSubmitted))
        }
        ImageEntryWithScoreSortField::Score => Some(Expr::col(Alias::new(SCORE_ALIAS)).into()),
        ImageEntryWithScoreSortField::Rand => None,
    })
}

/// Natural order of the random-mode base set.
/// ---
/// Must be total: the shuffle indexes into this sequence across requests.
pub(crate) fn order_by_submission(
    select: Select<image_entry::Entity>,
) -> Select<image_entry::Entity> {
    select
        .order_by_asc(image_entry::Column::DateSubmitted)
        .order_by_asc(image_entry::Column::ImageId)
}

#[cfg(test)]
mod tests {
    use photocomp_common::image_entry::ImageEntryStatus;
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    fn sql<E: EntityTrait>(select: Select<E>) -> String {
        select.build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn test_order_follows_sort_priority() {
        let sort_order =
            SortOrder::<ImageEntrySortField>::from_csv(Some("status,-dateSubmitted")).unwrap();
        let sql = sql(order_image_entries(image_entry::Entity::find(), &sort_order));
        let order_by = sql.split("ORDER BY").nth(1).unwrap_or_default();

        let status = order_by.find("CAST(\"image_entry\".\"status\" AS");
        let date = order_by.find("\"image_entry\".\"date_submitted\" DESC");
        assert!(status.is_some() && date.is_some(), "{sql}");
        assert!(status < date, "{sql}");
    }

    #[test]
    fn test_empty_order_adds_no_clause() {
        let sql = sql(order_competitions(
            competition::Entity::find(),
            &SortOrder::empty(),
        ));
        assert!(!sql.contains("ORDER BY"), "{sql}");
    }

    #[test]
    fn test_score_orders_by_alias() {
        let sort_order =
            SortOrder::<ImageEntryWithScoreSortField>::from_csv(Some("-score")).unwrap();
        let sql = sql(order_scored_image_entries(scored_image_entries(), &sort_order));

        assert!(sql.contains(r#"COUNT("vote"."vote_id") AS "score""#), "{sql}");
        assert!(sql.contains(r#"LEFT JOIN "vote""#), "{sql}");
        assert!(sql.contains(r#"GROUP BY "image_entry"."image_id""#), "{sql}");
        assert!(sql.ends_with(r#"ORDER BY "score" DESC"#), "{sql}");
    }

    #[test]
    fn test_image_entry_condition() {
        let filter = ImageEntryFilter {
            competition_ids: Some(vec![4]),
            statuses: Some(vec![ImageEntryStatus::Verified]),
        };
        let sql = sql(image_entry::Entity::find().filter(image_entry_condition(&filter)));

        assert!(sql.contains(r#""image_entry"."competition_id" IN (4)"#), "{sql}");
        assert!(sql.contains("STATUS_VERIFIED"), "{sql}");
    }

    #[test]
    fn test_unrestricted_filter_has_no_where() {
        let sql = sql(image_entry::Entity::find().filter(image_entry_condition(
            &ImageEntryFilter::default(),
        )));
        assert!(!sql.contains("WHERE"), "{sql}");
    }
}
