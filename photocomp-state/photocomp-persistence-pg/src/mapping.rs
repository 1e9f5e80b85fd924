use photocomp_common::{
    competition::{Competition, CompetitionStatus},
    error::Error,
    image_entry::{ImageEntry, ImageEntryStatus, ImageEntryWithScore},
    vote::Vote,
};
use sea_orm::{DbErr, FromQueryResult, SqlErr, prelude::DateTimeWithTimeZone};
use uuid::Uuid;

use crate::entities::{competition, image_entry, sea_orm_active_enums, vote};

pub(crate) fn db_error_to_domain(e: DbErr) -> Error {
    Error::Database(e.to_string())
}

/// Like [db_error_to_domain], but reports a unique violation as `Conflict`.
pub(crate) fn db_write_error_to_domain(e: DbErr, what: impl FnOnce() -> String) -> Error {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::Conflict(what()),
        _ => db_error_to_domain(e),
    }
}

pub(crate) fn competition_to_domain(model: competition::Model) -> Competition {
    Competition {
        competition_id: model.competition_id,
        title: model.title,
        description: model.description,
        date_entries_close: model.date_entries_close.into(),
        date_votes_close: model.date_votes_close.into(),
        initial_status_of_images: image_entry_status_to_domain(model.initial_status_of_images),
        status: competition_status_to_domain(model.status),
    }
}

pub(crate) fn image_entry_to_domain(model: image_entry::Model) -> ImageEntry {
    ImageEntry {
        image_id: model.image_id,
        competition_id: model.competition_id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        description: model.description,
        status: image_entry_status_to_domain(model.status),
        date_submitted: model.date_submitted.into(),
        ip_address: model.ip_address,
        image_extension: model.image_extension,
        third_party_opt_in: model.third_party_opt_in,
    }
}

pub(crate) fn vote_to_domain(model: vote::Model) -> Vote {
    Vote {
        vote_id: model.vote_id,
        image_id: model.image_id,
        ip_address: model.ip_address,
    }
}

/// An `image_entry` row joined with its aggregated vote count.
#[derive(Debug, FromQueryResult)]
pub(crate) struct ScoredImageEntryRow {
    pub image_id: Uuid,
    pub competition_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub description: String,
    pub status: sea_orm_active_enums::ImageEntryStatus,
    pub date_submitted: DateTimeWithTimeZone,
    pub ip_address: String,
    pub image_extension: Option<String>,
    pub third_party_opt_in: bool,
    pub score: i64,
}

pub(crate) fn scored_image_entry_to_domain(row: ScoredImageEntryRow) -> ImageEntryWithScore {
    ImageEntryWithScore {
        score: u64::try_from(row.score).unwrap_or(0),
        image_entry: ImageEntry {
            image_id: row.image_id,
            competition_id: row.competition_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            description: row.description,
            status: image_entry_status_to_domain(row.status),
            date_submitted: row.date_submitted.into(),
            ip_address: row.ip_address,
            image_extension: row.image_extension,
            third_party_opt_in: row.third_party_opt_in,
        },
    }
}

// Implementing From<T> for T is not an option, the entities are generated
// by sea-orm-cli and would be overwritten on regeneration.

pub(crate) fn competition_status_to_domain(
    model: sea_orm_active_enums::CompetitionStatus,
) -> CompetitionStatus {
    match model {
        sea_orm_active_enums::CompetitionStatus::StatusAnnounced => CompetitionStatus::Announced,
        sea_orm_active_enums::CompetitionStatus::StatusOpen => CompetitionStatus::Open,
        sea_orm_active_enums::CompetitionStatus::StatusVoting => CompetitionStatus::Voting,
        sea_orm_active_enums::CompetitionStatus::StatusClosed => CompetitionStatus::Closed,
        sea_orm_active_enums::CompetitionStatus::StatusHidden => CompetitionStatus::Hidden,
    }
}

pub(crate) fn domain_competition_status_to_db(
    model: CompetitionStatus,
) -> sea_orm_active_enums::CompetitionStatus {
    match model {
        CompetitionStatus::Announced => sea_orm_active_enums::CompetitionStatus::StatusAnnounced,
        CompetitionStatus::Open => sea_orm_active_enums::CompetitionStatus::StatusOpen,
        CompetitionStatus::Voting => sea_orm_active_enums::CompetitionStatus::StatusVoting,
        CompetitionStatus::Closed => sea_orm_active_enums::CompetitionStatus::StatusClosed,
        CompetitionStatus::Hidden => sea_orm_active_enums::CompetitionStatus::StatusHidden,
    }
}

pub(crate) fn image_entry_status_to_domain(
    model: sea_orm_active_enums::ImageEntryStatus,
) -> ImageEntryStatus {
    match model {
        sea_orm_active_enums::ImageEntryStatus::StatusUnmoderated => ImageEntryStatus::Unmoderated,
        sea_orm_active_enums::ImageEntryStatus::StatusVerified => ImageEntryStatus::Verified,
        sea_orm_active_enums::ImageEntryStatus::StatusHidden => ImageEntryStatus::Hidden,
        sea_orm_active_enums::ImageEntryStatus::StatusBlocked => ImageEntryStatus::Blocked,
    }
}

pub(crate) fn domain_image_entry_status_to_db(
    model: ImageEntryStatus,
) -> sea_orm_active_enums::ImageEntryStatus {
    match model {
        ImageEntryStatus::Unmoderated => sea_orm_active_enums::ImageEntryStatus::StatusUnmoderated,
        ImageEntryStatus::Verified => sea_orm_active_enums::ImageEntryStatus::StatusVerified,
        ImageEntryStatus::Hidden => sea_orm_active_enums::ImageEntryStatus::StatusHidden,
        ImageEntryStatus::Blocked => sea_orm_active_enums::ImageEntryStatus::StatusBlocked,
    }
}
