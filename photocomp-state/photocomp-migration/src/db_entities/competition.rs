use sea_orm_migration::{
    prelude::*,
    sea_orm::{DeriveActiveEnum, EnumIter},
};

#[derive(Iden)]
#[iden = "competition"]
pub enum Competition {
    Table,
    #[iden = "competition_id"]
    CompetitionId,
    #[iden = "title"]
    Title,
    #[iden = "description"]
    Description,
    #[iden = "date_entries_close"]
    DateEntriesClose,
    #[iden = "date_votes_close"]
    DateVotesClose,
    #[iden = "initial_status_of_images"]
    InitialStatusOfImages,
    #[iden = "status"]
    Status,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "competition_status"
)]
pub enum DbCompetitionStatus {
    #[sea_orm(string_value = "STATUS_ANNOUNCED")]
    Announced,
    #[sea_orm(string_value = "STATUS_OPEN")]
    Open,
    #[sea_orm(string_value = "STATUS_VOTING")]
    Voting,
    #[sea_orm(string_value = "STATUS_CLOSED")]
    Closed,
    #[sea_orm(string_value = "STATUS_HIDDEN")]
    Hidden,
}
