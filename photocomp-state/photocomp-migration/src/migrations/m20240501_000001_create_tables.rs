use sea_orm_migration::{
    prelude::{extension::postgres::Type, *},
    sea_orm::{ActiveEnum, DbBackend, Schema},
};

use crate::db_entities::{
    Competition, DbCompetitionStatus, DbImageEntryStatus, ImageEntry, Vote,
};

const IDX_COMPETITION_STATUS: &str = "idx_competition_status";
const IDX_IMAGE_ENTRY_COMPETITION_ID_STATUS: &str = "idx_image_entry_competition_id_status";
const IDX_IMAGE_ENTRY_DATE_SUBMITTED: &str = "idx_image_entry_date_submitted";
const IDX_VOTE_IMAGE_ID_IP_ADDRESS: &str = "idx_vote_image_id_ip_address";

const IDX_NAMES: &[&str] = &[
    IDX_COMPETITION_STATUS,
    IDX_IMAGE_ENTRY_COMPETITION_ID_STATUS,
    IDX_IMAGE_ENTRY_DATE_SUBMITTED,
    IDX_VOTE_IMAGE_ID_IP_ADDRESS,
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db_backend = manager.get_database_backend();

        if db_backend == DbBackend::Postgres {
            let schema = Schema::new(DbBackend::Postgres);

            manager
                .create_type(schema.create_enum_from_active_enum::<DbCompetitionStatus>())
                .await?;

            manager
                .create_type(schema.create_enum_from_active_enum::<DbImageEntryStatus>())
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Competition::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Competition::CompetitionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Competition::Title).text().not_null())
                    .col(
                        ColumnDef::new(Competition::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Competition::DateEntriesClose)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Competition::DateVotesClose)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Competition::InitialStatusOfImages)
                            .custom(DbImageEntryStatus::name())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Competition::Status)
                            .custom(DbCompetitionStatus::name())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ImageEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ImageEntry::ImageId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ImageEntry::CompetitionId).integer().not_null())
                    .col(ColumnDef::new(ImageEntry::FirstName).text().not_null())
                    .col(ColumnDef::new(ImageEntry::LastName).text().not_null())
                    .col(ColumnDef::new(ImageEntry::Email).text().not_null())
                    .col(
                        ColumnDef::new(ImageEntry::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ImageEntry::Status)
                            .custom(DbImageEntryStatus::name())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ImageEntry::DateSubmitted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ImageEntry::IpAddress).text().not_null())
                    .col(ColumnDef::new(ImageEntry::ImageExtension).text()) // Nullable
                    .col(
                        ColumnDef::new(ImageEntry::ThirdPartyOptIn)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_image_entry_competition")
                            .from(ImageEntry::Table, ImageEntry::CompetitionId)
                            .to(Competition::Table, Competition::CompetitionId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vote::VoteId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vote::ImageId).uuid().not_null())
                    .col(ColumnDef::new(Vote::IpAddress).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_image_entry")
                            .from(Vote::Table, Vote::ImageId)
                            .to(ImageEntry::Table, ImageEntry::ImageId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPETITION_STATUS)
                    .table(Competition::Table)
                    .col(Competition::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_IMAGE_ENTRY_COMPETITION_ID_STATUS)
                    .table(ImageEntry::Table)
                    .col(ImageEntry::CompetitionId)
                    .col(ImageEntry::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_IMAGE_ENTRY_DATE_SUBMITTED)
                    .table(ImageEntry::Table)
                    .col(ImageEntry::DateSubmitted)
                    .to_owned(),
            )
            .await?;

        // One vote per address per entry.
        manager
            .create_index(
                Index::create()
                    .name(IDX_VOTE_IMAGE_ID_IP_ADDRESS)
                    .table(Vote::Table)
                    .col(Vote::ImageId)
                    .col(Vote::IpAddress)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db_backend = manager.get_database_backend();

        for idx_name in IDX_NAMES {
            manager
                .drop_index(Index::drop().name(*idx_name).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Vote::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(ImageEntry::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(Competition::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        if db_backend == DbBackend::Postgres {
            manager
                .drop_type(Type::drop().name(DbImageEntryStatus::name()).to_owned())
                .await?;

            manager
                .drop_type(Type::drop().name(DbCompetitionStatus::name()).to_owned())
                .await?;
        }

        Ok(())
    }
}
