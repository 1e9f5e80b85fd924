use sea_orm_migration::{
    prelude::*,
    sea_orm::{DeriveActiveEnum, EnumIter},
};

#[derive(Iden)]
#[iden = "image_entry"]
pub enum ImageEntry {
    Table,
    #[iden = "image_id"]
    ImageId,
    #[iden = "competition_id"]
    CompetitionId,
    #[iden = "first_name"]
    FirstName,
    #[iden = "last_name"]
    LastName,
    #[iden = "email"]
    Email,
    #[iden = "description"]
    Description,
    #[iden = "status"]
    Status,
    #[iden = "date_submitted"]
    DateSubmitted,
    #[iden = "ip_address"]
    IpAddress,
    #[iden = "image_extension"]
    ImageExtension,
    #[iden = "third_party_opt_in"]
    ThirdPartyOptIn,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "image_entry_status"
)]
pub enum DbImageEntryStatus {
    #[sea_orm(string_value = "STATUS_UNMODERATED")]
    Unmoderated,
    #[sea_orm(string_value = "STATUS_VERIFIED")]
    Verified,
    #[sea_orm(string_value = "STATUS_HIDDEN")]
    Hidden,
    #[sea_orm(string_value = "STATUS_BLOCKED")]
    Blocked,
}
