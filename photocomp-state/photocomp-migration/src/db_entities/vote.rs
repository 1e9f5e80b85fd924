use sea_orm_migration::prelude::*;

#[derive(Iden)]
#[iden = "vote"]
pub enum Vote {
    Table,
    #[iden = "vote_id"]
    VoteId,
    #[iden = "image_id"]
    ImageId,
    #[iden = "ip_address"]
    IpAddress,
}
