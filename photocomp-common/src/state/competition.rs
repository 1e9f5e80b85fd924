use async_trait::async_trait;

use crate::{
    competition::{Competition, CompetitionStats, NewCompetition},
    error::Error,
    filter::CompetitionFilter,
    order::CompetitionSortField,
};

use super::{base::BaseDbTrait, row_source::RowSource};

#[async_trait]
pub trait CompetitionDbTrait:
    BaseDbTrait + RowSource<CompetitionSortField, CompetitionFilter, Row = Competition>
{
    //// --- READs --- ////

    async fn get_competition(&self, competition_id: i32) -> Result<Option<Competition>, Error>;

    /// Entry counts per moderation status plus vote totals.
    /// ---
    /// Fails with `NotFound` when the competition does not exist,
    /// an existing competition without entries yields all zeroes.
    async fn get_competition_stats(&self, competition_id: i32)
    -> Result<CompetitionStats, Error>;

    //// --- WRITEs --- ////

    /// Stores a new competition and returns it with its assigned id.
    async fn create_competition(&self, competition: NewCompetition) -> Result<Competition, Error>;
}
