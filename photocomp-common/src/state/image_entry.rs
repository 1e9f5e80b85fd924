use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Error,
    filter::ImageEntryFilter,
    image_entry::{ImageEntry, ImageEntryPatch, ImageEntryWithScore},
    order::{ImageEntrySortField, ImageEntryWithScoreSortField},
};

use super::{base::BaseDbTrait, row_source::RowSource};

#[async_trait]
pub trait ImageEntryDbTrait:
    BaseDbTrait
    + RowSource<ImageEntrySortField, ImageEntryFilter, Row = ImageEntry>
    + RowSource<ImageEntryWithScoreSortField, ImageEntryFilter, Row = ImageEntryWithScore>
{
    //// --- READs --- ////

    async fn get_image_entry(&self, image_id: Uuid) -> Result<Option<ImageEntry>, Error>;

    /// Gets an entry together with its vote count.
    async fn get_image_entry_with_score(
        &self,
        image_id: Uuid,
    ) -> Result<Option<ImageEntryWithScore>, Error>;

    //// --- WRITEs --- ////

    /// Stores a fully built entry.
    /// ---
    /// `NotFound` if its competition does not exist,
    /// `Conflict` if the `image_id` is already taken.
    async fn create_image_entry(&self, entry: ImageEntry) -> Result<ImageEntry, Error>;

    /// Applies `patch` and returns the updated entry.
    async fn patch_image_entry(
        &self,
        image_id: Uuid,
        patch: &ImageEntryPatch,
    ) -> Result<ImageEntry, Error>;
}
