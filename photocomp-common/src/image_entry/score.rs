use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{common::ordering::SortKey, order::ImageEntryWithScoreSortField};

use super::ImageEntry;

/// An entry together with the number of votes it received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntryWithScore {
    pub score: u64,
    pub image_entry: ImageEntry,
}

impl SortKey<ImageEntryWithScoreSortField> for ImageEntryWithScore {
    fn compare_by(&self, other: &Self, field: ImageEntryWithScoreSortField) -> Ordering {
        let (a, b) = (&self.image_entry, &other.image_entry);
        match field {
            ImageEntryWithScoreSortField::FirstName => a.first_name.cmp(&b.first_name),
            ImageEntryWithScoreSortField::LastName => a.last_name.cmp(&b.last_name),
            ImageEntryWithScoreSortField::Status => a.status.as_str().cmp(b.status.as_str()),
            ImageEntryWithScoreSortField::DateSubmitted => a.date_submitted.cmp(&b.date_submitted),
            ImageEntryWithScoreSortField::Score => self.score.cmp(&other.score),
            ImageEntryWithScoreSortField::Rand => Ordering::Equal,
        }
    }
}
