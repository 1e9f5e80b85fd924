use strum_macros::{Display, EnumIter, EnumString};

use crate::common::ordering::SortField;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum CompetitionSortField {
    Id,
    DateEntriesClose,
    DateVotesClose,
}

impl SortField for CompetitionSortField {
    fn is_random(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ImageEntrySortField {
    FirstName,
    LastName,
    Status,
    DateSubmitted,
    Rand,
}

impl SortField for ImageEntrySortField {
    fn is_random(&self) -> bool {
        matches!(self, ImageEntrySortField::Rand)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum ImageEntryWithScoreSortField {
    FirstName,
    LastName,
    Status,
    DateSubmitted,
    Score,
    Rand,
}

impl SortField for ImageEntryWithScoreSortField {
    fn is_random(&self) -> bool {
        matches!(self, ImageEntryWithScoreSortField::Rand)
    }
}
