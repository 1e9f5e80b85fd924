use std::str::FromStr;

use crate::{
    competition::{Competition, CompetitionStatus},
    error::Error,
    image_entry::{ImageEntry, ImageEntryStatus, ImageEntryWithScore},
};

/// Re-checks a row against the filter it was fetched with.
pub trait RowFilter<R> {
    fn matches(&self, row: &R) -> bool;
}

/// `None` means "no restriction"; an empty list matches nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompetitionFilter {
    pub statuses: Option<Vec<CompetitionStatus>>,
}

impl CompetitionFilter {
    pub fn from_params(raw_statuses: Option<&str>) -> Result<Self, Error> {
        Ok(Self {
            statuses: parse_csv(raw_statuses, "statusFilter")?,
        })
    }
}

impl RowFilter<Competition> for CompetitionFilter {
    fn matches(&self, row: &Competition) -> bool {
        contains_or_unrestricted(&self.statuses, &row.status)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageEntryFilter {
    pub competition_ids: Option<Vec<i32>>,
    pub statuses: Option<Vec<ImageEntryStatus>>,
}

impl ImageEntryFilter {
    pub fn from_params(
        raw_competition_ids: Option<&str>,
        raw_statuses: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(Self {
            competition_ids: parse_csv(raw_competition_ids, "competitionIdFilter")?,
            statuses: parse_csv(raw_statuses, "statusFilter")?,
        })
    }

    /// Filter used for public listings: verified entries only.
    pub fn only_verified(competition_ids: Option<Vec<i32>>) -> Self {
        Self {
            competition_ids,
            statuses: Some(vec![ImageEntryStatus::Verified]),
        }
    }
}

impl RowFilter<ImageEntry> for ImageEntryFilter {
    fn matches(&self, row: &ImageEntry) -> bool {
        contains_or_unrestricted(&self.competition_ids, &row.competition_id)
            && contains_or_unrestricted(&self.statuses, &row.status)
    }
}

impl RowFilter<ImageEntryWithScore> for ImageEntryFilter {
    fn matches(&self, row: &ImageEntryWithScore) -> bool {
        RowFilter::<ImageEntry>::matches(self, &row.image_entry)
    }
}

fn contains_or_unrestricted<T: PartialEq>(allowed: &Option<Vec<T>>, value: &T) -> bool {
    allowed.as_ref().is_none_or(|allowed| allowed.contains(value))
}

fn parse_csv<T: FromStr>(raw: Option<&str>, param: &str) -> Result<Option<Vec<T>>, Error> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    raw.split(',')
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| {
                Error::InvalidInput(format!("{param} value [{value}] is not known"))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
