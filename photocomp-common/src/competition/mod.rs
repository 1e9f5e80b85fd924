mod stats;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    common::ordering::SortKey, image_entry::ImageEntryStatus, order::CompetitionSortField,
};

pub use stats::CompetitionStats;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub competition_id: i32,
    pub title: String,
    pub description: String,
    pub date_entries_close: DateTime<Utc>,
    pub date_votes_close: DateTime<Utc>,
    pub initial_status_of_images: ImageEntryStatus,
    pub status: CompetitionStatus,
}

/// A competition before it has been assigned an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompetition {
    pub title: String,
    pub description: String,
    pub date_entries_close: DateTime<Utc>,
    pub date_votes_close: DateTime<Utc>,
    pub initial_status_of_images: ImageEntryStatus,
    pub status: CompetitionStatus,
}

impl NewCompetition {
    pub fn into_competition(self, competition_id: i32) -> Competition {
        Competition {
            competition_id,
            title: self.title,
            description: self.description,
            date_entries_close: self.date_entries_close,
            date_votes_close: self.date_votes_close,
            initial_status_of_images: self.initial_status_of_images,
            status: self.status,
        }
    }
}

impl Competition {
    /// Votes are accepted while the competition is `OPEN` or `VOTING`
    /// and `date_votes_close` has not passed.
    pub fn is_voting_open(&self, now: DateTime<Utc>) -> bool {
        now <= self.date_votes_close
            && matches!(
                self.status,
                CompetitionStatus::Open | CompetitionStatus::Voting
            )
    }

    pub fn is_entry_open(&self, now: DateTime<Utc>) -> bool {
        now <= self.date_entries_close && self.status == CompetitionStatus::Open
    }
}

impl SortKey<CompetitionSortField> for Competition {
    fn compare_by(&self, other: &Self, field: CompetitionSortField) -> Ordering {
        match field {
            CompetitionSortField::Id => self.competition_id.cmp(&other.competition_id),
            CompetitionSortField::DateEntriesClose => {
                self.date_entries_close.cmp(&other.date_entries_close)
            }
            CompetitionSortField::DateVotesClose => {
                self.date_votes_close.cmp(&other.date_votes_close)
            }
        }
    }
}

#[derive(
    Clone,
    Debug,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
pub enum CompetitionStatus {
    /// Announced, entries not open yet.
    #[strum(serialize = "STATUS_ANNOUNCED")]
    #[serde(rename = "STATUS_ANNOUNCED")]
    Announced,
    /// Accepting entries and votes.
    #[strum(serialize = "STATUS_OPEN")]
    #[serde(rename = "STATUS_OPEN")]
    Open,
    /// Entries closed, votes still accepted.
    #[strum(serialize = "STATUS_VOTING")]
    #[serde(rename = "STATUS_VOTING")]
    Voting,
    #[strum(serialize = "STATUS_CLOSED")]
    #[serde(rename = "STATUS_CLOSED")]
    Closed,
    /// Not visible to the public.
    #[strum(serialize = "STATUS_HIDDEN")]
    #[serde(rename = "STATUS_HIDDEN")]
    Hidden,
}

impl CompetitionStatus {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{Duration, TimeZone};

    use super::*;

    fn competition(status: CompetitionStatus) -> Competition {
        Competition {
            competition_id: 1,
            title: "Autumn".into(),
            description: "Leaves".into(),
            date_entries_close: Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap(),
            date_votes_close: Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap(),
            initial_status_of_images: ImageEntryStatus::Unmoderated,
            status,
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(CompetitionStatus::Voting.to_string(), "STATUS_VOTING");
        assert_eq!(
            CompetitionStatus::from_str("STATUS_HIDDEN").unwrap(),
            CompetitionStatus::Hidden
        );
        assert!(CompetitionStatus::from_str("HIDDEN").is_err());
        assert_eq!(
            serde_json::to_string(&CompetitionStatus::Open).unwrap(),
            "\"STATUS_OPEN\""
        );
    }

    #[test]
    fn test_voting_window() {
        let c = competition(CompetitionStatus::Voting);
        let before = c.date_votes_close - Duration::days(1);
        let after = c.date_votes_close + Duration::seconds(1);

        assert!(c.is_voting_open(before));
        assert!(!c.is_voting_open(after));
        assert!(!competition(CompetitionStatus::Closed).is_voting_open(before));
        assert!(competition(CompetitionStatus::Open).is_voting_open(before));
    }

    #[test]
    fn test_entry_window() {
        let c = competition(CompetitionStatus::Open);
        assert!(c.is_entry_open(c.date_entries_close));
        assert!(!competition(CompetitionStatus::Voting).is_entry_open(c.date_entries_close));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(competition(CompetitionStatus::Open)).unwrap();
        assert_eq!(json["competitionId"], 1);
        assert_eq!(json["initialStatusOfImages"], "STATUS_UNMODERATED");
        assert_eq!(json["status"], "STATUS_OPEN");
    }
}
