use chrono::{DateTime, Utc};
use photocomp_common::{competition::NewCompetition, image_entry::ImageEntryStatus};
use serde::Deserialize;
use uuid::Uuid;

/// Competitions to import, each with its entries and vote counts.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FixtureFile {
    pub competitions: Vec<CompetitionFixture>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionFixture {
    #[serde(flatten)]
    pub competition: NewCompetition,
    #[serde(default)]
    pub entries: Vec<EntryFixture>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EntryFixture {
    /// Generated when absent.
    pub image_id: Option<Uuid>,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub description: String,
    /// Imported entries are verified unless stated otherwise.
    #[serde(default = "default_status")]
    pub status: ImageEntryStatus,
    /// Import time when absent.
    pub date_submitted: Option<DateTime<Utc>>,
    pub image_extension: Option<String>,
    #[serde(default)]
    pub third_party_opt_in: bool,
    /// Number of votes to cast, each from a distinct synthetic address.
    #[serde(default)]
    pub votes: u32,
}

fn default_status() -> ImageEntryStatus {
    ImageEntryStatus::Verified
}
