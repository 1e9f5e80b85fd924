mod score;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{common::ordering::SortKey, order::ImageEntrySortField};

pub use score::ImageEntryWithScore;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub image_id: Uuid,
    pub competition_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub description: String,
    pub status: ImageEntryStatus,
    pub date_submitted: DateTime<Utc>,
    pub ip_address: String,
    pub image_extension: Option<String>,
    pub third_party_opt_in: bool,
}

impl SortKey<ImageEntrySortField> for ImageEntry {
    fn compare_by(&self, other: &Self, field: ImageEntrySortField) -> Ordering {
        match field {
            ImageEntrySortField::FirstName => self.first_name.cmp(&other.first_name),
            ImageEntrySortField::LastName => self.last_name.cmp(&other.last_name),
            ImageEntrySortField::Status => self.status.as_str().cmp(other.status.as_str()),
            ImageEntrySortField::DateSubmitted => self.date_submitted.cmp(&other.date_submitted),
            ImageEntrySortField::Rand => Ordering::Equal,
        }
    }
}

/// Partial update of an entry; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntryPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub status: Option<ImageEntryStatus>,
}

impl ImageEntryPatch {
    pub fn contains_update(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.email.is_some()
            || self.description.is_some()
            || self.status.is_some()
    }

    pub fn apply_to(&self, entry: &mut ImageEntry) {
        if let Some(first_name) = &self.first_name {
            entry.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            entry.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            entry.email = email.clone();
        }
        if let Some(description) = &self.description {
            entry.description = description.clone();
        }
        if let Some(status) = self.status {
            entry.status = status;
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
pub enum ImageEntryStatus {
    #[strum(serialize = "STATUS_UNMODERATED")]
    #[serde(rename = "STATUS_UNMODERATED")]
    Unmoderated,
    #[strum(serialize = "STATUS_VERIFIED")]
    #[serde(rename = "STATUS_VERIFIED")]
    Verified,
    #[strum(serialize = "STATUS_HIDDEN")]
    #[serde(rename = "STATUS_HIDDEN")]
    Hidden,
    #[strum(serialize = "STATUS_BLOCKED")]
    #[serde(rename = "STATUS_BLOCKED")]
    Blocked,
}

impl ImageEntryStatus {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
