use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{
    common::{
        ordering::{SortField, SortKey, SortOrder, sort_rows},
        pagination::Pagination,
    },
    competition::{Competition, CompetitionStats, NewCompetition},
    error::Error,
    filter::{CompetitionFilter, ImageEntryFilter, RowFilter},
    image_entry::{ImageEntry, ImageEntryPatch, ImageEntryStatus, ImageEntryWithScore},
    order::{CompetitionSortField, ImageEntrySortField, ImageEntryWithScoreSortField},
    vote::Vote,
};

use super::{
    base::BaseDbTrait, competition::CompetitionDbTrait, image_entry::ImageEntryDbTrait,
    row_source::RowSource, vote::VoteDbTrait,
};

/// Store backed by plain vectors.
/// ---
/// Used when no database is configured and throughout the tests.
/// Tables keep insertion order, which is the natural order for
/// every listing.
#[derive(Debug, Default)]
pub struct InMemoryStateDb {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    competitions: Vec<Competition>,
    image_entries: Vec<ImageEntry>,
    votes: Vec<Vote>,
    last_competition_id: i32,
    last_vote_id: i64,
}

impl Tables {
    fn scores(&self) -> HashMap<Uuid, u64> {
        let mut scores = HashMap::new();
        for vote in &self.votes {
            *scores.entry(vote.image_id).or_insert(0) += 1;
        }
        scores
    }

    fn with_score(&self, entry: &ImageEntry, scores: &HashMap<Uuid, u64>) -> ImageEntryWithScore {
        ImageEntryWithScore {
            score: scores.get(&entry.image_id).copied().unwrap_or(0),
            image_entry: entry.clone(),
        }
    }

    fn scored_entries(&self, filter: &ImageEntryFilter) -> Vec<ImageEntryWithScore> {
        let scores = self.scores();
        self.image_entries
            .iter()
            .filter(|e| filter.matches(*e))
            .map(|e| self.with_score(e, &scores))
            .collect()
    }
}

impl InMemoryStateDb {
    pub fn new() -> Self {
        Self::default()
    }
}

fn filtered<R: Clone, Flt: RowFilter<R>>(rows: &[R], filter: &Flt) -> Vec<R> {
    rows.iter().filter(|r| filter.matches(r)).cloned().collect()
}

fn window<R, F>(mut rows: Vec<R>, pagination: &Pagination, sort_order: &SortOrder<F>) -> Vec<R>
where
    R: SortKey<F>,
    F: SortField,
{
    sort_rows(&mut rows, sort_order);

    let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
    rows.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl BaseDbTrait for InMemoryStateDb {
    async fn health_check(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[async_trait]
impl RowSource<CompetitionSortField, CompetitionFilter> for InMemoryStateDb {
    type Row = Competition;

    async fn count(&self, filter: &CompetitionFilter) -> Result<u64, Error> {
        let tables = self.tables.read().await;
        Ok(tables.competitions.iter().filter(|c| filter.matches(*c)).count() as u64)
    }

    async fn fetch_ordered(
        &self,
        pagination: &Pagination,
        sort_order: &SortOrder<CompetitionSortField>,
        filter: &CompetitionFilter,
    ) -> Result<Vec<Competition>, Error> {
        let tables = self.tables.read().await;
        let rows = filtered(&tables.competitions, filter);
        Ok(window(rows, pagination, sort_order))
    }

    async fn fetch_all(&self, filter: &CompetitionFilter) -> Result<Vec<Competition>, Error> {
        let tables = self.tables.read().await;
        Ok(filtered(&tables.competitions, filter))
    }
}

#[async_trait]
impl RowSource<ImageEntrySortField, ImageEntryFilter> for InMemoryStateDb {
    type Row = ImageEntry;

    async fn count(&self, filter: &ImageEntryFilter) -> Result<u64, Error> {
        let tables = self.tables.read().await;
        Ok(tables.image_entries.iter().filter(|e| filter.matches(*e)).count() as u64)
    }

    async fn fetch_ordered(
        &self,
        pagination: &Pagination,
        sort_order: &SortOrder<ImageEntrySortField>,
        filter: &ImageEntryFilter,
    ) -> Result<Vec<ImageEntry>, Error> {
        let tables = self.tables.read().await;
        let rows = filtered(&tables.image_entries, filter);
        Ok(window(rows, pagination, sort_order))
    }

    async fn fetch_all(&self, filter: &ImageEntryFilter) -> Result<Vec<ImageEntry>, Error> {
        let tables = self.tables.read().await;
        let mut rows = filtered(&tables.image_entries, filter);
        rows.sort_by_key(|e| e.date_submitted);
        Ok(rows)
    }
}

#[async_trait]
impl RowSource<ImageEntryWithScoreSortField, ImageEntryFilter> for InMemoryStateDb {
    type Row = ImageEntryWithScore;

    async fn count(&self, filter: &ImageEntryFilter) -> Result<u64, Error> {
        let tables = self.tables.read().await;
        Ok(tables.image_entries.iter().filter(|e| filter.matches(*e)).count() as u64)
    }

    async fn fetch_ordered(
        &self,
        pagination: &Pagination,
        sort_order: &SortOrder<ImageEntryWithScoreSortField>,
        filter: &ImageEntryFilter,
    ) -> Result<Vec<ImageEntryWithScore>, Error> {
        let tables = self.tables.read().await;
        let rows = tables.scored_entries(filter);
        Ok(window(rows, pagination, sort_order))
    }

    async fn fetch_all(&self, filter: &ImageEntryFilter) -> Result<Vec<ImageEntryWithScore>, Error> {
        let tables = self.tables.read().await;
        let mut rows = tables.scored_entries(filter);
        rows.sort_by_key(|e| e.image_entry.date_submitted);
        Ok(rows)
    }
}

#[async_trait]
impl CompetitionDbTrait for InMemoryStateDb {
    async fn get_competition(&self, competition_id: i32) -> Result<Option<Competition>, Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .competitions
            .iter()
            .find(|c| c.competition_id == competition_id)
            .cloned())
    }

    async fn get_competition_stats(
        &self,
        competition_id: i32,
    ) -> Result<CompetitionStats, Error> {
        let tables = self.tables.read().await;
        if !tables
            .competitions
            .iter()
            .any(|c| c.competition_id == competition_id)
        {
            return Err(Error::not_found("Competition", competition_id));
        }

        let mut stats = CompetitionStats::default();
        let mut image_ids = HashSet::new();

        for entry in tables
            .image_entries
            .iter()
            .filter(|e| e.competition_id == competition_id)
        {
            image_ids.insert(entry.image_id);
            stats.image_entry_count += 1;
            match entry.status {
                ImageEntryStatus::Unmoderated => stats.image_entry_unmoderated_count += 1,
                ImageEntryStatus::Verified => stats.image_entry_verified_count += 1,
                ImageEntryStatus::Hidden => stats.image_entry_hidden_count += 1,
                ImageEntryStatus::Blocked => stats.image_entry_blocked_count += 1,
            }
        }

        let mut voters = HashSet::new();
        for vote in tables
            .votes
            .iter()
            .filter(|v| image_ids.contains(&v.image_id))
        {
            stats.votes_count += 1;
            voters.insert(vote.ip_address.as_str());
        }
        stats.unique_voter_count = voters.len() as u64;

        Ok(stats)
    }

    async fn create_competition(&self, competition: NewCompetition) -> Result<Competition, Error> {
        let mut tables = self.tables.write().await;
        tables.last_competition_id += 1;

        let competition = competition.into_competition(tables.last_competition_id);
        tables.competitions.push(competition.clone());

        debug!(competition_id = competition.competition_id, "competition created");
        Ok(competition)
    }
}

#[async_trait]
impl ImageEntryDbTrait for InMemoryStateDb {
    async fn get_image_entry(&self, image_id: Uuid) -> Result<Option<ImageEntry>, Error> {
        let tables = self.tables.read().await;
        Ok(tables
            .image_entries
            .iter()
            .find(|e| e.image_id == image_id)
            .cloned())
    }

    async fn get_image_entry_with_score(
        &self,
        image_id: Uuid,
    ) -> Result<Option<ImageEntryWithScore>, Error> {
        let tables = self.tables.read().await;
        let scores = tables.scores();
        Ok(tables
            .image_entries
            .iter()
            .find(|e| e.image_id == image_id)
            .map(|e| tables.with_score(e, &scores)))
    }

    async fn create_image_entry(&self, entry: ImageEntry) -> Result<ImageEntry, Error> {
        let mut tables = self.tables.write().await;

        if !tables
            .competitions
            .iter()
            .any(|c| c.competition_id == entry.competition_id)
        {
            return Err(Error::not_found("Competition", entry.competition_id));
        }

        if tables
            .image_entries
            .iter()
            .any(|e| e.image_id == entry.image_id)
        {
            return Err(Error::Conflict(format!(
                "Image entry {} already exists",
                entry.image_id
            )));
        }

        tables.image_entries.push(entry.clone());
        Ok(entry)
    }

    async fn patch_image_entry(
        &self,
        image_id: Uuid,
        patch: &ImageEntryPatch,
    ) -> Result<ImageEntry, Error> {
        let mut tables = self.tables.write().await;
        let entry = tables
            .image_entries
            .iter_mut()
            .find(|e| e.image_id == image_id)
            .ok_or_else(|| Error::not_found("ImageEntry", image_id))?;

        patch.apply_to(entry);
        Ok(entry.clone())
    }
}

#[async_trait]
impl VoteDbTrait for InMemoryStateDb {
    async fn add_vote(&self, image_id: Uuid, ip_address: &str) -> Result<Vote, Error> {
        let mut tables = self.tables.write().await;

        if !tables.image_entries.iter().any(|e| e.image_id == image_id) {
            return Err(Error::not_found("ImageEntry", image_id));
        }

        if tables
            .votes
            .iter()
            .any(|v| v.image_id == image_id && v.ip_address == ip_address)
        {
            return Err(Error::Conflict(format!(
                "{ip_address} already voted for image entry {image_id}"
            )));
        }

        tables.last_vote_id += 1;
        let vote = Vote {
            vote_id: tables.last_vote_id,
            image_id,
            ip_address: ip_address.to_string(),
        };
        tables.votes.push(vote.clone());

        Ok(vote)
    }
}
