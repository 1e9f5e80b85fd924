use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use photocomp_common::{
    error::Error,
    image_entry::ImageEntry,
    state::{CompetitionDbTrait, DatabaseTrait, ImageEntryDbTrait, VoteDbTrait},
};
use tracing::info;
use uuid::Uuid;

use crate::schema::FixtureFile;

/// First address handed out for imported entries and votes.
const SYNTHETIC_ADDRESS_BASE: u32 = u32::from_be_bytes([10, 0, 0, 1]);

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub competitions: usize,
    pub image_entries: usize,
    pub votes: usize,
}

/// Hands out consecutive private addresses so imported votes never collide.
#[derive(Debug)]
struct SyntheticAddresses {
    next: u32,
}

impl SyntheticAddresses {
    fn new() -> Self {
        Self {
            next: SYNTHETIC_ADDRESS_BASE,
        }
    }

    fn next_address(&mut self) -> String {
        let address = Ipv4Addr::from(self.next);
        self.next = self.next.wrapping_add(1);
        address.to_string()
    }
}

/// Loads every competition of `fixtures` together with entries and votes.
pub async fn seed(
    db: &dyn DatabaseTrait,
    fixtures: FixtureFile,
    now: DateTime<Utc>,
) -> Result<SeedSummary, Error> {
    let mut summary = SeedSummary::default();
    let mut addresses = SyntheticAddresses::new();

    for fixture in fixtures.competitions {
        let competition = db.create_competition(fixture.competition).await?;
        summary.competitions += 1;
        info!(
            competition_id = competition.competition_id,
            title = %competition.title,
            "imported competition"
        );

        for entry in fixture.entries {
            let votes = entry.votes;
            let image_entry = ImageEntry {
                image_id: entry.image_id.unwrap_or_else(Uuid::new_v4),
                competition_id: competition.competition_id,
                first_name: entry.first_name.trim().to_string(),
                last_name: entry.last_name.trim().to_string(),
                email: entry.email,
                description: entry.description,
                status: entry.status,
                date_submitted: entry.date_submitted.unwrap_or(now),
                ip_address: addresses.next_address(),
                image_extension: entry.image_extension,
                third_party_opt_in: entry.third_party_opt_in,
            };

            let created = db.create_image_entry(image_entry).await?;
            summary.image_entries += 1;

            for _ in 0..votes {
                db.add_vote(created.image_id, &addresses.next_address())
                    .await?;
                summary.votes += 1;
            }
        }
    }

    info!(
        competitions = summary.competitions,
        image_entries = summary.image_entries,
        votes = summary.votes,
        "fixtures imported"
    );

    Ok(summary)
}
