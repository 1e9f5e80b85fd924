mod base;
mod competition;
mod image_entry;
mod memory;
mod row_source;
mod vote;

pub use base::BaseDbTrait;
pub use competition::CompetitionDbTrait;
pub use image_entry::ImageEntryDbTrait;
pub use memory::InMemoryStateDb;
pub use row_source::RowSource;
pub use vote::VoteDbTrait;

/// Combined trait for all database operations
/// Should be used through dyn dispatch at the top level
/// to pass the complete database interface
pub trait DatabaseTrait: CompetitionDbTrait + ImageEntryDbTrait + VoteDbTrait {}

impl<T> DatabaseTrait for T where T: CompetitionDbTrait + ImageEntryDbTrait + VoteDbTrait {}
