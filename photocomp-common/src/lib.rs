pub mod common;
pub mod competition;
pub mod error;
pub mod filter;
pub mod image_entry;
pub mod listing;
pub mod order;
pub mod state;
pub mod vote;
