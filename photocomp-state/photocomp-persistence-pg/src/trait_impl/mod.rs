mod base;
mod competition;
mod image_entry;
mod vote;
