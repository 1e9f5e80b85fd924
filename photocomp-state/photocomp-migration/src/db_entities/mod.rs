mod competition;
mod image_entry;
mod vote;

pub use competition::*;
pub use image_entry::*;
pub use vote::*;
