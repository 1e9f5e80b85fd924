pub mod ordering;
pub mod pagination;
pub mod random_order;
pub mod shuffle;
