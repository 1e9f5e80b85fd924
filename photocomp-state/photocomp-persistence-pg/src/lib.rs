mod db;
mod entities;
mod mapping;
mod query;
mod trait_impl;

pub use db::PostgresStateDb;
