pub mod m20240501_000001_create_tables;
