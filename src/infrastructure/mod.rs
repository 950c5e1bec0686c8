pub mod database;
pub mod registry;
pub mod repositories;
pub mod time;
