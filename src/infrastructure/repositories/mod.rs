// src/infrastructure/repositories/mod.rs
mod error;
mod memory_slug;
mod postgres_slug;

pub use error::map_sqlx;
pub use memory_slug::{InMemorySlugStore, InMemorySlugTransaction};
pub use postgres_slug::{PostgresSlugStore, PostgresSlugTransaction};
