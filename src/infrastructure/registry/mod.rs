// src/infrastructure/registry/mod.rs
mod memory;
mod postgres;

pub use memory::InMemoryOwnerRegistry;
pub use postgres::{OwnerTable, PostgresOwnerRegistry};
