// src/application/queries/slugs/mod.rs
mod history;
mod lookup;
mod service;

pub use history::SlugHistoryQuery;
pub use lookup::LookupSlugQuery;
pub use service::SlugQueryService;
