// src/application/commands/slugs/mod.rs
mod attach;
mod rescope;
mod service;

pub use attach::{AttachSlugCommand, AttachSlugCommandBuilder};
pub use rescope::RescopeSlugCommand;
pub use service::SlugCommandService;
