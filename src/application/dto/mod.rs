pub mod slugs;

pub use slugs::{SlugDto, SlugLookupDto};
