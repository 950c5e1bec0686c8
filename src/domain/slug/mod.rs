pub mod entity;
pub mod friendly_id;
pub mod registry;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{NewSlug, Slug};
pub use friendly_id::{DEFAULT_SEQUENCE_SEPARATOR, FriendlyId, parse_friendly_id};
pub use registry::{Owner, OwnerRegistry, SluggableConfig};
pub use repository::{SlugStore, SlugTransaction};
pub use services::{SlugLookup, SlugManager};
pub use value_objects::{
    OwnerRef, SlugGroup, SlugId, SlugName, SlugScope, SlugSequence, SluggableId, SluggableType,
};
