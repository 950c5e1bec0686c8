// src/domain/slug/registry.rs
use crate::domain::errors::DomainResult;
use crate::domain::slug::entity::Slug;
use crate::domain::slug::friendly_id::DEFAULT_SEQUENCE_SEPARATOR;
use crate::domain::slug::value_objects::{OwnerRef, SlugId, SluggableType};
use async_trait::async_trait;

/// Per-type settings of a sluggable owner class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SluggableConfig {
    pub sequence_separator: String,
}

impl SluggableConfig {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            sequence_separator: separator.into(),
        }
    }
}

impl Default for SluggableConfig {
    fn default() -> Self {
        Self::with_separator(DEFAULT_SEQUENCE_SEPARATOR)
    }
}

/// The record a slug labels, as seen by the slug subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub key: OwnerRef,
    /// Back-reference to the owner's active slug.
    pub current_slug_id: Option<SlugId>,
}

impl Owner {
    pub fn new(key: OwnerRef, current_slug_id: Option<SlugId>) -> Self {
        Self {
            key,
            current_slug_id,
        }
    }
}

#[async_trait]
pub trait OwnerRegistry: Send + Sync {
    /// Load an owner. With `bypass_current_filter` set, any default filtering
    /// the owner type applies (drafts, soft deletes) is skipped.
    async fn find_owner(
        &self,
        key: &OwnerRef,
        bypass_current_filter: bool,
    ) -> DomainResult<Option<Owner>>;

    async fn current_slug_of(&self, owner: &Owner) -> DomainResult<Option<Slug>>;

    fn config_for(&self, sluggable_type: &SluggableType) -> Option<SluggableConfig>;

    /// Settings for types without a configuration of their own.
    fn default_config(&self) -> SluggableConfig {
        SluggableConfig::default()
    }

    fn separator_for_type(&self, sluggable_type: &SluggableType) -> String {
        self.config_for(sluggable_type)
            .unwrap_or_else(|| self.default_config())
            .sequence_separator
    }

    fn separator_for(&self, owner: &Owner) -> String {
        self.separator_for_type(&owner.key.sluggable_type)
    }
}
