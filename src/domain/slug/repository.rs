// src/domain/slug/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::slug::entity::{NewSlug, Slug};
use crate::domain::slug::value_objects::{
    OwnerRef, SlugGroup, SlugId, SlugName, SlugScope, SlugSequence,
};
use async_trait::async_trait;

/// Backing table for slugs.
///
/// Every mutation goes through a [`SlugTransaction`]. `begin` must not return
/// until the caller holds exclusive access to `group`, so that the
/// reversion/sequence/insert pipeline is serialized per group.
#[async_trait]
pub trait SlugStore: Send + Sync {
    async fn begin(&self, group: &SlugGroup) -> DomainResult<Box<dyn SlugTransaction>>;

    async fn find_by_id(&self, id: SlugId) -> DomainResult<Option<Slug>>;

    async fn find_by_friendly_id(
        &self,
        group: &SlugGroup,
        sequence: SlugSequence,
    ) -> DomainResult<Option<Slug>>;

    /// An owner's slugs, newest first.
    async fn list_for_owner(&self, owner: &OwnerRef) -> DomainResult<Vec<Slug>>;
}

/// A unit of work holding the group lock. Dropping it without `commit`
/// discards every change made through it.
#[async_trait]
pub trait SlugTransaction: Send {
    /// Slugs sharing the group, ascending by sequence.
    async fn find_similar(&mut self, group: &SlugGroup) -> DomainResult<Vec<Slug>>;

    async fn find_own_slugs(
        &mut self,
        owner: &OwnerRef,
        name: &SlugName,
        scope: &SlugScope,
    ) -> DomainResult<Vec<Slug>>;

    async fn insert(&mut self, slug: NewSlug) -> DomainResult<Slug>;

    async fn update_scope(&mut self, id: SlugId, scope: &SlugScope) -> DomainResult<Slug>;

    async fn delete(&mut self, id: SlugId) -> DomainResult<()>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
}
