// tests/support/mocks.rs
use async_trait::async_trait;

use slug_ledger::domain::errors::{DomainError, DomainResult};
use slug_ledger::domain::slug::{
    NewSlug, OwnerRef, Slug, SlugGroup, SlugId, SlugName, SlugScope, SlugSequence, SlugStore,
    SlugTransaction,
};
use slug_ledger::infrastructure::repositories::InMemorySlugStore;

/// Store whose units of work fail on insert, after any deletes have run.
pub struct FailingInsertStore {
    pub inner: InMemorySlugStore,
}

#[async_trait]
impl SlugStore for FailingInsertStore {
    async fn begin(&self, group: &SlugGroup) -> DomainResult<Box<dyn SlugTransaction>> {
        let inner = self.inner.begin(group).await?;
        Ok(Box::new(FailingInsertTransaction { inner }))
    }

    async fn find_by_id(&self, id: SlugId) -> DomainResult<Option<Slug>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_friendly_id(
        &self,
        group: &SlugGroup,
        sequence: SlugSequence,
    ) -> DomainResult<Option<Slug>> {
        self.inner.find_by_friendly_id(group, sequence).await
    }

    async fn list_for_owner(&self, owner: &OwnerRef) -> DomainResult<Vec<Slug>> {
        self.inner.list_for_owner(owner).await
    }
}

struct FailingInsertTransaction {
    inner: Box<dyn SlugTransaction>,
}

#[async_trait]
impl SlugTransaction for FailingInsertTransaction {
    async fn find_similar(&mut self, group: &SlugGroup) -> DomainResult<Vec<Slug>> {
        self.inner.find_similar(group).await
    }

    async fn find_own_slugs(
        &mut self,
        owner: &OwnerRef,
        name: &SlugName,
        scope: &SlugScope,
    ) -> DomainResult<Vec<Slug>> {
        self.inner.find_own_slugs(owner, name, scope).await
    }

    async fn insert(&mut self, _slug: NewSlug) -> DomainResult<Slug> {
        Err(DomainError::Persistence("connection reset".into()))
    }

    async fn update_scope(&mut self, id: SlugId, scope: &SlugScope) -> DomainResult<Slug> {
        self.inner.update_scope(id, scope).await
    }

    async fn delete(&mut self, id: SlugId) -> DomainResult<()> {
        self.inner.delete(id).await
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.inner.commit().await
    }
}
