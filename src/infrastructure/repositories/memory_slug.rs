//! In-memory slug store.
//!
//! The whole table sits behind one async mutex. A unit of work holds the lock
//! for its lifetime and edits a staged copy, which replaces the shared state
//! only on commit.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    NewSlug, OwnerRef, Slug, SlugGroup, SlugId, SlugName, SlugScope, SlugSequence, SlugStore,
    SlugTransaction,
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    slugs: BTreeMap<SlugId, Slug>,
    last_id: i64,
    /// Committed inserts, updates and deletes.
    writes: u64,
}

impl MemoryState {
    fn group_members<'a>(&'a self, group: &'a SlugGroup) -> impl Iterator<Item = &'a Slug> + 'a {
        self.slugs.values().filter(move |slug| in_group(slug, group))
    }
}

fn in_group(slug: &Slug, group: &SlugGroup) -> bool {
    slug.name == group.name.as_str()
        && slug.scope() == &group.scope
        && slug.sluggable_type == group.sluggable_type
}

fn owned_by(slug: &Slug, owner: &OwnerRef) -> bool {
    slug.sluggable_type == owner.sluggable_type && slug.sluggable_id == Some(owner.sluggable_id)
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySlugStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemorySlugStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed writes so far.
    pub async fn write_count(&self) -> u64 {
        self.state.lock().await.writes
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.slugs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SlugStore for InMemorySlugStore {
    async fn begin(&self, _group: &SlugGroup) -> DomainResult<Box<dyn SlugTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemorySlugTransaction { guard, staged }))
    }

    async fn find_by_id(&self, id: SlugId) -> DomainResult<Option<Slug>> {
        Ok(self.state.lock().await.slugs.get(&id).cloned())
    }

    async fn find_by_friendly_id(
        &self,
        group: &SlugGroup,
        sequence: SlugSequence,
    ) -> DomainResult<Option<Slug>> {
        let state = self.state.lock().await;
        let found = state
            .group_members(group)
            .find(|slug| slug.sequence == sequence)
            .cloned();
        Ok(found)
    }

    async fn list_for_owner(&self, owner: &OwnerRef) -> DomainResult<Vec<Slug>> {
        let state = self.state.lock().await;
        Ok(state
            .slugs
            .values()
            .rev()
            .filter(|slug| owned_by(slug, owner))
            .cloned()
            .collect())
    }
}

pub struct InMemorySlugTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl SlugTransaction for InMemorySlugTransaction {
    async fn find_similar(&mut self, group: &SlugGroup) -> DomainResult<Vec<Slug>> {
        let mut similar: Vec<Slug> = self.staged.group_members(group).cloned().collect();
        similar.sort_by_key(|slug| slug.sequence);
        Ok(similar)
    }

    async fn find_own_slugs(
        &mut self,
        owner: &OwnerRef,
        name: &SlugName,
        scope: &SlugScope,
    ) -> DomainResult<Vec<Slug>> {
        Ok(self
            .staged
            .slugs
            .values()
            .filter(|slug| {
                owned_by(slug, owner) && slug.name == name.as_str() && slug.scope() == scope
            })
            .cloned()
            .collect())
    }

    async fn insert(&mut self, slug: NewSlug) -> DomainResult<Slug> {
        let group = SlugGroup::new(
            slug.name.clone(),
            slug.scope.clone(),
            slug.sluggable_type.clone(),
        );
        if self
            .staged
            .group_members(&group)
            .any(|existing| existing.sequence == slug.sequence)
        {
            return Err(DomainError::Conflict("slug sequence already taken".into()));
        }

        let id = SlugId::new(self.staged.last_id + 1)?;
        let stored = Slug::restore(
            id,
            slug.name,
            slug.scope,
            slug.sluggable_type,
            slug.sluggable_id,
            slug.sequence,
            slug.created_at,
        );
        self.staged.last_id = id.0;
        self.staged.slugs.insert(id, stored.clone());
        self.staged.writes += 1;
        Ok(stored)
    }

    async fn update_scope(&mut self, id: SlugId, scope: &SlugScope) -> DomainResult<Slug> {
        let current = self
            .staged
            .slugs
            .get(&id)
            .ok_or_else(|| DomainError::NotFound("slug not found".into()))?;

        let target = SlugGroup::new(
            current.validate()?,
            scope.clone(),
            current.sluggable_type.clone(),
        );
        if self
            .staged
            .group_members(&target)
            .any(|other| other.sequence == current.sequence && other.id() != Some(id))
        {
            return Err(DomainError::Conflict("slug sequence already taken".into()));
        }

        let updated = Slug::restore(
            id,
            target.name,
            target.scope,
            target.sluggable_type,
            current.sluggable_id,
            current.sequence,
            current.created_at.unwrap_or_default(),
        );
        self.staged.slugs.insert(id, updated.clone());
        self.staged.writes += 1;
        Ok(updated)
    }

    async fn delete(&mut self, id: SlugId) -> DomainResult<()> {
        if self.staged.slugs.remove(&id).is_none() {
            return Err(DomainError::NotFound("slug not found".into()));
        }
        self.staged.writes += 1;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let Self { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
