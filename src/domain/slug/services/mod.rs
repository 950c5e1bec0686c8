// src/domain/slug/services/mod.rs
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::ports::time::Clock;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::entity::{NewSlug, Slug};
use crate::domain::slug::friendly_id::parse_friendly_id;
use crate::domain::slug::registry::{Owner, OwnerRegistry};
use crate::domain::slug::repository::{SlugStore, SlugTransaction};
use crate::domain::slug::value_objects::{
    OwnerRef, SlugGroup, SlugId, SlugName, SlugScope, SlugSequence, SluggableType,
};

/// Result of resolving a friendly identifier back to a stored slug.
#[derive(Debug, Clone)]
pub struct SlugLookup {
    pub slug: Slug,
    /// False when the slug is part of the owner's history but no longer active.
    pub current: bool,
}

/// Domain service owning the slug lifecycle: validation, reversion, sequence
/// assignment and persistence.
pub struct SlugManager {
    store: Arc<dyn SlugStore>,
    registry: Arc<dyn OwnerRegistry>,
    clock: Arc<dyn Clock>,
}

impl SlugManager {
    pub fn new(
        store: Arc<dyn SlugStore>,
        registry: Arc<dyn OwnerRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            registry,
            clock,
        }
    }

    pub fn validate(candidate: &Slug) -> DomainResult<SlugName> {
        candidate.validate()
    }

    /// Assign `last.sequence + 1` over the group, or 1 when the group is empty.
    pub async fn resolve_sequence(
        tx: &mut dyn SlugTransaction,
        candidate: &mut Slug,
    ) -> DomainResult<SlugSequence> {
        let group = candidate.group()?;
        let similar = tx.find_similar(&group).await?;
        candidate.sequence = match similar.last() {
            Some(last) => last.sequence.succ()?,
            None => SlugSequence::FIRST,
        };
        Ok(candidate.sequence)
    }

    /// Delete the owner's earlier slugs with the candidate's name and scope so
    /// that a name can be reclaimed without bumping its sequence.
    /// Returns the number of rows removed.
    pub async fn reconcile_reversion(
        tx: &mut dyn SlugTransaction,
        candidate: &Slug,
    ) -> DomainResult<usize> {
        let Some(owner) = candidate.owner_ref() else {
            return Ok(0);
        };
        let name = candidate.validate()?;
        let own = tx.find_own_slugs(&owner, &name, candidate.scope()).await?;

        let mut removed = 0;
        for slug in own.iter().filter(|slug| !slug.same_record(candidate)) {
            if let Some(id) = slug.id() {
                tx.delete(id).await?;
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(owner = %owner, name = %name, removed, "reclaimed previously used slug name");
        }
        Ok(removed)
    }

    /// Write `candidate` to the store.
    ///
    /// A persisted slug whose scope is unchanged is left alone and reported as
    /// saved. Otherwise the name is validated, the group lock taken, and
    /// reversion, sequencing and the write run in a single unit of work.
    pub async fn persist(&self, candidate: &mut Slug) -> DomainResult<()> {
        if candidate.is_persisted() && !candidate.scope_changed() {
            debug!(id = ?candidate.id(), "slug already persisted; skipping write");
            return Ok(());
        }

        let group = candidate.group()?;
        let mut tx = self.store.begin(&group).await?;

        Self::reconcile_reversion(tx.as_mut(), candidate).await?;

        let stored = match candidate.id() {
            None => {
                Self::resolve_sequence(tx.as_mut(), candidate).await?;
                tx.insert(NewSlug {
                    name: group.name.clone(),
                    scope: group.scope.clone(),
                    sluggable_type: group.sluggable_type.clone(),
                    sluggable_id: candidate.sluggable_id,
                    sequence: candidate.sequence,
                    created_at: self.clock.now(),
                })
                .await?
            }
            Some(id) => tx.update_scope(id, &group.scope).await?,
        };

        tx.commit().await?;
        candidate.mark_persisted(&stored);

        info!(
            id = ?stored.id(),
            name = %group.name,
            sequence = %stored.sequence,
            sluggable_type = %group.sluggable_type,
            "slug persisted"
        );
        Ok(())
    }

    /// Load and cache the slug's owner, ignoring the owner type's default
    /// filtering. `None` when the slug has no owner id.
    pub async fn resolve_owner<'s>(&self, slug: &'s mut Slug) -> DomainResult<Option<&'s Owner>> {
        if slug.cached_owner().is_none() {
            if let Some(key) = slug.owner_ref() {
                if let Some(owner) = self.registry.find_owner(&key, true).await? {
                    slug.cache_owner(owner);
                }
            }
        }
        Ok(slug.cached_owner())
    }

    pub async fn is_current(&self, slug: &mut Slug) -> DomainResult<bool> {
        let Some(id) = slug.id() else {
            return Ok(false);
        };
        let Some(owner) = self.resolve_owner(slug).await?.cloned() else {
            return Ok(false);
        };
        let current = self.registry.current_slug_of(&owner).await?;
        Ok(current.is_some_and(|current| current.id() == Some(id)))
    }

    pub async fn is_outdated(&self, slug: &mut Slug) -> DomainResult<bool> {
        Ok(!self.is_current(slug).await?)
    }

    pub async fn to_friendly_identifier(&self, slug: &mut Slug) -> DomainResult<String> {
        if slug.sequence.is_first() {
            return Ok(slug.name.clone());
        }
        let separator = match self.resolve_owner(slug).await?.cloned() {
            Some(owner) => self.registry.separator_for(&owner),
            None => self.registry.separator_for_type(&slug.sluggable_type),
        };
        Ok(slug.friendly_id_with(&separator))
    }

    /// Find the slug a friendly identifier names, current or historical.
    ///
    /// A name that itself ends in `<separator><digits>` is tried as a bare
    /// name when the split reading finds nothing.
    pub async fn find_by_friendly_id(
        &self,
        text: &str,
        scope: SlugScope,
        sluggable_type: &SluggableType,
    ) -> DomainResult<Option<SlugLookup>> {
        let separator = self.registry.separator_for_type(sluggable_type);
        let parsed = parse_friendly_id(text, &separator);

        let mut found = self
            .find_in_group(parsed.name.as_str(), parsed.sequence, &scope, sluggable_type)
            .await?;
        if found.is_none() && parsed.name != text {
            found = self
                .find_in_group(text, SlugSequence::FIRST, &scope, sluggable_type)
                .await?;
        }

        let Some(mut slug) = found else {
            return Ok(None);
        };
        let current = self.is_current(&mut slug).await?;
        Ok(Some(SlugLookup { slug, current }))
    }

    async fn find_in_group(
        &self,
        name: &str,
        sequence: SlugSequence,
        scope: &SlugScope,
        sluggable_type: &SluggableType,
    ) -> DomainResult<Option<Slug>> {
        let name = match SlugName::new(name) {
            Ok(name) => name,
            Err(DomainError::BlankName) => return Ok(None),
            Err(err) => return Err(err),
        };
        let group = SlugGroup::new(name, scope.clone(), sluggable_type.clone());
        self.store.find_by_friendly_id(&group, sequence).await
    }

    pub async fn find(&self, id: SlugId) -> DomainResult<Option<Slug>> {
        self.store.find_by_id(id).await
    }

    pub async fn history(&self, owner: &OwnerRef) -> DomainResult<Vec<Slug>> {
        self.store.list_for_owner(owner).await
    }

    /// Friendly identifier of the owner's active slug, if it has one.
    pub async fn current_friendly_id(&self, key: &OwnerRef) -> DomainResult<Option<String>> {
        let Some(owner) = self.registry.find_owner(key, true).await? else {
            return Err(DomainError::NotFound(format!("owner {key} not found")));
        };
        let Some(slug) = self.registry.current_slug_of(&owner).await? else {
            return Ok(None);
        };
        let mut slug = slug.with_owner(owner);
        self.to_friendly_identifier(&mut slug).await.map(Some)
    }
}
