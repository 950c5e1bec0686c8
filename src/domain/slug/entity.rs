// src/domain/slug/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::slug::registry::Owner;
use crate::domain::slug::value_objects::{
    OwnerRef, SlugGroup, SlugId, SlugName, SlugScope, SlugSequence, SluggableId, SluggableType,
};
use chrono::{DateTime, Utc};

/// A friendly identifier record, either transient (no id yet) or persisted.
///
/// `name` stays a raw string until `validate` runs so that blank candidates
/// can be represented and rejected explicitly at persist time.
#[derive(Debug, Clone)]
pub struct Slug {
    id: Option<SlugId>,
    pub name: String,
    scope: SlugScope,
    pub sluggable_type: SluggableType,
    pub sluggable_id: Option<SluggableId>,
    pub sequence: SlugSequence,
    pub created_at: Option<DateTime<Utc>>,
    loaded_scope: Option<SlugScope>,
    owner: Option<Owner>,
}

impl Slug {
    pub fn new(
        name: impl Into<String>,
        scope: SlugScope,
        sluggable_type: SluggableType,
        sluggable_id: Option<SluggableId>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            scope,
            sluggable_type,
            sluggable_id,
            sequence: SlugSequence::FIRST,
            created_at: None,
            loaded_scope: None,
            owner: None,
        }
    }

    pub fn for_owner(name: impl Into<String>, scope: SlugScope, owner: &OwnerRef) -> Self {
        Self::new(
            name,
            scope,
            owner.sluggable_type.clone(),
            Some(owner.sluggable_id),
        )
    }

    /// Rebuild a persisted slug from stored columns.
    pub fn restore(
        id: SlugId,
        name: SlugName,
        scope: SlugScope,
        sluggable_type: SluggableType,
        sluggable_id: Option<SluggableId>,
        sequence: SlugSequence,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            loaded_scope: Some(scope.clone()),
            scope,
            sluggable_type,
            sluggable_id,
            sequence,
            created_at: Some(created_at),
            owner: None,
        }
    }

    pub const fn id(&self) -> Option<SlugId> {
        self.id
    }

    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub const fn is_new_record(&self) -> bool {
        self.id.is_none()
    }

    pub const fn scope(&self) -> &SlugScope {
        &self.scope
    }

    pub fn set_scope(&mut self, scope: SlugScope) {
        self.scope = scope;
    }

    /// True when the scope differs from the value last read from the store.
    pub fn scope_changed(&self) -> bool {
        self.loaded_scope
            .as_ref()
            .is_some_and(|loaded| loaded != &self.scope)
    }

    pub fn owner_ref(&self) -> Option<OwnerRef> {
        self.sluggable_id
            .map(|id| OwnerRef::new(self.sluggable_type.clone(), id))
    }

    /// Fails with `DomainError::BlankName` when the name is blank.
    pub fn validate(&self) -> DomainResult<SlugName> {
        SlugName::new(self.name.clone())
    }

    pub fn group(&self) -> DomainResult<SlugGroup> {
        Ok(SlugGroup::new(
            self.validate()?,
            self.scope.clone(),
            self.sluggable_type.clone(),
        ))
    }

    /// `name` for the first slug of a group, `name<sep><sequence>` afterwards.
    pub fn friendly_id_with(&self, separator: &str) -> String {
        if self.sequence.is_first() {
            self.name.clone()
        } else {
            format!("{}{}{}", self.name, separator, self.sequence)
        }
    }

    /// Two slugs denote the same stored row.
    pub fn same_record(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }

    pub const fn cached_owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub(crate) fn cache_owner(&mut self, owner: Owner) {
        self.owner = Some(owner);
    }

    /// Adopt the columns the store assigned on write.
    pub(crate) fn mark_persisted(&mut self, stored: &Self) {
        self.id = stored.id;
        self.sequence = stored.sequence;
        self.created_at = stored.created_at;
        self.scope = stored.scope.clone();
        self.loaded_scope = Some(stored.scope.clone());
    }
}

#[derive(Debug, Clone)]
pub struct NewSlug {
    pub name: SlugName,
    pub scope: SlugScope,
    pub sluggable_type: SluggableType,
    pub sluggable_id: Option<SluggableId>,
    pub sequence: SlugSequence,
    pub created_at: DateTime<Utc>,
}
