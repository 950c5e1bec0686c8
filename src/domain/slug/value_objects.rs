// src/domain/slug/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlugId(pub i64);

impl SlugId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("slug id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SlugId> for i64 {
    fn from(value: SlugId) -> Self {
        value.0
    }
}

impl fmt::Display for SlugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SluggableId(pub i64);

impl SluggableId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("sluggable id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SluggableId> for i64 {
    fn from(value: SluggableId) -> Self {
        value.0
    }
}

impl fmt::Display for SluggableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminator naming the owning entity class, e.g. `"Article"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SluggableType(String);

impl SluggableType {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "sluggable type cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SluggableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SluggableType> for String {
    fn from(value: SluggableType) -> Self {
        value.0
    }
}

/// A slug name that has passed the blank check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlugName(String);

impl SlugName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::BlankName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlugName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SlugName> for String {
    fn from(value: SlugName) -> Self {
        value.0
    }
}

/// Partition key narrowing name uniqueness. Blank strings collapse to the
/// unscoped partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SlugScope(Option<String>);

impl SlugScope {
    pub fn new(value: Option<impl Into<String>>) -> Self {
        Self(
            value
                .map(Into::into)
                .filter(|scope: &String| !scope.trim().is_empty()),
        )
    }

    pub const fn unscoped() -> Self {
        Self(None)
    }

    pub fn scoped(value: impl Into<String>) -> Self {
        Self::new(Some(value))
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_unscoped(&self) -> bool {
        self.0.is_none()
    }
}

impl From<SlugScope> for Option<String> {
    fn from(value: SlugScope) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlugSequence(i32);

impl SlugSequence {
    pub const FIRST: Self = Self(1);

    pub fn new(value: i32) -> DomainResult<Self> {
        if value <= 0 {
            Err(DomainError::Validation(
                "slug sequence must be positive".into(),
            ))
        } else {
            Ok(Self(value))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn is_first(self) -> bool {
        self.0 <= 1
    }

    pub fn succ(self) -> DomainResult<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or_else(|| DomainError::Conflict("slug sequence exhausted".into()))
    }
}

impl Default for SlugSequence {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<SlugSequence> for i32 {
    fn from(value: SlugSequence) -> Self {
        value.0
    }
}

impl fmt::Display for SlugSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Polymorphic reference to the record a slug belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerRef {
    pub sluggable_type: SluggableType,
    pub sluggable_id: SluggableId,
}

impl OwnerRef {
    pub fn new(sluggable_type: SluggableType, sluggable_id: SluggableId) -> Self {
        Self {
            sluggable_type,
            sluggable_id,
        }
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.sluggable_type, self.sluggable_id)
    }
}

/// The {name, scope, sluggable_type} triple within which sequences are unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlugGroup {
    pub name: SlugName,
    pub scope: SlugScope,
    pub sluggable_type: SluggableType,
}

impl SlugGroup {
    pub fn new(name: SlugName, scope: SlugScope, sluggable_type: SluggableType) -> Self {
        Self {
            name,
            scope,
            sluggable_type,
        }
    }

    /// Stable text key used to derive per-group lock identifiers.
    pub fn lock_key(&self) -> String {
        format!(
            "{}\u{1f}{}\u{1f}{}",
            self.sluggable_type,
            self.scope.as_deref().unwrap_or_default(),
            self.name
        )
    }
}
