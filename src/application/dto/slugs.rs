// src/application/dto/slugs.rs
use crate::domain::slug::Slug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugDto {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub sluggable_type: String,
    #[serde(default)]
    pub sluggable_id: Option<i64>,
    pub sequence: i32,
    pub friendly_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SlugDto {
    pub fn new(slug: &Slug, friendly_id: String) -> Self {
        Self {
            id: slug.id().map(Into::into),
            name: slug.name.clone(),
            scope: slug.scope().clone().into(),
            sluggable_type: slug.sluggable_type.to_string(),
            sluggable_id: slug.sluggable_id.map(Into::into),
            sequence: slug.sequence.into(),
            friendly_id,
            created_at: slug.created_at,
        }
    }
}

/// A resolved friendly identifier. `canonical` carries the owner's current
/// friendly identifier when the requested one is outdated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugLookupDto {
    pub slug: SlugDto,
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}
