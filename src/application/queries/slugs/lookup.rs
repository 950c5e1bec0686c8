// src/application/queries/slugs/lookup.rs
use super::SlugQueryService;
use crate::{
    application::{
        dto::{SlugDto, SlugLookupDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::{SlugScope, SluggableType},
};

pub struct LookupSlugQuery {
    pub sluggable_type: String,
    pub friendly_id: String,
    pub scope: Option<String>,
}

impl SlugQueryService {
    /// Resolve a friendly identifier. Outdated identifiers still resolve and
    /// carry the owner's current identifier as `canonical`.
    pub async fn lookup(&self, query: LookupSlugQuery) -> ApplicationResult<SlugLookupDto> {
        let sluggable_type = SluggableType::new(query.sluggable_type)?;
        let mut found = self
            .manager
            .find_by_friendly_id(&query.friendly_id, SlugScope::new(query.scope), &sluggable_type)
            .await?
            .ok_or_else(|| ApplicationError::not_found("slug not found"))?;

        let canonical = match (found.current, found.slug.owner_ref()) {
            (false, Some(owner)) => self.manager.current_friendly_id(&owner).await?,
            _ => None,
        };
        let friendly_id = self.manager.to_friendly_identifier(&mut found.slug).await?;

        Ok(SlugLookupDto {
            slug: SlugDto::new(&found.slug, friendly_id),
            current: found.current,
            canonical,
        })
    }
}
