// src/application/queries/slugs/history.rs
use super::SlugQueryService;
use crate::{
    application::{dto::SlugDto, error::ApplicationResult},
    domain::slug::{OwnerRef, SluggableId, SluggableType},
};

pub struct SlugHistoryQuery {
    pub sluggable_type: String,
    pub sluggable_id: i64,
}

impl SlugQueryService {
    /// Every slug the owner has held, newest first.
    pub async fn history(&self, query: SlugHistoryQuery) -> ApplicationResult<Vec<SlugDto>> {
        let owner = OwnerRef::new(
            SluggableType::new(query.sluggable_type)?,
            SluggableId::new(query.sluggable_id)?,
        );

        let mut dtos = Vec::new();
        for mut slug in self.manager.history(&owner).await? {
            let friendly_id = self.manager.to_friendly_identifier(&mut slug).await?;
            dtos.push(SlugDto::new(&slug, friendly_id));
        }
        Ok(dtos)
    }
}
