// src/application/commands/slugs/service.rs
use std::sync::Arc;

use crate::{
    application::{dto::SlugDto, error::ApplicationResult},
    domain::slug::{Slug, SlugManager},
};

pub struct SlugCommandService {
    pub(super) manager: Arc<SlugManager>,
}

impl SlugCommandService {
    pub fn new(manager: Arc<SlugManager>) -> Self {
        Self { manager }
    }

    pub(super) async fn to_dto(&self, slug: &mut Slug) -> ApplicationResult<SlugDto> {
        let friendly_id = self.manager.to_friendly_identifier(slug).await?;
        Ok(SlugDto::new(slug, friendly_id))
    }
}
