// src/application/commands/slugs/rescope.rs
use super::SlugCommandService;
use crate::{
    application::{
        dto::SlugDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::{SlugId, SlugScope},
};

/// Move a stored slug into another scope partition. This is the only
/// in-place update a persisted slug accepts.
pub struct RescopeSlugCommand {
    pub id: i64,
    pub scope: Option<String>,
}

impl SlugCommandService {
    pub async fn rescope_slug(&self, command: RescopeSlugCommand) -> ApplicationResult<SlugDto> {
        let id = SlugId::new(command.id)?;
        let mut slug = self
            .manager
            .find(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("slug not found"))?;

        slug.set_scope(SlugScope::new(command.scope));
        self.manager.persist(&mut slug).await?;
        self.to_dto(&mut slug).await
    }
}
