// src/application/commands/slugs/attach.rs
use super::SlugCommandService;
use crate::{
    application::{dto::SlugDto, error::ApplicationResult},
    domain::slug::{OwnerRef, Slug, SlugScope, SluggableId, SluggableType},
};

/// Record a new slug for an owner. The caller is responsible for pointing the
/// owner's current-slug reference at the returned id.
pub struct AttachSlugCommand {
    pub sluggable_type: String,
    pub sluggable_id: i64,
    pub name: String,
    pub scope: Option<String>,
}

impl AttachSlugCommand {
    pub fn builder() -> AttachSlugCommandBuilder {
        AttachSlugCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct AttachSlugCommandBuilder {
    sluggable_type: Option<String>,
    sluggable_id: Option<i64>,
    name: Option<String>,
    scope: Option<String>,
}

impl AttachSlugCommandBuilder {
    pub fn owner(mut self, sluggable_type: impl Into<String>, sluggable_id: i64) -> Self {
        self.sluggable_type = Some(sluggable_type.into());
        self.sluggable_id = Some(sluggable_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn build(self) -> Result<AttachSlugCommand, &'static str> {
        Ok(AttachSlugCommand {
            sluggable_type: self.sluggable_type.ok_or("owner is required")?,
            sluggable_id: self.sluggable_id.ok_or("owner is required")?,
            name: self.name.ok_or("name is required")?,
            scope: self.scope,
        })
    }
}

impl SlugCommandService {
    pub async fn attach_slug(&self, command: AttachSlugCommand) -> ApplicationResult<SlugDto> {
        let owner = OwnerRef::new(
            SluggableType::new(command.sluggable_type)?,
            SluggableId::new(command.sluggable_id)?,
        );
        let mut slug = Slug::for_owner(command.name, SlugScope::new(command.scope), &owner);

        self.manager.persist(&mut slug).await?;
        self.to_dto(&mut slug).await
    }
}
