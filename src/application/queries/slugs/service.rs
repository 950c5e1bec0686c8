// src/application/queries/slugs/service.rs
use std::sync::Arc;

use crate::domain::slug::SlugManager;

pub struct SlugQueryService {
    pub(super) manager: Arc<SlugManager>,
}

impl SlugQueryService {
    pub fn new(manager: Arc<SlugManager>) -> Self {
        Self { manager }
    }
}
