//! In-memory owner registry backed by a slug store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    Owner, OwnerRef, OwnerRegistry, Slug, SlugId, SlugStore, SluggableConfig, SluggableType,
};

#[derive(Debug, Clone, Copy, Default)]
struct OwnerEntry {
    current_slug_id: Option<SlugId>,
    /// Hidden from lookups that do not bypass the default filter.
    filtered: bool,
}

pub struct InMemoryOwnerRegistry {
    store: Arc<dyn SlugStore>,
    configs: HashMap<SluggableType, SluggableConfig>,
    owners: RwLock<HashMap<OwnerRef, OwnerEntry>>,
    lookups: AtomicUsize,
}

impl InMemoryOwnerRegistry {
    pub fn new(store: Arc<dyn SlugStore>) -> Self {
        Self {
            store,
            configs: HashMap::new(),
            owners: RwLock::new(HashMap::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn with_config(mut self, sluggable_type: SluggableType, config: SluggableConfig) -> Self {
        self.configs.insert(sluggable_type, config);
        self
    }

    pub async fn register(&self, key: OwnerRef) {
        self.owners.write().await.entry(key).or_default();
    }

    /// Register an owner that default lookups do not see.
    pub async fn register_filtered(&self, key: OwnerRef) {
        self.owners.write().await.entry(key).or_default().filtered = true;
    }

    pub async fn set_current(&self, key: &OwnerRef, slug_id: Option<SlugId>) -> DomainResult<()> {
        let mut owners = self.owners.write().await;
        let entry = owners
            .get_mut(key)
            .ok_or_else(|| DomainError::NotFound(format!("owner {key} not found")))?;
        entry.current_slug_id = slug_id;
        Ok(())
    }

    /// How many times `find_owner` has been called.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl OwnerRegistry for InMemoryOwnerRegistry {
    async fn find_owner(
        &self,
        key: &OwnerRef,
        bypass_current_filter: bool,
    ) -> DomainResult<Option<Owner>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let owners = self.owners.read().await;
        Ok(owners
            .get(key)
            .filter(|entry| bypass_current_filter || !entry.filtered)
            .map(|entry| Owner::new(key.clone(), entry.current_slug_id)))
    }

    async fn current_slug_of(&self, owner: &Owner) -> DomainResult<Option<Slug>> {
        match owner.current_slug_id {
            Some(id) => self.store.find_by_id(id).await,
            None => Ok(None),
        }
    }

    fn config_for(&self, sluggable_type: &SluggableType) -> Option<SluggableConfig> {
        self.configs.get(sluggable_type).cloned()
    }
}
