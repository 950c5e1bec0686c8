// tests/support/builders.rs
use std::sync::Arc;

use slug_ledger::domain::slug::{
    OwnerRef, OwnerRegistry, Slug, SlugManager, SlugScope, SlugStore, SluggableConfig,
    SluggableId, SluggableType,
};
use slug_ledger::infrastructure::registry::InMemoryOwnerRegistry;
use slug_ledger::infrastructure::repositories::InMemorySlugStore;
use slug_ledger::infrastructure::time::FixedClock;

use super::time::fixed_now;

pub fn article(id: i64) -> OwnerRef {
    owner("Article", id)
}

pub fn owner(sluggable_type: &str, id: i64) -> OwnerRef {
    OwnerRef::new(
        SluggableType::new(sluggable_type).unwrap(),
        SluggableId::new(id).unwrap(),
    )
}

/// In-memory store, registry and manager wired together.
pub struct Fixture {
    pub store: Arc<InMemorySlugStore>,
    pub registry: Arc<InMemoryOwnerRegistry>,
    pub manager: Arc<SlugManager>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(Vec::new())
    }

    /// Fixture whose `Article` owners use `separator`.
    pub fn with_article_separator(separator: &str) -> Self {
        Self::build(vec![(
            SluggableType::new("Article").unwrap(),
            SluggableConfig::with_separator(separator),
        )])
    }

    fn build(configs: Vec<(SluggableType, SluggableConfig)>) -> Self {
        let store = Arc::new(InMemorySlugStore::new());
        let mut registry = InMemoryOwnerRegistry::new(Arc::clone(&store) as Arc<dyn SlugStore>);
        for (sluggable_type, config) in configs {
            registry = registry.with_config(sluggable_type, config);
        }
        let registry = Arc::new(registry);
        let manager = Arc::new(SlugManager::new(
            Arc::clone(&store) as Arc<dyn SlugStore>,
            Arc::clone(&registry) as Arc<dyn OwnerRegistry>,
            Arc::new(FixedClock(fixed_now())),
        ));
        Self {
            store,
            registry,
            manager,
        }
    }

    /// Manager over the same registry but a different store.
    pub fn manager_with_store(&self, store: Arc<dyn SlugStore>) -> SlugManager {
        SlugManager::new(
            store,
            Arc::clone(&self.registry) as Arc<dyn OwnerRegistry>,
            Arc::new(FixedClock(fixed_now())),
        )
    }

    /// Persist a new slug for `key` without touching its current pointer.
    pub async fn attach(&self, key: &OwnerRef, name: &str) -> Slug {
        self.attach_scoped(key, name, SlugScope::unscoped()).await
    }

    pub async fn attach_scoped(&self, key: &OwnerRef, name: &str, scope: SlugScope) -> Slug {
        self.registry.register(key.clone()).await;
        let mut slug = Slug::for_owner(name, scope, key);
        self.manager.persist(&mut slug).await.unwrap();
        slug
    }

    /// Persist a new slug for `key` and make it the owner's current one.
    pub async fn rename(&self, key: &OwnerRef, name: &str) -> Slug {
        let slug = self.attach(key, name).await;
        self.registry.set_current(key, slug.id()).await.unwrap();
        slug
    }

    /// Fresh copy from the store, with no cached owner.
    pub async fn reload(&self, slug: &Slug) -> Slug {
        self.manager.find(slug.id().unwrap()).await.unwrap().unwrap()
    }
}
