// src/infrastructure/registry/postgres.rs
use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::config::AppConfig;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    Owner, OwnerRef, OwnerRegistry, Slug, SlugId, SluggableConfig, SluggableType,
};
use crate::infrastructure::repositories::{PostgresSlugStore, map_sqlx};

/// Where an owner type lives. The current-slug column must be a nullable
/// BIGINT. Table, column and filter text are spliced into SQL verbatim and
/// must come from code, never from request input.
#[derive(Debug, Clone)]
pub struct OwnerTable {
    pub table: String,
    pub current_slug_column: String,
    /// Condition applied to ordinary lookups, e.g. `deleted_at IS NULL`.
    pub default_filter: Option<String>,
    /// Overrides the registry-wide separator for this type.
    pub separator: Option<String>,
}

impl OwnerTable {
    pub fn new(table: impl Into<String>, current_slug_column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            current_slug_column: current_slug_column.into(),
            default_filter: None,
            separator: None,
        }
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = Some(filter.into());
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    fn owner_query(&self, id: i64, bypass_current_filter: bool) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {} AS current_slug_id FROM {} WHERE id = ",
            self.current_slug_column, self.table
        ));
        builder.push_bind(id);

        if !bypass_current_filter {
            if let Some(filter) = &self.default_filter {
                builder.push(" AND (");
                builder.push(filter.as_str());
                builder.push(")");
            }
        }
        builder
    }
}

#[derive(Debug, FromRow)]
struct OwnerRow {
    current_slug_id: Option<i64>,
}

#[derive(Clone)]
pub struct PostgresOwnerRegistry {
    pool: PgPool,
    tables: HashMap<SluggableType, OwnerTable>,
    default_config: SluggableConfig,
}

impl PostgresOwnerRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            tables: HashMap::new(),
            default_config: SluggableConfig::default(),
        }
    }

    /// Registry using the configured `SLUG_SEQUENCE_SEPARATOR` as its default.
    pub fn from_config(pool: PgPool, config: &AppConfig) -> Self {
        Self::new(pool).with_default_separator(config.sequence_separator())
    }

    /// Separator used by types that do not set their own.
    pub fn with_default_separator(mut self, separator: impl Into<String>) -> Self {
        self.default_config = SluggableConfig::with_separator(separator);
        self
    }

    pub fn register(mut self, sluggable_type: SluggableType, table: OwnerTable) -> Self {
        self.tables.insert(sluggable_type, table);
        self
    }
}

#[async_trait]
impl OwnerRegistry for PostgresOwnerRegistry {
    async fn find_owner(
        &self,
        key: &OwnerRef,
        bypass_current_filter: bool,
    ) -> DomainResult<Option<Owner>> {
        let table = self.tables.get(&key.sluggable_type).ok_or_else(|| {
            DomainError::Validation(format!(
                "sluggable type {} is not registered",
                key.sluggable_type
            ))
        })?;

        let mut builder = table.owner_query(i64::from(key.sluggable_id), bypass_current_filter);
        let row = builder
            .build_query_as::<OwnerRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(|row| {
            let current = row.current_slug_id.map(SlugId::new).transpose()?;
            Ok(Owner::new(key.clone(), current))
        })
        .transpose()
    }

    async fn current_slug_of(&self, owner: &Owner) -> DomainResult<Option<Slug>> {
        match owner.current_slug_id {
            Some(id) => PostgresSlugStore::fetch_by_id(&self.pool, id).await,
            None => Ok(None),
        }
    }

    fn config_for(&self, sluggable_type: &SluggableType) -> Option<SluggableConfig> {
        self.tables.get(sluggable_type).map(|table| match &table.separator {
            Some(separator) => SluggableConfig::with_separator(separator.as_str()),
            None => self.default_config.clone(),
        })
    }

    fn default_config(&self) -> SluggableConfig {
        self.default_config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles() -> OwnerTable {
        OwnerTable::new("articles", "slug_id").with_default_filter("published = TRUE")
    }

    #[test]
    fn default_lookup_applies_filter() {
        let builder = articles().owner_query(7, false);
        assert_eq!(
            builder.sql(),
            "SELECT slug_id AS current_slug_id FROM articles WHERE id = $1 AND (published = TRUE)"
        );
    }

    #[test]
    fn bypass_lookup_skips_filter() {
        let builder = articles().owner_query(7, true);
        assert_eq!(
            builder.sql(),
            "SELECT slug_id AS current_slug_id FROM articles WHERE id = $1"
        );
    }

    #[tokio::test]
    async fn table_separator_overrides_registry_default() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let registry = PostgresOwnerRegistry::new(pool)
            .with_default_separator("~")
            .register(SluggableType::new("Article").unwrap(), articles())
            .register(
                SluggableType::new("Page").unwrap(),
                OwnerTable::new("pages", "slug_id").with_separator("-"),
            );

        let separator = |name: &str| {
            registry
                .config_for(&SluggableType::new(name).unwrap())
                .map(|config| config.sequence_separator)
        };
        assert_eq!(separator("Article").as_deref(), Some("~"));
        assert_eq!(separator("Page").as_deref(), Some("-"));
        assert_eq!(separator("Comment"), None);
        assert_eq!(
            registry.separator_for_type(&SluggableType::new("Comment").unwrap()),
            "~"
        );
    }

    #[tokio::test]
    async fn configured_separator_becomes_registry_default() {
        let config = AppConfig::from_source(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/unused".into()),
            "SLUG_SEQUENCE_SEPARATOR" => Some("_".into()),
            _ => None,
        })
        .unwrap();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(config.database_url())
            .unwrap();
        let registry = PostgresOwnerRegistry::from_config(pool, &config)
            .register(SluggableType::new("Article").unwrap(), articles());

        let article = SluggableType::new("Article").unwrap();
        assert_eq!(registry.separator_for_type(&article), "_");
        assert_eq!(registry.default_config().sequence_separator, "_");
    }
}
