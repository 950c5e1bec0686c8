// src/infrastructure/repositories/postgres_slug.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    NewSlug, OwnerRef, Slug, SlugGroup, SlugId, SlugName, SlugScope, SlugSequence, SlugStore,
    SlugTransaction, SluggableId, SluggableType,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

#[derive(Clone)]
pub struct PostgresSlugStore {
    pool: PgPool,
}

impl PostgresSlugStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn fetch_by_id(pool: &PgPool, id: SlugId) -> DomainResult<Option<Slug>> {
        let row = sqlx::query_as::<_, SlugRow>(
            "SELECT id, name, scope, sluggable_type, sluggable_id, sequence, created_at
             FROM slugs
             WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Slug::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct SlugRow {
    id: i64,
    name: String,
    scope: Option<String>,
    sluggable_type: String,
    sluggable_id: Option<i64>,
    sequence: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<SlugRow> for Slug {
    type Error = DomainError;

    fn try_from(row: SlugRow) -> Result<Self, Self::Error> {
        Ok(Slug::restore(
            SlugId::new(row.id)?,
            SlugName::new(row.name)?,
            SlugScope::new(row.scope),
            SluggableType::new(row.sluggable_type)?,
            row.sluggable_id.map(SluggableId::new).transpose()?,
            SlugSequence::new(row.sequence)?,
            row.created_at,
        ))
    }
}

fn into_slugs(rows: Vec<SlugRow>) -> DomainResult<Vec<Slug>> {
    rows.into_iter().map(Slug::try_from).collect()
}

#[async_trait]
impl SlugStore for PostgresSlugStore {
    async fn begin(&self, group: &SlugGroup) -> DomainResult<Box<dyn SlugTransaction>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Released automatically when the transaction ends.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(group.lock_key())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        Ok(Box::new(PostgresSlugTransaction { tx }))
    }

    async fn find_by_id(&self, id: SlugId) -> DomainResult<Option<Slug>> {
        Self::fetch_by_id(&self.pool, id).await
    }

    async fn find_by_friendly_id(
        &self,
        group: &SlugGroup,
        sequence: SlugSequence,
    ) -> DomainResult<Option<Slug>> {
        let row = sqlx::query_as::<_, SlugRow>(
            "SELECT id, name, scope, sluggable_type, sluggable_id, sequence, created_at
             FROM slugs
             WHERE name = $1
               AND scope IS NOT DISTINCT FROM $2
               AND sluggable_type = $3
               AND sequence = $4
             LIMIT 1",
        )
        .bind(group.name.as_str())
        .bind(group.scope.as_deref())
        .bind(group.sluggable_type.as_str())
        .bind(i32::from(sequence))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Slug::try_from).transpose()
    }

    async fn list_for_owner(&self, owner: &OwnerRef) -> DomainResult<Vec<Slug>> {
        let rows = sqlx::query_as::<_, SlugRow>(
            "SELECT id, name, scope, sluggable_type, sluggable_id, sequence, created_at
             FROM slugs
             WHERE sluggable_type = $1 AND sluggable_id = $2
             ORDER BY id DESC",
        )
        .bind(owner.sluggable_type.as_str())
        .bind(i64::from(owner.sluggable_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_slugs(rows)
    }
}

pub struct PostgresSlugTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SlugTransaction for PostgresSlugTransaction {
    async fn find_similar(&mut self, group: &SlugGroup) -> DomainResult<Vec<Slug>> {
        let rows = sqlx::query_as::<_, SlugRow>(
            "SELECT id, name, scope, sluggable_type, sluggable_id, sequence, created_at
             FROM slugs
             WHERE name = $1
               AND scope IS NOT DISTINCT FROM $2
               AND sluggable_type = $3
             ORDER BY sequence ASC",
        )
        .bind(group.name.as_str())
        .bind(group.scope.as_deref())
        .bind(group.sluggable_type.as_str())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        into_slugs(rows)
    }

    async fn find_own_slugs(
        &mut self,
        owner: &OwnerRef,
        name: &SlugName,
        scope: &SlugScope,
    ) -> DomainResult<Vec<Slug>> {
        let rows = sqlx::query_as::<_, SlugRow>(
            "SELECT id, name, scope, sluggable_type, sluggable_id, sequence, created_at
             FROM slugs
             WHERE sluggable_type = $1
               AND sluggable_id = $2
               AND name = $3
               AND scope IS NOT DISTINCT FROM $4",
        )
        .bind(owner.sluggable_type.as_str())
        .bind(i64::from(owner.sluggable_id))
        .bind(name.as_str())
        .bind(scope.as_deref())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        into_slugs(rows)
    }

    async fn insert(&mut self, slug: NewSlug) -> DomainResult<Slug> {
        let NewSlug {
            name,
            scope,
            sluggable_type,
            sluggable_id,
            sequence,
            created_at,
        } = slug;

        let row = sqlx::query_as::<_, SlugRow>(
            "INSERT INTO slugs (name, scope, sluggable_type, sluggable_id, sequence, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, name, scope, sluggable_type, sluggable_id, sequence, created_at",
        )
        .bind(name.as_str())
        .bind(scope.as_deref())
        .bind(sluggable_type.as_str())
        .bind(sluggable_id.map(i64::from))
        .bind(i32::from(sequence))
        .bind(created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;

        Slug::try_from(row)
    }

    async fn update_scope(&mut self, id: SlugId, scope: &SlugScope) -> DomainResult<Slug> {
        let row = sqlx::query_as::<_, SlugRow>(
            "UPDATE slugs SET scope = $1
             WHERE id = $2
             RETURNING id, name, scope, sluggable_type, sluggable_id, sequence, created_at",
        )
        .bind(scope.as_deref())
        .bind(i64::from(id))
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("slug not found".into()))?;

        Slug::try_from(row)
    }

    async fn delete(&mut self, id: SlugId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM slugs WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("slug not found".into()));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let Self { tx } = *self;
        tx.commit().await.map_err(map_sqlx)
    }
}
