//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{UrlRepository, key_at};
use crate::error::AppError;

/// PostgreSQL repository for URL records.
///
/// Registration runs in a transaction holding an advisory lock keyed by the
/// hash of the URL, so concurrent registrations of the same URL are
/// serialised without a unique index on `original`. View counts are bumped
/// with a single `UPDATE ... RETURNING`, which takes the row lock.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn first_or_create(&self, original: &str) -> Result<(UrlRecord, bool), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(original)
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original, view_count, created_at, updated_at
            FROM urls
            WHERE original = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(original)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(record) = existing {
            tx.commit().await?;
            return Ok((record, false));
        }

        let created = sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO urls (original)
            VALUES ($1)
            RETURNING id, original, view_count, created_at, updated_at
            "#,
        )
        .bind(original)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((created, true))
    }

    async fn find_by_offset(&self, offset: i64) -> Result<Option<UrlRecord>, AppError> {
        let Some(key) = key_at(offset) else {
            return Ok(None);
        };

        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original, view_count, created_at, updated_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn increment_view_count(&self, offset: i64) -> Result<Option<UrlRecord>, AppError> {
        let Some(key) = key_at(offset) else {
            return Ok(None);
        };

        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            UPDATE urls
            SET view_count = view_count + 1,
                updated_at = GREATEST(NOW(), updated_at)
            WHERE id = $1
            RETURNING id, original, view_count, created_at, updated_at
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn total_views(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(view_count), 0)::BIGINT FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }
}
