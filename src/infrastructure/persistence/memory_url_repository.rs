//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{UrlRepository, key_at};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Table {
    /// Record with key `k` lives at index `k - 1`.
    records: Vec<UrlRecord>,
    by_original: HashMap<String, i64>,
}

impl Table {
    fn index_of(offset: i64) -> Option<usize> {
        key_at(offset).and_then(|key| usize::try_from(key - 1).ok())
    }
}

/// Process-local repository backed by a `Vec` behind a `tokio` `RwLock`.
///
/// Keys are assigned densely starting at 1. Creation and view-count updates
/// run under the write lock, which gives the same at-most-once creation and
/// no-lost-update guarantees as the PostgreSQL implementation. Data does not
/// survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    table: RwLock<Table>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn first_or_create(&self, original: &str) -> Result<(UrlRecord, bool), AppError> {
        let mut table = self.table.write().await;

        if let Some(&key) = table.by_original.get(original) {
            let record = table.records[(key - 1) as usize].clone();
            return Ok((record, false));
        }

        let key = table.records.len() as i64 + 1;
        let now = Utc::now();
        let record = UrlRecord::new(key, original.to_string(), 0, now, now);

        table.records.push(record.clone());
        table.by_original.insert(original.to_string(), key);

        Ok((record, true))
    }

    async fn find_by_offset(&self, offset: i64) -> Result<Option<UrlRecord>, AppError> {
        let Some(index) = Table::index_of(offset) else {
            return Ok(None);
        };

        let table = self.table.read().await;
        Ok(table.records.get(index).cloned())
    }

    async fn increment_view_count(&self, offset: i64) -> Result<Option<UrlRecord>, AppError> {
        let Some(index) = Table::index_of(offset) else {
            return Ok(None);
        };

        let mut table = self.table.write().await;
        let Some(record) = table.records.get_mut(index) else {
            return Ok(None);
        };

        record.view_count += 1;
        record.updated_at = Utc::now().max(record.updated_at);

        Ok(Some(record.clone()))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.table.read().await.records.len() as i64)
    }

    async fn total_views(&self) -> Result<i64, AppError> {
        let table = self.table.read().await;
        Ok(table.records.iter().map(|r| r.view_count).sum())
    }
}
