//! Repository trait for URL record storage.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Translates a lookup offset into the record key it addresses.
///
/// Returns `None` for negative offsets, which never match a record.
pub fn key_at(offset: i64) -> Option<i64> {
    if offset < 0 {
        return None;
    }
    offset.checked_add(1)
}

/// Repository interface for URL records.
///
/// Records are addressed by a zero-based offset into the key space: offset
/// `o` designates the record whose key is `o + 1`. Negative offsets never
/// match.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Returns the record whose `original` equals `original` exactly, creating
    /// it with `view_count = 0` if none exists.
    ///
    /// Implementations must create at most one record per distinct `original`
    /// under concurrent calls. The returned flag is `true` when a record was
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn first_or_create(&self, original: &str) -> Result<(UrlRecord, bool), AppError>;

    /// Finds a record by lookup offset without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_offset(&self, offset: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically increments `view_count` and refreshes `updated_at` for the
    /// record at `offset`, returning the updated record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` with the post-increment state
    /// - `Ok(None)` if no record exists at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_view_count(&self, offset: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums `view_count` across all records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn total_views(&self) -> Result<i64, AppError>;
}
