//! URL record entity.

use chrono::{DateTime, Utc};

use crate::utils::identifier;

/// A stored URL with its visit counter.
///
/// `key` is assigned by storage and never changes. The public identifier is
/// always derived from it, see [`UrlRecord::identifier`].
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    #[sqlx(rename = "id")]
    pub key: i64,
    pub original: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        key: i64,
        original: String,
        view_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key,
            original,
            view_count,
            created_at,
            updated_at,
        }
    }

    /// Returns the base-36 public identifier for this record.
    pub fn identifier(&self) -> String {
        identifier::encode(self.key)
    }
}
