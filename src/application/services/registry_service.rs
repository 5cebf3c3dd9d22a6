//! URL registration and resolution service.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::identifier;
use crate::utils::url_validator::validate_url;

/// Public address that short links are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingAddress {
    pub host: String,
    pub port: u16,
}

impl ServingAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ServingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == 80 {
            write!(f, "http://{}", self.host)
        } else {
            write!(f, "http://{}:{}", self.host, self.port)
        }
    }
}

/// Outcome of looking up an identifier.
///
/// A missing record is an ordinary result, not an error: callers fall back to
/// a default destination or a 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(UrlRecord),
    NotFound,
}

impl Resolution {
    pub fn into_record(self) -> Option<UrlRecord> {
        match self {
            Resolution::Found(record) => Some(record),
            Resolution::NotFound => None,
        }
    }
}

impl From<Option<UrlRecord>> for Resolution {
    fn from(record: Option<UrlRecord>) -> Self {
        record.map_or(Resolution::NotFound, Resolution::Found)
    }
}

/// Service for registering URLs and resolving identifiers.
///
/// Generic over the repository so unit tests can use mocks; the HTTP layer
/// uses the default `dyn UrlRepository`.
pub struct RegistryService<R: UrlRepository + ?Sized = dyn UrlRepository> {
    repository: Arc<R>,
    address: ServingAddress,
}

impl<R: UrlRepository + ?Sized> RegistryService<R> {
    /// Creates a new registry service.
    pub fn new(repository: Arc<R>, address: ServingAddress) -> Self {
        Self {
            repository,
            address,
        }
    }

    /// Resolves an identifier and records a visit.
    ///
    /// Undecodable identifiers and identifiers with no record both yield
    /// [`Resolution::NotFound`] without touching the counter. On success the
    /// returned record reflects the increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, identifier: &str) -> Result<Resolution, AppError> {
        let Some(offset) = Self::lookup_offset(identifier) else {
            return Ok(Resolution::NotFound);
        };

        let resolution: Resolution = self.repository.increment_view_count(offset).await?.into();

        if resolution == Resolution::NotFound {
            debug!("No record for identifier {:?}", identifier);
        }

        Ok(resolution)
    }

    /// Looks up an identifier without recording a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn lookup(&self, identifier: &str) -> Result<Resolution, AppError> {
        let Some(offset) = Self::lookup_offset(identifier) else {
            return Ok(Resolution::NotFound);
        };

        Ok(self.repository.find_by_offset(offset).await?.into())
    }

    /// Registers a URL, returning the existing record if it is already known.
    ///
    /// Matching is by exact string equality; no normalization is applied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S)
    /// URL. Nothing is written in that case.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn register(&self, original: &str) -> Result<UrlRecord, AppError> {
        validate_url(original)?;

        let (record, created) = self.repository.first_or_create(original).await?;

        if created {
            info!(key = record.key, identifier = %record.identifier(), "Registered {}", original);
        }

        Ok(record)
    }

    /// Builds the fully-qualified short URL for a record.
    pub fn shortened_url(&self, record: &UrlRecord) -> String {
        format!("{}/{}", self.address, identifier::encode(record.key))
    }

    /// The address short URLs are built from.
    pub fn address(&self) -> &ServingAddress {
        &self.address
    }

    /// Counts registered URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Sums visits across all registered URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn total_views(&self) -> Result<i64, AppError> {
        self.repository.total_views().await
    }

    fn lookup_offset(identifier: &str) -> Option<i64> {
        match identifier::decode(identifier) {
            Ok(offset) if offset >= 0 => Some(offset),
            Ok(_) => None,
            Err(e) => {
                debug!("Rejected identifier {:?}: {}", identifier, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::persistence::InMemoryUrlRepository;
    use chrono::Utc;

    fn address() -> ServingAddress {
        ServingAddress::new("localhost", 4567)
    }

    fn record(key: i64, original: &str, view_count: i64) -> UrlRecord {
        let now = Utc::now();
        UrlRecord::new(key, original.to_string(), view_count, now, now)
    }

    async fn seeded() -> RegistryService<InMemoryUrlRepository> {
        let service = RegistryService::new(Arc::new(InMemoryUrlRepository::new()), address());
        for url in [
            "http://www.amazon.com",
            "http://www.ebay.com",
            "http://news.ycombinator.com",
        ] {
            service.register(url).await.unwrap();
        }
        service
    }

    #[test]
    fn test_serving_address_display() {
        assert_eq!(
            ServingAddress::new("s.example.com", 80).to_string(),
            "http://s.example.com"
        );
        assert_eq!(
            ServingAddress::new("localhost", 4567).to_string(),
            "http://localhost:4567"
        );
    }

    #[tokio::test]
    async fn test_scenario_keys_and_identifiers() {
        let service = seeded().await;

        let amazon = service.lookup("1").await.unwrap().into_record().unwrap();
        let ebay = service.lookup("2").await.unwrap().into_record().unwrap();
        let hn = service.lookup("3").await.unwrap().into_record().unwrap();

        assert_eq!((amazon.key, amazon.identifier()), (1, "1".to_string()));
        assert_eq!((ebay.key, ebay.identifier()), (2, "2".to_string()));
        assert_eq!((hn.key, hn.identifier()), (3, "3".to_string()));
        assert_eq!(hn.original, "http://news.ycombinator.com");
    }

    #[tokio::test]
    async fn test_resolve_increments_view_count() {
        let service = seeded().await;
        let before = service.lookup("1").await.unwrap().into_record().unwrap();
        assert_eq!(before.view_count, 0);

        let resolved = service.resolve("1").await.unwrap().into_record().unwrap();

        assert_eq!(resolved.original, "http://www.amazon.com");
        assert_eq!(resolved.view_count, 1);
        assert!(resolved.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_lookup_does_not_count() {
        let service = seeded().await;

        service.lookup("2").await.unwrap();
        service.lookup("2").await.unwrap();

        assert_eq!(service.total_views().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_resolve_unknown_identifier() {
        let service = seeded().await;

        assert_eq!(service.resolve("abcde").await.unwrap(), Resolution::NotFound);
        assert_eq!(service.resolve("4").await.unwrap(), Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_zero_and_garbage_are_not_found() {
        let service = seeded().await;

        for identifier in ["0", "", "A", "1.json", "zzzzzzzzzzzzzzzzzz", "-1"] {
            assert_eq!(
                service.resolve(identifier).await.unwrap(),
                Resolution::NotFound,
                "{identifier:?}"
            );
        }
        assert_eq!(service.total_views().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let service = seeded().await;
        service.resolve("1").await.unwrap();

        let again = service.register("http://www.amazon.com").await.unwrap();

        assert_eq!(again.key, 1);
        assert_eq!(again.identifier(), "1");
        assert_eq!(again.view_count, 1);
        assert_eq!(service.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_register_new_url_adds_one_record() {
        let service = seeded().await;

        let first = service.register("http://www.google.com").await.unwrap();
        let second = service.register("http://www.google.com").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.key, 4);
        assert_eq!(service.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_url() {
        let service = seeded().await;

        let result = service.register("not a url").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert_eq!(service.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_register_invalid_url_skips_storage() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_first_or_create().times(0);

        let service = RegistryService::new(Arc::new(mock_repo), address());

        let result = service.register("ftp://example.com/file").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_passes_offset_to_repository() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_increment_view_count()
            .withf(|offset| *offset == 35)
            .times(1)
            .returning(|_| Ok(Some(record(36, "http://example.com", 1))));

        let service = RegistryService::new(Arc::new(mock_repo), address());

        let resolved = service.resolve("10").await.unwrap().into_record().unwrap();

        assert_eq!(resolved.key, 36);
        assert_eq!(resolved.identifier(), "10");
    }

    #[tokio::test]
    async fn test_resolve_invalid_identifier_skips_storage() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_increment_view_count().times(0);
        mock_repo.expect_find_by_offset().times(0);

        let service = RegistryService::new(Arc::new(mock_repo), address());

        assert_eq!(service.resolve("0").await.unwrap(), Resolution::NotFound);
        assert_eq!(service.resolve("Ab").await.unwrap(), Resolution::NotFound);
        assert_eq!(service.lookup("!").await.unwrap(), Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_increment_view_count()
            .returning(|_| Err(AppError::internal("Database error", serde_json::Value::Null)));

        let service = RegistryService::new(Arc::new(mock_repo), address());

        assert!(matches!(
            service.resolve("1").await,
            Err(AppError::Internal { .. })
        ));
    }

    #[tokio::test]
    async fn test_shortened_url() {
        let service = RegistryService::new(
            Arc::new(InMemoryUrlRepository::new()),
            ServingAddress::new("s.example.com", 80),
        );

        assert_eq!(
            service.shortened_url(&record(1, "http://a.com", 0)),
            "http://s.example.com/1"
        );
        assert_eq!(
            service.shortened_url(&record(36, "http://a.com", 0)),
            "http://s.example.com/10"
        );
    }

    #[tokio::test]
    async fn test_shortened_url_with_port() {
        let service = seeded().await;
        let record = service.register("http://www.ebay.com").await.unwrap();

        assert_eq!(service.shortened_url(&record), "http://localhost:4567/2");
    }

    #[tokio::test]
    async fn test_dyn_repository() {
        let repository: Arc<dyn UrlRepository> = Arc::new(InMemoryUrlRepository::new());
        let service: RegistryService = RegistryService::new(repository, address());

        let record = service.register("https://rust-lang.org").await.unwrap();
        assert_eq!(service.shortened_url(&record), "http://localhost:4567/1");
    }
}
