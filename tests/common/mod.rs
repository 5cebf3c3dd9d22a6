#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use short::application::services::{AuthService, RegistryService, ServingAddress};
use short::domain::repositories::UrlRepository;
use short::infrastructure::persistence::{InMemoryUrlRepository, PgUrlRepository};
use short::routes::app_router;
use short::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const FALLBACK_URL: &str = "http://titanous.com/";

/// `Authorization` value for `short:short`.
pub const VALID_AUTH: &str = "Basic c2hvcnQ6c2hvcnQ=";

/// `Authorization` value for `short:incorrect-password`.
pub const WRONG_AUTH: &str = "Basic c2hvcnQ6aW5jb3JyZWN0LXBhc3N3b3Jk";

pub const SEED_URLS: [&str; 3] = [
    "http://www.amazon.com",
    "http://www.ebay.com",
    "http://news.ycombinator.com",
];

pub fn create_test_state(repository: Arc<dyn UrlRepository>) -> AppState {
    let registry = Arc::new(RegistryService::new(
        repository,
        ServingAddress::new("localhost", 4567),
    ));
    let auth_service = Arc::new(AuthService::new("short", "short"));

    AppState::new(registry, auth_service, FALLBACK_URL)
}

pub fn memory_state() -> AppState {
    create_test_state(Arc::new(InMemoryUrlRepository::new()))
}

pub fn pg_state(pool: PgPool) -> AppState {
    create_test_state(Arc::new(PgUrlRepository::new(Arc::new(pool))))
}

/// Registers [`SEED_URLS`] in order, so they get keys 1, 2 and 3.
pub async fn seed(state: &AppState) {
    for url in SEED_URLS {
        state.registry.register(url).await.unwrap();
    }
}

pub async fn seeded_server() -> (TestServer, AppState) {
    let state = memory_state();
    seed(&state).await;
    (server(state.clone()), state)
}

/// Registers `count` distinct URLs, `http://example.com/1` onwards.
pub async fn seed_many(state: &AppState, count: i64) {
    for n in 1..=count {
        state
            .registry
            .register(&format!("http://example.com/{n}"))
            .await
            .unwrap();
    }
}

/// Serves the full application, trailing-slash normalization included.
pub fn server(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service(app_router(state));
    TestServer::new(app).unwrap()
}
