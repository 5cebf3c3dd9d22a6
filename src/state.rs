//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, RegistryService};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RegistryService>,
    pub auth_service: Arc<AuthService>,
    /// Destination for unknown identifiers and unmatched routes.
    pub fallback_url: Arc<str>,
}

impl AppState {
    pub fn new(
        registry: Arc<RegistryService>,
        auth_service: Arc<AuthService>,
        fallback_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            registry,
            auth_service,
            fallback_url: fallback_url.into(),
        }
    }
}
