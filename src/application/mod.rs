//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::registry_service::RegistryService`] - URL registration and identifier resolution
//! - [`services::auth_service::AuthService`] - HTTP Basic credential checks
pub mod services;
