//! HTTP request handlers.

pub mod health;
pub mod redirect;
pub mod register;

pub use health::health_handler;
pub use redirect::{fallback_handler, resolve_handler, resolve_path_handler};
pub use register::register_handler;
