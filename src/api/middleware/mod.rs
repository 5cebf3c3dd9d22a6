//! HTTP middleware: authentication and request tracing.

pub mod auth;
pub mod tracing;
