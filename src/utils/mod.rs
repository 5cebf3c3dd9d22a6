//! Helpers shared by the service layer and HTTP handlers.
//!
//! - [`identifier`] - Base-36 identifier codec
//! - [`url_validator`] - HTTP(S) URL validation

pub mod identifier;
pub mod url_validator;
