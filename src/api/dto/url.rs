//! DTOs for registration and identifier lookup.

use serde::{Deserialize, Serialize};

/// Parameters accepted by `POST /new`, from the form body or the query string.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterParams {
    pub url: Option<String>,
}

/// A registered URL and its short form.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenedUrlResponse {
    pub original: String,
    pub shortened: String,
}
