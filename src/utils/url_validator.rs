//! Validation of submitted URLs.
//!
//! Only absolute `http` and `https` URLs with a host are accepted. The input is
//! checked, never rewritten: registration deduplicates on the literal string,
//! so `http://example.com` and `http://example.com/` stay distinct records.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Checks that `input` is an absolute HTTP(S) URL.
///
/// # Errors
///
/// - [`UrlValidationError::SurroundingWhitespace`] if the input is not trimmed
/// - [`UrlValidationError::InvalidFormat`] for unparsable input
/// - [`UrlValidationError::UnsupportedProtocol`] for any scheme other than http/https
/// - [`UrlValidationError::MissingHost`] if the host is empty
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim() != input {
        return Err(UrlValidationError::SurroundingWhitespace);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
