//! Core domain entities.
//!
//! - [`UrlRecord`] - A shortened URL and its visit counter

pub mod url_record;

pub use url_record::UrlRecord;
