//! Infrastructure layer: concrete storage for the domain repository trait.
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod persistence;
