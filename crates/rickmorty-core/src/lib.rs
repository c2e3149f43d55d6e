//! # rickmorty-core - Core Domain Types
//!
//! Foundation crate for the catalog client. Provides the domain types shared
//! by every other crate, the error enum, and the logging bootstrap.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, url, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`models`)
//! - [`Character`] / [`Episode`] - catalog entities, equal and hashed by id
//! - [`ApiPage`] / [`PageInfo`] - paginated response wrapper and metadata
//!
//! ### Error Handling (`error`)
//! - [`Error`] - custom error enum covering transport, decode, remote and
//!   storage failures
//! - [`Result`] - type alias for `std::result::Result<T, Error>`

pub mod error;
pub mod logging;
pub mod models;

/// Prelude for common imports used throughout the catalog client crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, trace, warn};
}

pub use error::{Error, Result};
pub use models::{ApiPage, Character, CharacterId, Episode, EpisodeId, NamedRef, PageInfo};
