//! Domain types mirroring the catalog wire format
//!
//! The remote API is the single source of truth per id, so `Character` and
//! `Episode` compare and hash by id only — two values with the same id are
//! interchangeable regardless of other fields.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use url::Url;

/// Stable integer identifier assigned by the remote catalog.
pub type CharacterId = i64;

/// Stable integer identifier assigned by the remote catalog.
pub type EpisodeId = i64;

/// A catalog character as served by `GET /character`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Free-form tri-state from the source ("Alive", "Dead", "unknown").
    pub status: String,
    /// Free-form string from the source.
    pub gender: String,
    pub origin: NamedRef,
    pub location: NamedRef,
    /// Avatar image URL.
    pub image: Url,
    /// Absolute URLs of the episodes this character appears in, in order.
    pub episode: Vec<Url>,
}

impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Character {}

impl Hash for Character {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Name-only reference used for a character's origin and last known location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// A catalog episode as served by `GET /episode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub name: String,
    pub air_date: String,
    /// Episode code, e.g. "S01E01".
    pub episode: String,
    /// Absolute URLs of the characters appearing in this episode.
    pub characters: Vec<Url>,
}

impl PartialEq for Episode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Episode {}

impl Hash for Episode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One page of a paginated catalog response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// Pagination metadata attached to every paged response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<Url>,
    pub prev: Option<Url>,
}

impl PageInfo {
    /// True iff the server reports a next-page link.
    pub fn more_available(&self) -> bool {
        self.next.is_some()
    }
}
