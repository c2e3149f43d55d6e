//! # rickmorty-store - Favourites Store
//!
//! Persists the set of favourite character ids locally and broadcasts a
//! payloadless change notification after every durable mutation. The store
//! is the sole source of truth for favourite status: subscribers re-query on
//! every event instead of trusting pushed payloads.

pub mod store;

pub use store::{FavouritesEvent, FavouritesStore, JsonFavouritesStore};
