//! Handler module - TEA update function and coordinator handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `list`: Character list state machine handlers
//! - `detail`: Character/episode detail handlers

pub(crate) mod detail;
pub(crate) mod list;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use url::Url;

use crate::message::Message;
use rickmorty_core::CharacterId;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
///
/// Every action spawns an independent background task that reports back via
/// a [`Message`]; nothing here touches state directly.
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Fetch one character page for the given session
    FetchPage {
        epoch: u64,
        page: u32,
        search: String,
    },

    /// Resolve the full favourites set for the given session
    FetchFavourites { epoch: u64 },

    /// Start (or restart) the search debounce timer
    ScheduleSearchDebounce { generation: u64 },

    /// Re-query the favourite id set after a change notification
    RefreshFavouriteIds,

    /// Resolve favourite status and all referenced episodes for the
    /// character detail screen
    FetchCharacterDetail {
        character_id: CharacterId,
        episode_urls: Vec<Url>,
    },

    /// Flip a favourite in the store
    ToggleFavourite {
        character_id: CharacterId,
        currently_favourite: bool,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
