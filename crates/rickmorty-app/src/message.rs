//! Message types for the coordinators (TEA pattern)
//!
//! User intents come from the presentation layer; completion messages come
//! from background tasks spawned by the action dispatcher. Completion
//! messages for list loads are stamped with the epoch of the session that
//! issued them so the update function can discard stale arrivals.

use rickmorty_core::{Character, CharacterId, Episode};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // List Intents
    // ─────────────────────────────────────────────────────────
    /// List screen became visible
    ListAppeared,
    /// User scrolled to the bottom of the list
    LoadNextPage,
    /// Flip between all-characters and favourites-only mode
    ToggleFavouritesOnly,
    /// Search text changed (every keystroke; debounced internally)
    SearchInput { text: String },

    // ─────────────────────────────────────────────────────────
    // List Completions
    // ─────────────────────────────────────────────────────────
    /// A debounce timer fired; stale generations are ignored
    SearchDebounceElapsed { generation: u64 },
    /// A character page arrived
    PageLoaded {
        epoch: u64,
        page: u32,
        characters: Vec<Character>,
        more_available: bool,
    },
    /// A character page failed
    PageLoadFailed { epoch: u64, message: String },
    /// The favourites fan-out resolved every id, in store order
    FavouritesLoaded {
        epoch: u64,
        characters: Vec<Character>,
    },
    /// The favourites fan-out failed (all-or-nothing)
    FavouritesLoadFailed { epoch: u64, message: String },

    // ─────────────────────────────────────────────────────────
    // Favourites Change Stream
    // ─────────────────────────────────────────────────────────
    /// Something in the favourites set may have changed; re-query
    FavouritesChanged,
    /// Fresh favourite id set for per-row badges
    FavouriteIdsLoaded { ids: Vec<CharacterId> },
    /// Favourite id re-query failed
    FavouriteIdsLoadFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Character Detail
    // ─────────────────────────────────────────────────────────
    /// Character detail screen opened for an already-fetched character
    CharacterDetailOpened { character: Character },
    /// Character detail screen closed
    CharacterDetailClosed,
    /// All episode references resolved, in the character's order
    DetailEpisodesLoaded {
        character_id: CharacterId,
        episodes: Vec<Episode>,
    },
    /// Episode resolution failed; zero episodes are exposed
    DetailEpisodesFailed {
        character_id: CharacterId,
        message: String,
    },
    /// Favourite status fetched for the detail screen
    DetailFavouriteStatus {
        character_id: CharacterId,
        is_favourite: bool,
    },
    /// User tapped the favourite toggle on the detail screen
    ToggleFavourite,
    /// Store mutation succeeded; displayed state may now flip
    FavouriteToggled {
        character_id: CharacterId,
        is_favourite: bool,
    },
    /// Store mutation failed; displayed state stays as it was
    FavouriteToggleFailed {
        character_id: CharacterId,
        message: String,
    },

    // ─────────────────────────────────────────────────────────
    // Episode Detail
    // ─────────────────────────────────────────────────────────
    /// Episode detail screen opened for an already-held episode
    EpisodeDetailOpened { episode: Episode },
    /// Episode detail screen closed
    EpisodeDetailClosed,
}
