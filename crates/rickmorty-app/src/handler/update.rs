//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;

use super::{detail, list, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        // ─────────────────────────────────────────────────────────
        // List
        // ─────────────────────────────────────────────────────────
        Message::ListAppeared => list::handle_list_appeared(state),
        Message::LoadNextPage => list::handle_load_next_page(state),
        Message::ToggleFavouritesOnly => list::handle_toggle_favourites_only(state),
        Message::SearchInput { text } => list::handle_search_input(state, text),
        Message::SearchDebounceElapsed { generation } => {
            list::handle_search_debounce_elapsed(state, generation)
        }
        Message::PageLoaded {
            epoch,
            page,
            characters,
            more_available,
        } => list::handle_page_loaded(state, epoch, page, characters, more_available),
        Message::PageLoadFailed { epoch, message } => {
            list::handle_page_load_failed(state, epoch, message)
        }
        Message::FavouritesLoaded { epoch, characters } => {
            list::handle_favourites_loaded(state, epoch, characters)
        }
        Message::FavouritesLoadFailed { epoch, message } => {
            list::handle_favourites_load_failed(state, epoch, message)
        }

        // ─────────────────────────────────────────────────────────
        // Favourites Change Stream
        // ─────────────────────────────────────────────────────────
        Message::FavouritesChanged => list::handle_favourites_changed(state),
        Message::FavouriteIdsLoaded { ids } => list::handle_favourite_ids_loaded(state, ids),
        Message::FavouriteIdsLoadFailed { message } => {
            list::handle_favourite_ids_load_failed(state, message)
        }

        // ─────────────────────────────────────────────────────────
        // Detail
        // ─────────────────────────────────────────────────────────
        Message::CharacterDetailOpened { character } => {
            detail::handle_character_detail_opened(state, character)
        }
        Message::CharacterDetailClosed => detail::handle_character_detail_closed(state),
        Message::DetailEpisodesLoaded {
            character_id,
            episodes,
        } => detail::handle_detail_episodes_loaded(state, character_id, episodes),
        Message::DetailEpisodesFailed {
            character_id,
            message,
        } => detail::handle_detail_episodes_failed(state, character_id, message),
        Message::DetailFavouriteStatus {
            character_id,
            is_favourite,
        } => detail::handle_detail_favourite_status(state, character_id, is_favourite),
        Message::ToggleFavourite => detail::handle_toggle_favourite(state),
        Message::FavouriteToggled {
            character_id,
            is_favourite,
        } => detail::handle_favourite_toggled(state, character_id, is_favourite),
        Message::FavouriteToggleFailed {
            character_id,
            message,
        } => detail::handle_favourite_toggle_failed(state, character_id, message),
        Message::EpisodeDetailOpened { episode } => {
            detail::handle_episode_detail_opened(state, episode)
        }
        Message::EpisodeDetailClosed => detail::handle_episode_detail_closed(state),
    }
}
