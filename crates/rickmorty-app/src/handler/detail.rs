//! Character and episode detail handlers
//!
//! The character detail screen resolves favourite status and every
//! referenced episode concurrently on open. The favourite toggle flips the
//! displayed flag only after the store mutation succeeds.

use tracing::warn;

use crate::state::{AppState, CharacterDetailState, EpisodeDetailState};
use rickmorty_core::{Character, CharacterId, Episode};

use super::{UpdateAction, UpdateResult};

pub fn handle_character_detail_opened(state: &mut AppState, character: Character) -> UpdateResult {
    let character_id = character.id;
    let episode_urls = character.episode.clone();
    state.character_detail = Some(CharacterDetailState::new(character));
    UpdateResult::action(UpdateAction::FetchCharacterDetail {
        character_id,
        episode_urls,
    })
}

pub fn handle_character_detail_closed(state: &mut AppState) -> UpdateResult {
    state.character_detail = None;
    UpdateResult::none()
}

/// Mutable access to the open detail screen, but only when it still shows
/// the character the completion message is about.
fn detail_for(state: &mut AppState, character_id: CharacterId) -> Option<&mut CharacterDetailState> {
    state
        .character_detail
        .as_mut()
        .filter(|d| d.character.id == character_id)
}

pub fn handle_detail_episodes_loaded(
    state: &mut AppState,
    character_id: CharacterId,
    episodes: Vec<Episode>,
) -> UpdateResult {
    if let Some(detail) = detail_for(state, character_id) {
        detail.episodes = episodes;
        detail.error = None;
        detail.loading = false;
    }
    UpdateResult::none()
}

pub fn handle_detail_episodes_failed(
    state: &mut AppState,
    character_id: CharacterId,
    message: String,
) -> UpdateResult {
    if let Some(detail) = detail_for(state, character_id) {
        warn!(character_id, %message, "episode resolution failed");
        // Partial success is not exposed: a failed fan-out yields zero
        // episodes.
        detail.episodes.clear();
        detail.error = Some(message);
        detail.loading = false;
    }
    UpdateResult::none()
}

pub fn handle_detail_favourite_status(
    state: &mut AppState,
    character_id: CharacterId,
    is_favourite: bool,
) -> UpdateResult {
    if let Some(detail) = detail_for(state, character_id) {
        detail.is_favourite = is_favourite;
    }
    UpdateResult::none()
}

pub fn handle_toggle_favourite(state: &mut AppState) -> UpdateResult {
    let Some(detail) = state.character_detail.as_ref() else {
        return UpdateResult::none();
    };
    // The displayed flag does not flip here; it flips on FavouriteToggled,
    // after the store mutation is durably applied.
    UpdateResult::action(UpdateAction::ToggleFavourite {
        character_id: detail.character.id,
        currently_favourite: detail.is_favourite,
    })
}

pub fn handle_favourite_toggled(
    state: &mut AppState,
    character_id: CharacterId,
    is_favourite: bool,
) -> UpdateResult {
    if let Some(detail) = detail_for(state, character_id) {
        detail.is_favourite = is_favourite;
    }
    UpdateResult::none()
}

pub fn handle_favourite_toggle_failed(
    state: &mut AppState,
    character_id: CharacterId,
    message: String,
) -> UpdateResult {
    if let Some(detail) = detail_for(state, character_id) {
        warn!(character_id, %message, "favourite toggle failed");
        detail.error = Some(message);
    }
    UpdateResult::none()
}

pub fn handle_episode_detail_opened(state: &mut AppState, episode: Episode) -> UpdateResult {
    state.episode_detail = Some(EpisodeDetailState::from(&episode));
    UpdateResult::none()
}

pub fn handle_episode_detail_closed(state: &mut AppState) -> UpdateResult {
    state.episode_detail = None;
    UpdateResult::none()
}
