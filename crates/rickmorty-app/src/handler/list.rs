//! Character list state machine handlers
//!
//! One mutable session keyed by `(search_query, favourites_only)`. The
//! single-in-flight rule (the `loading` guard) plus the epoch stamp on every
//! completion message means a response belongs to the current session if and
//! only if its epoch matches — anything else is a leftover from a session
//! that was reset while the request was in flight, and is discarded.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::state::AppState;
use rickmorty_core::{Character, CharacterId};

use super::{UpdateAction, UpdateResult};

pub fn handle_list_appeared(state: &mut AppState) -> UpdateResult {
    // Only the first appearance triggers a load; revisiting the screen with
    // accumulated data keeps it, and an empty terminal session (a zero-result
    // page or zero favourites) stays settled.
    if !state.list.characters.is_empty() || state.list.loading || state.list.end_reached {
        return UpdateResult::none();
    }
    dispatch_load(state)
}

/// Kick off the current mode's load. Callers have already reset or verified
/// the session.
fn dispatch_load(state: &mut AppState) -> UpdateResult {
    if state.list.favourites_only {
        state.list.loading = true;
        state.list.end_reached = false;
        UpdateResult::action(UpdateAction::FetchFavourites {
            epoch: state.list.epoch,
        })
    } else {
        fetch_next_page(state)
    }
}

pub fn handle_load_next_page(state: &mut AppState) -> UpdateResult {
    // Favourites mode is a single full load, never paged.
    if state.list.loading || state.list.end_reached || state.list.favourites_only {
        return UpdateResult::none();
    }
    fetch_next_page(state)
}

fn fetch_next_page(state: &mut AppState) -> UpdateResult {
    state.list.loading = true;
    let page = state.list.current_page + 1;
    debug!(page, search = %state.list.search_query, "fetching character page");
    UpdateResult::action(UpdateAction::FetchPage {
        epoch: state.list.epoch,
        page,
        search: state.list.search_query.clone(),
    })
}

pub fn handle_page_loaded(
    state: &mut AppState,
    epoch: u64,
    page: u32,
    characters: Vec<Character>,
    more_available: bool,
) -> UpdateResult {
    if epoch != state.list.epoch {
        debug!(epoch, current = state.list.epoch, "discarding stale page");
        return UpdateResult::none();
    }

    let known: HashSet<CharacterId> = state.list.characters.iter().map(|c| c.id).collect();
    state
        .list
        .characters
        .extend(characters.into_iter().filter(|c| !known.contains(&c.id)));

    state.list.current_page = page;
    state.list.end_reached = !more_available;
    state.list.error = None;
    state.list.loading = false;
    UpdateResult::none()
}

pub fn handle_page_load_failed(state: &mut AppState, epoch: u64, message: String) -> UpdateResult {
    if epoch != state.list.epoch {
        debug!(epoch, current = state.list.epoch, "discarding stale failure");
        return UpdateResult::none();
    }
    warn!(%message, "character page load failed");
    // Accumulated results and cursor stay untouched so the next
    // user-triggered fetch re-requests the same page.
    state.list.error = Some(message);
    state.list.loading = false;
    UpdateResult::none()
}

pub fn handle_toggle_favourites_only(state: &mut AppState) -> UpdateResult {
    state.list.favourites_only = !state.list.favourites_only;
    state.list.reset_session();
    dispatch_load(state)
}

pub fn handle_search_input(state: &mut AppState, text: String) -> UpdateResult {
    // Timer-reset-on-input: every keystroke supersedes the pending timer by
    // bumping the generation; only a timer that fires with the current
    // generation was uninterrupted.
    state.list.pending_search = text;
    state.list.search_generation += 1;
    UpdateResult::action(UpdateAction::ScheduleSearchDebounce {
        generation: state.list.search_generation,
    })
}

pub fn handle_search_debounce_elapsed(state: &mut AppState, generation: u64) -> UpdateResult {
    if generation != state.list.search_generation {
        return UpdateResult::none();
    }
    let text = state.list.pending_search.clone();
    // Duplicate-value suppression: no refetch when the settled text is the
    // one that produced the displayed results.
    if text == state.list.search_query {
        return UpdateResult::none();
    }
    debug!(search = %text, "search settled");
    state.list.search_query = text;
    state.list.reset_session();
    dispatch_load(state)
}

pub fn handle_favourites_loaded(
    state: &mut AppState,
    epoch: u64,
    characters: Vec<Character>,
) -> UpdateResult {
    if epoch != state.list.epoch {
        debug!(epoch, current = state.list.epoch, "discarding stale favourites");
        return UpdateResult::none();
    }

    // Favourites search filters client-side over the resolved names.
    let query = state.list.search_query.to_lowercase();
    state.list.characters = characters
        .into_iter()
        .filter(|c| query.is_empty() || c.name.to_lowercase().contains(&query))
        .collect();

    state.list.end_reached = true;
    state.list.error = None;
    state.list.loading = false;
    UpdateResult::none()
}

pub fn handle_favourites_load_failed(
    state: &mut AppState,
    epoch: u64,
    message: String,
) -> UpdateResult {
    if epoch != state.list.epoch {
        return UpdateResult::none();
    }
    warn!(%message, "favourites load failed");
    state.list.error = Some(message);
    state.list.loading = false;
    UpdateResult::none()
}

pub fn handle_favourites_changed(state: &mut AppState) -> UpdateResult {
    let _ = state;
    // The event carries no payload by contract; re-query the store.
    UpdateResult::action(UpdateAction::RefreshFavouriteIds)
}

pub fn handle_favourite_ids_loaded(state: &mut AppState, ids: Vec<CharacterId>) -> UpdateResult {
    state.list.favourite_ids = ids.into_iter().collect();
    UpdateResult::none()
}

pub fn handle_favourite_ids_load_failed(state: &mut AppState, message: String) -> UpdateResult {
    let _ = state;
    // Badges keep their previous values; the next change event re-queries.
    warn!(%message, "favourite id refresh failed");
    UpdateResult::none()
}
