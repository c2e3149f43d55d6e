//! Handler tests: the list state machine and detail coordinators driven
//! purely through `update()`, no runtime or network involved.

use url::Url;

use crate::handler::{update, UpdateAction, UpdateResult};
use crate::message::Message;
use crate::state::{AppState, ListPhase};
use rickmorty_core::{Character, CharacterId, Episode, NamedRef};

fn character(id: CharacterId, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        status: "Alive".to_string(),
        gender: "Male".to_string(),
        origin: NamedRef {
            name: "Earth (C-137)".to_string(),
        },
        location: NamedRef {
            name: "Earth (Replacement Dimension)".to_string(),
        },
        image: Url::parse(&format!(
            "https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"
        ))
        .unwrap(),
        episode: vec![
            Url::parse("https://rickandmortyapi.com/api/episode/1").unwrap(),
            Url::parse("https://rickandmortyapi.com/api/episode/2").unwrap(),
        ],
    }
}

fn episode(id: i64, name: &str, code: &str) -> Episode {
    Episode {
        id,
        name: name.to_string(),
        air_date: "December 2, 2013".to_string(),
        episode: code.to_string(),
        characters: vec![Url::parse("https://rickandmortyapi.com/api/character/1").unwrap()],
    }
}

fn page_loaded(state: &AppState, page: u32, characters: Vec<Character>, more: bool) -> Message {
    Message::PageLoaded {
        epoch: state.list.epoch,
        page,
        characters,
        more_available: more,
    }
}

/// Assert the result carries a FetchPage action and return (page, search).
fn expect_fetch_page(result: &UpdateResult) -> (u32, String) {
    match &result.action {
        Some(UpdateAction::FetchPage { page, search, .. }) => (*page, search.clone()),
        other => panic!("expected FetchPage action, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paged loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_appear_triggers_first_page_load() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::ListAppeared);
    let (page, search) = expect_fetch_page(&result);
    assert_eq!(page, 1);
    assert_eq!(search, "");
    assert!(state.list.loading);
    assert_eq!(state.list.phase(), ListPhase::Loading);
}

#[test]
fn test_appear_with_accumulated_data_is_noop() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(&state, 1, vec![character(1, "Rick Sanchez")], true);
    update(&mut state, msg);

    let result = update(&mut state, Message::ListAppeared);
    assert!(result.action.is_none());
    assert!(!state.list.loading);
}

#[test]
fn test_appear_after_zero_result_terminal_page_is_noop() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(&state, 1, vec![], false);
    update(&mut state, msg);
    assert!(state.list.end_reached);

    let result = update(&mut state, Message::ListAppeared);
    assert!(result.action.is_none());
    assert!(!state.list.loading);
}

#[test]
fn test_appear_with_zero_favourites_loaded_is_noop() {
    let mut state = AppState::new();
    update(&mut state, Message::ToggleFavouritesOnly);
    let msg = Message::FavouritesLoaded {
        epoch: state.list.epoch,
        characters: vec![],
    };
    update(&mut state, msg);

    let result = update(&mut state, Message::ListAppeared);
    assert!(result.action.is_none());
    assert!(!state.list.loading);
}

#[test]
fn test_only_one_page_load_in_flight() {
    let mut state = AppState::new();
    let first = update(&mut state, Message::ListAppeared);
    assert!(first.action.is_some());

    // Repeated scroll-to-bottom while loading must not issue more requests.
    let second = update(&mut state, Message::LoadNextPage);
    let third = update(&mut state, Message::LoadNextPage);
    assert!(second.action.is_none());
    assert!(third.action.is_none());
}

#[test]
fn test_page_loaded_appends_and_advances_cursor() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(
        &state,
        1,
        vec![character(1, "Rick Sanchez"), character(2, "Morty Smith")],
        true,
    );
    update(&mut state, msg);

    assert_eq!(state.list.characters.len(), 2);
    assert_eq!(state.list.current_page, 1);
    assert!(!state.list.end_reached);
    assert!(!state.list.loading);
    assert!(state.list.error.is_none());

    let result = update(&mut state, Message::LoadNextPage);
    let (page, _) = expect_fetch_page(&result);
    assert_eq!(page, 2);
}

#[test]
fn test_duplicate_ids_across_pages_are_skipped() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(
        &state,
        1,
        vec![character(1, "Rick Sanchez"), character(2, "Morty Smith")],
        true,
    );
    update(&mut state, msg);
    update(&mut state, Message::LoadNextPage);
    // Page 2 overlaps page 1 on id 2.
    let msg = page_loaded(
        &state,
        2,
        vec![character(2, "Morty Smith"), character(3, "Summer Smith")],
        false,
    );
    update(&mut state, msg);

    let ids: Vec<CharacterId> = state.list.characters.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_no_next_link_sets_terminal_and_blocks_further_loads() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(&state, 1, vec![character(1, "Rick Sanchez")], false);
    update(&mut state, msg);

    assert!(state.list.end_reached);
    assert_eq!(state.list.phase(), ListPhase::Loaded { terminal: true });

    let result = update(&mut state, Message::LoadNextPage);
    assert!(result.action.is_none());
}

#[test]
fn test_single_result_last_page_scenario() {
    // Page 1 for query "" returns 1 result with next=null.
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(&state, 1, vec![character(1, "Rick Sanchez")], false);
    update(&mut state, msg);

    assert_eq!(state.list.characters.len(), 1);
    assert!(state.list.end_reached);
    assert!(state.list.error.is_none());
}

#[test]
fn test_failed_load_keeps_list_and_cursor_for_retry() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(&state, 1, vec![character(1, "Rick Sanchez")], true);
    update(&mut state, msg);

    update(&mut state, Message::LoadNextPage);
    let msg = Message::PageLoadFailed {
        epoch: state.list.epoch,
        message: "connection reset".to_string(),
    };
    update(&mut state, msg);

    assert_eq!(state.list.phase(), ListPhase::Failed);
    assert_eq!(state.list.characters.len(), 1);
    assert_eq!(state.list.current_page, 1);

    // The retry re-requests the same page.
    let result = update(&mut state, Message::LoadNextPage);
    let (page, _) = expect_fetch_page(&result);
    assert_eq!(page, 2);
}

#[test]
fn test_error_envelope_scenario_ends_failed_with_empty_list() {
    // Page 1 for query "Rick" returns {error: "Not found"}.
    let mut state = AppState::new();
    update(
        &mut state,
        Message::SearchInput {
            text: "Rick".to_string(),
        },
    );
    let msg = Message::SearchDebounceElapsed {
        generation: state.list.search_generation,
    };
    let result = update(&mut state, msg);
    let (page, search) = expect_fetch_page(&result);
    assert_eq!(page, 1);
    assert_eq!(search, "Rick");

    let msg = Message::PageLoadFailed {
        epoch: state.list.epoch,
        message: "Not found".to_string(),
    };
    update(&mut state, msg);

    assert_eq!(state.list.phase(), ListPhase::Failed);
    assert_eq!(state.list.error.as_deref(), Some("Not found"));
    assert!(state.list.characters.is_empty());
}

#[test]
fn test_stale_epoch_page_is_discarded() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let stale_epoch = state.list.epoch;

    // Mode flips while the page request is still in flight.
    update(&mut state, Message::ToggleFavouritesOnly);

    update(
        &mut state,
        Message::PageLoaded {
            epoch: stale_epoch,
            page: 1,
            characters: vec![character(1, "Rick Sanchez")],
            more_available: true,
        },
    );

    // The slow page response must not clobber the new session.
    assert!(state.list.characters.is_empty());
    assert!(state.list.loading);
}

#[test]
fn test_stale_epoch_failure_is_discarded() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let stale_epoch = state.list.epoch;
    update(&mut state, Message::ToggleFavouritesOnly);

    update(
        &mut state,
        Message::PageLoadFailed {
            epoch: stale_epoch,
            message: "too late".to_string(),
        },
    );
    assert!(state.list.error.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Favourites-only mode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_toggle_resets_visible_list_before_new_data() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(&state, 1, vec![character(1, "Rick Sanchez")], true);
    update(&mut state, msg);
    assert!(!state.list.characters.is_empty());

    let result = update(&mut state, Message::ToggleFavouritesOnly);

    // No flash of stale-mode data: the list is already empty.
    assert!(state.list.characters.is_empty());
    assert_eq!(state.list.current_page, 0);
    assert!(state.list.favourites_only);
    assert!(matches!(
        result.action,
        Some(UpdateAction::FetchFavourites { .. })
    ));
}

#[test]
fn test_toggle_back_reloads_paged_mode() {
    let mut state = AppState::new();
    update(&mut state, Message::ToggleFavouritesOnly);
    let result = update(&mut state, Message::ToggleFavouritesOnly);

    assert!(!state.list.favourites_only);
    let (page, _) = expect_fetch_page(&result);
    assert_eq!(page, 1);
}

#[test]
fn test_favourites_loaded_is_terminal_in_store_order() {
    let mut state = AppState::new();
    update(&mut state, Message::ToggleFavouritesOnly);
    let msg = Message::FavouritesLoaded {
        epoch: state.list.epoch,
        characters: vec![character(3, "Summer Smith"), character(1, "Rick Sanchez")],
    };
    update(&mut state, msg);

    let ids: Vec<CharacterId> = state.list.characters.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert!(state.list.end_reached);
    assert!(!state.list.loading);
}

#[test]
fn test_favourites_set_resolves_scenario() {
    // Favourites set = {1}, favourites-only on, search text "".
    let mut state = AppState::new();
    update(&mut state, Message::ToggleFavouritesOnly);
    let msg = Message::FavouritesLoaded {
        epoch: state.list.epoch,
        characters: vec![character(1, "Rick Sanchez")],
    };
    update(&mut state, msg);
    assert_eq!(state.list.characters.len(), 1);
    assert_eq!(state.list.characters[0].id, 1);
}

#[test]
fn test_favourites_search_filters_case_insensitive() {
    let mut state = AppState::new();
    update(&mut state, Message::ToggleFavouritesOnly);
    update(
        &mut state,
        Message::SearchInput {
            text: "rick".to_string(),
        },
    );
    let msg = Message::SearchDebounceElapsed {
        generation: state.list.search_generation,
    };
    update(&mut state, msg);
    let msg = Message::FavouritesLoaded {
        epoch: state.list.epoch,
        characters: vec![
            character(1, "Rick Sanchez"),
            character(2, "Morty Smith"),
            character(4, "Pickle Rick"),
        ],
    };
    update(&mut state, msg);

    let names: Vec<&str> = state
        .list
        .characters
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Rick Sanchez", "Pickle Rick"]);
}

#[test]
fn test_load_next_page_is_noop_in_favourites_mode() {
    let mut state = AppState::new();
    update(&mut state, Message::ToggleFavouritesOnly);
    let msg = Message::FavouritesLoaded {
        epoch: state.list.epoch,
        characters: vec![],
    };
    update(&mut state, msg);

    let result = update(&mut state, Message::LoadNextPage);
    assert!(result.action.is_none());
}

#[test]
fn test_favourites_load_failure_surfaces_error() {
    let mut state = AppState::new();
    update(&mut state, Message::ToggleFavouritesOnly);
    let msg = Message::FavouritesLoadFailed {
        epoch: state.list.epoch,
        message: "storage error: disk full".to_string(),
    };
    update(&mut state, msg);
    assert_eq!(state.list.phase(), ListPhase::Failed);
    assert!(!state.list.loading);
}

// ─────────────────────────────────────────────────────────────────────────────
// Debounced search
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_three_inputs_in_window_fire_one_request_with_final_text() {
    let mut state = AppState::new();

    for text in ["R", "Ri", "Rick"] {
        let result = update(
            &mut state,
            Message::SearchInput {
                text: text.to_string(),
            },
        );
        assert!(matches!(
            result.action,
            Some(UpdateAction::ScheduleSearchDebounce { .. })
        ));
    }

    // The two superseded timers fire with stale generations.
    let first = update(&mut state, Message::SearchDebounceElapsed { generation: 1 });
    let second = update(&mut state, Message::SearchDebounceElapsed { generation: 2 });
    assert!(first.action.is_none());
    assert!(second.action.is_none());

    let third = update(&mut state, Message::SearchDebounceElapsed { generation: 3 });
    let (page, search) = expect_fetch_page(&third);
    assert_eq!(page, 1);
    assert_eq!(search, "Rick");
    assert_eq!(state.list.search_query, "Rick");
}

#[test]
fn test_settled_duplicate_text_is_suppressed() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(&state, 1, vec![character(1, "Rick Sanchez")], false);
    update(&mut state, msg);

    // Typing and deleting back to the displayed text must not refetch.
    update(
        &mut state,
        Message::SearchInput {
            text: "".to_string(),
        },
    );
    let msg = Message::SearchDebounceElapsed {
        generation: state.list.search_generation,
    };
    let result = update(&mut state, msg);
    assert!(result.action.is_none());
    assert_eq!(state.list.characters.len(), 1);
}

#[test]
fn test_search_change_resets_session() {
    let mut state = AppState::new();
    update(&mut state, Message::ListAppeared);
    let msg = page_loaded(&state, 1, vec![character(1, "Rick Sanchez")], true);
    update(&mut state, msg);
    let old_epoch = state.list.epoch;

    update(
        &mut state,
        Message::SearchInput {
            text: "Morty".to_string(),
        },
    );
    let msg = Message::SearchDebounceElapsed {
        generation: state.list.search_generation,
    };
    update(&mut state, msg);

    assert!(state.list.characters.is_empty());
    assert_eq!(state.list.current_page, 0);
    assert!(state.list.epoch > old_epoch);
}

// ─────────────────────────────────────────────────────────────────────────────
// Favourites change stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_change_event_requeries_ids() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::FavouritesChanged);
    assert!(matches!(
        result.action,
        Some(UpdateAction::RefreshFavouriteIds)
    ));
}

#[test]
fn test_fresh_ids_update_row_badges() {
    let mut state = AppState::new();
    update(&mut state, Message::FavouriteIdsLoaded { ids: vec![1, 3] });
    assert!(state.list.is_favourite(1));
    assert!(!state.list.is_favourite(2));
    assert!(state.list.is_favourite(3));
}

// ─────────────────────────────────────────────────────────────────────────────
// Character detail
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_detail_open_fetches_status_and_episodes() {
    let mut state = AppState::new();
    let rick = character(1, "Rick Sanchez");
    let result = update(
        &mut state,
        Message::CharacterDetailOpened {
            character: rick.clone(),
        },
    );

    match result.action {
        Some(UpdateAction::FetchCharacterDetail {
            character_id,
            episode_urls,
        }) => {
            assert_eq!(character_id, 1);
            assert_eq!(episode_urls, rick.episode);
        }
        other => panic!("expected FetchCharacterDetail, got {other:?}"),
    }
    let detail = state.character_detail.as_ref().unwrap();
    assert!(detail.loading);
    assert!(!detail.is_favourite);
}

#[test]
fn test_detail_episodes_loaded_preserve_order() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::CharacterDetailOpened {
            character: character(1, "Rick Sanchez"),
        },
    );
    update(
        &mut state,
        Message::DetailEpisodesLoaded {
            character_id: 1,
            episodes: vec![episode(1, "Pilot", "S01E01"), episode(2, "Lawnmower Dog", "S01E02")],
        },
    );

    let detail = state.character_detail.as_ref().unwrap();
    assert_eq!(detail.episodes.len(), 2);
    assert_eq!(detail.episodes[0].episode, "S01E01");
    assert!(!detail.loading);
}

#[test]
fn test_detail_episode_failure_exposes_no_partial_result() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::CharacterDetailOpened {
            character: character(1, "Rick Sanchez"),
        },
    );
    update(
        &mut state,
        Message::DetailEpisodesFailed {
            character_id: 1,
            message: "transport error: timed out".to_string(),
        },
    );

    let detail = state.character_detail.as_ref().unwrap();
    assert!(detail.episodes.is_empty());
    assert!(detail.error.is_some());
    assert!(!detail.loading);
}

#[test]
fn test_detail_completion_for_other_character_is_ignored() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::CharacterDetailOpened {
            character: character(1, "Rick Sanchez"),
        },
    );
    update(
        &mut state,
        Message::DetailEpisodesLoaded {
            character_id: 99,
            episodes: vec![episode(1, "Pilot", "S01E01")],
        },
    );
    assert!(state.character_detail.as_ref().unwrap().episodes.is_empty());
}

#[test]
fn test_toggle_flips_only_after_store_success() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::CharacterDetailOpened {
            character: character(1, "Rick Sanchez"),
        },
    );
    update(
        &mut state,
        Message::DetailFavouriteStatus {
            character_id: 1,
            is_favourite: false,
        },
    );

    let result = update(&mut state, Message::ToggleFavourite);
    match result.action {
        Some(UpdateAction::ToggleFavourite {
            character_id,
            currently_favourite,
        }) => {
            assert_eq!(character_id, 1);
            assert!(!currently_favourite);
        }
        other => panic!("expected ToggleFavourite, got {other:?}"),
    }
    // Not flipped yet: the mutation has not completed.
    assert!(!state.character_detail.as_ref().unwrap().is_favourite);

    update(
        &mut state,
        Message::FavouriteToggled {
            character_id: 1,
            is_favourite: true,
        },
    );
    assert!(state.character_detail.as_ref().unwrap().is_favourite);
}

#[test]
fn test_toggle_failure_keeps_prior_state_and_sets_error() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::CharacterDetailOpened {
            character: character(1, "Rick Sanchez"),
        },
    );
    update(
        &mut state,
        Message::FavouriteToggleFailed {
            character_id: 1,
            message: "storage error: read-only".to_string(),
        },
    );

    let detail = state.character_detail.as_ref().unwrap();
    assert!(!detail.is_favourite);
    assert!(detail.error.is_some());
}

// ─────────────────────────────────────────────────────────────────────────────
// Episode detail
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_episode_detail_is_pure_projection() {
    let mut state = AppState::new();
    let result = update(
        &mut state,
        Message::EpisodeDetailOpened {
            episode: episode(28, "The Ricklantis Mixup", "S03E07"),
        },
    );
    // No network access for episode details.
    assert!(result.action.is_none());

    let detail = state.episode_detail.as_ref().unwrap();
    assert_eq!(detail.name, "The Ricklantis Mixup");
    assert_eq!(detail.episode_code, "S03E07");
    assert_eq!(detail.character_count, 1);

    update(&mut state, Message::EpisodeDetailClosed);
    assert!(state.episode_detail.is_none());
}
