//! Application state (Model in TEA pattern)
//!
//! All mutation happens inside the runtime's event loop; the presentation
//! layer only ever sees cloned snapshots.

use std::collections::HashSet;

use rickmorty_core::{Character, CharacterId, Episode};

/// Derived list-session phase, for consumers that want the state machine
/// view instead of the raw flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Nothing fetched yet for the current session.
    Idle,
    /// A page load or favourites load is in flight.
    Loading,
    /// Data displayed; `terminal` means no further fetch without a reset.
    Loaded { terminal: bool },
    /// The last load failed; re-triggerable.
    Failed,
}

/// State of the paged/filtered character list.
///
/// One mutable session keyed by `(search_query, favourites_only)`. Mode or
/// search changes reset the session (and bump `epoch`) before any new
/// request is issued.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Accumulated characters, arrival order, no duplicate ids.
    pub characters: Vec<Character>,

    /// The search text that produced the currently displayed results.
    pub search_query: String,

    /// Latest typed text, waiting for the debounce window to settle.
    pub pending_search: String,

    /// Favourites-only mode flag.
    pub favourites_only: bool,

    /// 1-based cursor of the last fetched page; 0 before the first fetch.
    pub current_page: u32,

    /// A load is in flight. Mutually exclusive with `end_reached`.
    pub loading: bool,

    /// Terminal flag: no more pages, or favourites fully loaded.
    pub end_reached: bool,

    /// Last error, surfaced for display.
    pub error: Option<String>,

    /// Favourite ids for per-row badges, refreshed from the change stream.
    pub favourite_ids: HashSet<CharacterId>,

    /// Session counter. A task completion stamped with a stale epoch belongs
    /// to a session that has since been reset and is discarded.
    pub epoch: u64,

    /// Keystroke counter for debounce timers; a timer that fires with a
    /// stale generation was superseded by later input.
    pub search_generation: u64,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived state machine phase.
    pub fn phase(&self) -> ListPhase {
        if self.loading {
            ListPhase::Loading
        } else if self.error.is_some() {
            ListPhase::Failed
        } else if self.current_page == 0 && self.characters.is_empty() && !self.end_reached {
            ListPhase::Idle
        } else {
            ListPhase::Loaded {
                terminal: self.end_reached,
            }
        }
    }

    /// Whether the accumulated list already holds this id.
    pub fn contains(&self, id: CharacterId) -> bool {
        self.characters.iter().any(|c| c.id == id)
    }

    /// Per-row favourite badge lookup.
    pub fn is_favourite(&self, id: CharacterId) -> bool {
        self.favourite_ids.contains(&id)
    }

    /// Reset the accumulated session before a mode or search change.
    ///
    /// Bumps the epoch so in-flight completions for the old session are
    /// discarded on arrival.
    pub(crate) fn reset_session(&mut self) {
        self.characters.clear();
        self.current_page = 0;
        self.end_reached = false;
        self.loading = false;
        self.error = None;
        self.epoch += 1;
    }
}

/// Status of a character as a closed enum over the source's free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Alive,
    Dead,
    Unknown,
}

impl StatusKind {
    pub fn from_source(status: &str) -> Self {
        match status {
            "Alive" => StatusKind::Alive,
            "Dead" => StatusKind::Dead,
            _ => StatusKind::Unknown,
        }
    }
}

/// State for the character detail screen.
#[derive(Debug, Clone)]
pub struct CharacterDetailState {
    pub character: Character,

    pub is_favourite: bool,

    /// Episode resolution in flight.
    pub loading: bool,

    /// Last error (episode fetch or favourite toggle).
    pub error: Option<String>,

    /// Fully resolved episodes, in the character's reference order.
    /// Empty when resolution failed: partial success is not exposed.
    pub episodes: Vec<Episode>,
}

impl CharacterDetailState {
    pub fn new(character: Character) -> Self {
        Self {
            character,
            is_favourite: false,
            loading: true,
            error: None,
            episodes: Vec::new(),
        }
    }

    pub fn status_kind(&self) -> StatusKind {
        StatusKind::from_source(&self.character.status)
    }

    /// Display symbol for the source's free-form gender string.
    pub fn gender_symbol(&self) -> &'static str {
        match self.character.gender.as_str() {
            "Male" => "♂︎",
            "Female" => "♀︎",
            _ => "",
        }
    }
}

/// State for the episode detail screen: a pure projection of an
/// already-held episode, no network access.
#[derive(Debug, Clone)]
pub struct EpisodeDetailState {
    pub name: String,
    pub air_date: String,
    pub episode_code: String,
    pub character_count: usize,
}

impl From<&Episode> for EpisodeDetailState {
    fn from(episode: &Episode) -> Self {
        Self {
            name: episode.name.clone(),
            air_date: episode.air_date.clone(),
            episode_code: episode.episode.clone(),
            character_count: episode.characters.len(),
        }
    }
}

/// Complete application state (the Model in TEA)
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Character list state machine.
    pub list: ListState,

    /// Character detail, when that screen is open.
    pub character_detail: Option<CharacterDetailState>,

    /// Episode detail, when that screen is open.
    pub episode_detail: Option<EpisodeDetailState>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
