//! # rickmorty-app - Coordinators
//!
//! The coordinator layer of the catalog client, written in the TEA
//! (model / message / update) style:
//!
//! - [`state::AppState`] is the model: the character list state machine and
//!   the detail screen states, owned exclusively by the runtime's event loop.
//! - [`message::Message`] carries user intents from the presentation layer
//!   and completion reports from background tasks.
//! - [`handler::update`] is the pure update function; it returns an optional
//!   follow-up message and an optional [`handler::UpdateAction`].
//! - [`actions`] turns actions into independent tokio tasks (catalog
//!   requests, favourites resolution, debounce timers, store mutations).
//! - [`runtime::Coordinator`] owns the confined event loop and publishes
//!   state snapshots over a watch channel.
//!
//! The presentation layer is an external collaborator: it renders snapshots
//! and feeds intents back in; nothing in this crate draws anything.

pub mod actions;
pub mod handler;
pub mod message;
pub mod runtime;
pub mod settings;
pub mod state;

pub use handler::{update, UpdateAction, UpdateResult};
pub use message::Message;
pub use runtime::Coordinator;
pub use settings::{load_settings, Settings};
pub use state::{
    AppState, CharacterDetailState, EpisodeDetailState, ListPhase, ListState, StatusKind,
};
