//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every action becomes an independent tokio task that reports back into the
//! confined event loop via a [`Message`]. Tasks never touch coordinator
//! state; staleness is handled on arrival by the epoch/generation stamps.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use crate::handler::UpdateAction;
use crate::message::Message;
use rickmorty_api::CatalogApi;
use rickmorty_core::{Character, Episode, Result};
use rickmorty_store::FavouritesStore;

/// Execute an action by spawning a background task
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    api: Arc<dyn CatalogApi>,
    store: Arc<dyn FavouritesStore>,
    debounce: Duration,
) {
    match action {
        UpdateAction::FetchPage {
            epoch,
            page,
            search,
        } => {
            tokio::spawn(async move {
                let msg = match api.fetch_characters(Some(page), &search).await {
                    Ok((characters, more_available)) => Message::PageLoaded {
                        epoch,
                        page,
                        characters,
                        more_available,
                    },
                    Err(e) => Message::PageLoadFailed {
                        epoch,
                        message: e.user_message(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::FetchFavourites { epoch } => {
            tokio::spawn(async move {
                let msg = match resolve_favourites(api.as_ref(), store.as_ref()).await {
                    Ok(characters) => Message::FavouritesLoaded { epoch, characters },
                    Err(e) => Message::FavouritesLoadFailed {
                        epoch,
                        message: e.user_message(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::ScheduleSearchDebounce { generation } => {
            tokio::spawn(async move {
                tokio::time::sleep(debounce).await;
                let _ = msg_tx
                    .send(Message::SearchDebounceElapsed { generation })
                    .await;
            });
        }

        UpdateAction::RefreshFavouriteIds => {
            tokio::spawn(async move {
                let msg = match store.favourite_ids().await {
                    Ok(ids) => Message::FavouriteIdsLoaded { ids },
                    Err(e) => Message::FavouriteIdsLoadFailed {
                        message: e.user_message(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::FetchCharacterDetail {
            character_id,
            episode_urls,
        } => {
            tokio::spawn(async move {
                // Favourite status and episode resolution run concurrently;
                // each reports its own completion message.
                let (favourite, episodes) = tokio::join!(
                    store.is_favourite(character_id),
                    resolve_episodes(api.as_ref(), &episode_urls),
                );

                if let Ok(is_favourite) = favourite {
                    let _ = msg_tx
                        .send(Message::DetailFavouriteStatus {
                            character_id,
                            is_favourite,
                        })
                        .await;
                }

                let msg = match episodes {
                    Ok(episodes) => Message::DetailEpisodesLoaded {
                        character_id,
                        episodes,
                    },
                    Err(e) => Message::DetailEpisodesFailed {
                        character_id,
                        message: e.user_message(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::ToggleFavourite {
            character_id,
            currently_favourite,
        } => {
            tokio::spawn(async move {
                let result = if currently_favourite {
                    store.remove_favourite(character_id).await
                } else {
                    store.add_favourite(character_id).await
                };
                let msg = match result {
                    Ok(()) => Message::FavouriteToggled {
                        character_id,
                        is_favourite: !currently_favourite,
                    },
                    Err(e) => Message::FavouriteToggleFailed {
                        character_id,
                        message: e.user_message(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            });
        }
    }
}

/// Resolve every favourite id to a full character.
///
/// The fan-out is concurrent with no completion-order guarantee, but
/// `try_join_all` reassembles results in input order, so the final list is
/// deterministic: the order ids came out of the store. All-or-nothing — a
/// single failed resolution fails the whole load.
async fn resolve_favourites(
    api: &dyn CatalogApi,
    store: &dyn FavouritesStore,
) -> Result<Vec<Character>> {
    let ids = store.favourite_ids().await?;
    let fetches = ids.iter().map(|&id| api.fetch_character(id));
    futures_util::future::try_join_all(fetches).await
}

/// Resolve every referenced episode URL concurrently, preserving reference
/// order. All-or-nothing.
async fn resolve_episodes(api: &dyn CatalogApi, urls: &[Url]) -> Result<Vec<Episode>> {
    let fetches = urls.iter().map(|url| api.fetch_episode_url(url));
    futures_util::future::try_join_all(fetches).await
}
