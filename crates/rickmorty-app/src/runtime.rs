//! Coordinator runtime: the confined event loop
//!
//! One logical owner per coordinator bundle: all state mutation happens
//! inside the loop spawned here. The presentation layer sends [`Message`]s
//! in through the handle and observes cloned [`AppState`] snapshots through
//! a watch channel, published after every processed message.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::debug;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::settings::Settings;
use crate::state::AppState;
use rickmorty_api::CatalogApi;
use rickmorty_store::FavouritesStore;

const MESSAGE_CHANNEL_CAPACITY: usize = 64;

/// Handle to a running coordinator bundle.
///
/// Dropping the handle requests best-effort teardown of the event loop and
/// its forwarding task; correctness never depends on cancellation (stale
/// completions are discarded by epoch on arrival).
pub struct Coordinator {
    msg_tx: mpsc::Sender<Message>,
    snapshot_rx: watch::Receiver<AppState>,
    shutdown_tx: watch::Sender<bool>,
}

impl Coordinator {
    /// Spawn the event loop and the store change-stream forwarder.
    pub fn spawn(
        api: Arc<dyn CatalogApi>,
        store: Arc<dyn FavouritesStore>,
        settings: &Settings,
    ) -> Self {
        let (msg_tx, mut msg_rx) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(AppState::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let debounce = Duration::from_millis(settings.search.debounce_ms);

        spawn_change_forwarder(store.subscribe(), msg_tx.clone(), shutdown_rx.clone());

        let loop_tx = msg_tx.clone();
        let mut loop_shutdown = shutdown_rx;
        tokio::spawn(async move {
            let mut state = AppState::new();
            loop {
                tokio::select! {
                    _ = loop_shutdown.changed() => {
                        if *loop_shutdown.borrow() {
                            debug!("coordinator shutting down");
                            break;
                        }
                    }
                    maybe = msg_rx.recv() => {
                        let Some(message) = maybe else { break };
                        process_message(
                            &mut state,
                            message,
                            &loop_tx,
                            &api,
                            &store,
                            debounce,
                        );
                        // Snapshot receivers only care about the latest state.
                        let _ = snapshot_tx.send(state.clone());
                    }
                }
            }
        });

        Self {
            msg_tx,
            snapshot_rx,
            shutdown_tx,
        }
    }

    /// Sender for feeding user intents into the loop.
    pub fn sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Send a message, ignoring a closed loop.
    pub async fn send(&self, message: Message) {
        let _ = self.msg_tx.send(message).await;
    }

    /// Snapshot stream for the presentation layer.
    pub fn snapshots(&self) -> watch::Receiver<AppState> {
        self.snapshot_rx.clone()
    }

    /// Request teardown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Process one message, executing any resulting action and chaining
/// follow-up messages until the update settles.
pub(crate) fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    api: &Arc<dyn CatalogApi>,
    store: &Arc<dyn FavouritesStore>,
    debounce: Duration,
) {
    let mut next = Some(message);
    while let Some(message) = next {
        let result = handler::update(state, message);
        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), api.clone(), store.clone(), debounce);
        }
        next = result.message;
    }
}

/// Bridge the store's broadcast stream into the message loop.
///
/// A lagged receiver only means dropped notifications, and the events carry
/// no payload anyway — one forwarded `FavouritesChanged` re-query covers
/// everything that was missed.
fn spawn_change_forwarder(
    mut events: broadcast::Receiver<rickmorty_store::FavouritesEvent>,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
                event = events.recv() => {
                    match event {
                        Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                            if msg_tx.send(Message::FavouritesChanged).await.is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        }
    });
}
