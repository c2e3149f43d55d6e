//! JSON-file backed favourites store
//!
//! Durable state is a single JSON array of character ids, written under an
//! exclusive file lock on every mutation. All mutations are serialized
//! through one async mutex so concurrent toggles from different screens
//! cannot interleave into a corrupted state.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

use rickmorty_core::{CharacterId, Error, Result};

/// Broadcast capacity; a lagged subscriber only means one more re-query.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Change notification. Carries no payload on purpose: consumers must
/// re-query the store rather than trust an event's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouritesEvent {
    Changed,
}

/// The favourites persistence contract consumed by the coordinators.
#[async_trait]
pub trait FavouritesStore: Send + Sync {
    /// All favourite ids, in insertion order.
    async fn favourite_ids(&self) -> Result<Vec<CharacterId>>;

    /// Whether the given id is currently a favourite.
    async fn is_favourite(&self, id: CharacterId) -> Result<bool>;

    /// Add an id. Idempotent: adding a present id has no additional effect.
    async fn add_favourite(&self, id: CharacterId) -> Result<()>;

    /// Remove an id. Removing an absent id is a no-op, not an error.
    async fn remove_favourite(&self, id: CharacterId) -> Result<()>;

    /// Subscribe to change notifications. At-least-once per mutation,
    /// published after the mutation is durably applied.
    fn subscribe(&self) -> broadcast::Receiver<FavouritesEvent>;
}

/// File-backed [`FavouritesStore`] implementation.
pub struct JsonFavouritesStore {
    path: PathBuf,
    ids: Mutex<Vec<CharacterId>>,
    events: broadcast::Sender<FavouritesEvent>,
}

impl JsonFavouritesStore {
    /// Open the store at `path`, creating an empty set when the file does
    /// not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let ids = load_ids(&path)?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        debug!(path = %path.display(), count = ids.len(), "favourites store opened");
        Ok(Self {
            path,
            ids: Mutex::new(ids),
            events,
        })
    }

    fn publish(&self) {
        // Err just means no live subscribers.
        let _ = self.events.send(FavouritesEvent::Changed);
    }
}

#[async_trait]
impl FavouritesStore for JsonFavouritesStore {
    async fn favourite_ids(&self) -> Result<Vec<CharacterId>> {
        Ok(self.ids.lock().await.clone())
    }

    async fn is_favourite(&self, id: CharacterId) -> Result<bool> {
        Ok(self.ids.lock().await.contains(&id))
    }

    async fn add_favourite(&self, id: CharacterId) -> Result<()> {
        let mut ids = self.ids.lock().await;
        if ids.contains(&id) {
            return Ok(());
        }
        ids.push(id);
        if let Err(e) = write_ids(&self.path, &ids) {
            // Roll back the in-memory change so the store is never
            // half-applied relative to disk.
            ids.pop();
            warn!(id, "failed to persist favourite add: {e}");
            return Err(e);
        }
        drop(ids);
        self.publish();
        Ok(())
    }

    async fn remove_favourite(&self, id: CharacterId) -> Result<()> {
        let mut ids = self.ids.lock().await;
        let Some(pos) = ids.iter().position(|&existing| existing == id) else {
            return Ok(());
        };
        ids.remove(pos);
        if let Err(e) = write_ids(&self.path, &ids) {
            ids.insert(pos, id);
            warn!(id, "failed to persist favourite remove: {e}");
            return Err(e);
        }
        drop(ids);
        self.publish();
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<FavouritesEvent> {
        self.events.subscribe()
    }
}

fn load_ids(path: &Path) -> Result<Vec<CharacterId>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(Error::storage(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::storage(format!("corrupt favourites file {}: {e}", path.display())))
}

fn write_ids(path: &Path, ids: &[CharacterId]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
    }

    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::storage(format!("failed to open {}: {e}", path.display())))?;

    // Exclusive lock guards against a second process writing concurrently;
    // released when the file handle drops. Truncation happens only after the
    // lock is held so a contending reader never observes an empty file.
    file.lock_exclusive()
        .map_err(|e| Error::storage(format!("failed to lock {}: {e}", path.display())))?;
    file.set_len(0)
        .map_err(|e| Error::storage(format!("failed to truncate {}: {e}", path.display())))?;

    let content = serde_json::to_vec_pretty(ids)
        .map_err(|e| Error::storage(format!("failed to encode favourites: {e}")))?;

    let mut file = file;
    file.write_all(&content)
        .map_err(|e| Error::storage(format!("failed to write {}: {e}", path.display())))?;
    file.flush()
        .map_err(|e| Error::storage(format!("failed to flush {}: {e}", path.display())))?;
    Ok(())
}
