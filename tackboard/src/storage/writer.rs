//! Snapshot sinks: where committed board states go.
//!
//! [`BackgroundWriter`] keeps disk I/O off the UI path. It holds only the
//! most recent unsaved snapshot; a burst of edits collapses into one write
//! of the final state, and submitting never blocks.

use std::sync::Arc;

use tackboard_proto::{BoardSnapshot, Format};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{KvStore, save_snapshot};

/// Receives every committed board state.
pub trait SnapshotSink {
    /// Accepts a snapshot for persistence. Must not block on I/O for long
    /// and must not fail: errors are logged by the sink.
    fn submit(&self, snapshot: BoardSnapshot);
}

/// Sink that drops every snapshot. For boards that are never persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl SnapshotSink for Discard {
    fn submit(&self, _snapshot: BoardSnapshot) {}
}

/// Sink that saves synchronously on the calling thread.
#[derive(Debug, Clone)]
pub struct SyncWriter<K> {
    store: K,
    format: Format,
}

impl<K: KvStore> SyncWriter<K> {
    /// Creates a writer saving to `store` in `format`.
    #[must_use]
    pub const fn new(store: K, format: Format) -> Self {
        Self { store, format }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &K {
        &self.store
    }
}

impl<K: KvStore> SnapshotSink for SyncWriter<K> {
    fn submit(&self, snapshot: BoardSnapshot) {
        if let Err(e) = save_snapshot(&self.store, &snapshot, self.format) {
            tracing::warn!(error = %e, "failed to save board");
        }
    }
}

/// Sink that hands snapshots to a tokio task for saving.
#[derive(Debug)]
pub struct BackgroundWriter {
    latest: watch::Sender<BoardSnapshot>,
}

/// Owns the background save task of a [`BackgroundWriter`].
#[derive(Debug)]
pub struct WriterHandle {
    worker: JoinHandle<()>,
}

impl BackgroundWriter {
    /// Spawns the save task. Must be called from within a tokio runtime.
    pub fn spawn<K>(store: K, format: Format) -> (Self, WriterHandle)
    where
        K: KvStore + Send + Sync + 'static,
    {
        let (latest, mut rx) = watch::channel(BoardSnapshot::default());
        let store = Arc::new(store);

        let worker = tokio::spawn(async move {
            // Ends once the writer is dropped and the last value was seen.
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                let store = Arc::clone(&store);
                let saved = tokio::task::spawn_blocking(move || {
                    save_snapshot(store.as_ref(), &snapshot, format)
                })
                .await;
                match saved {
                    Ok(Ok(())) => tracing::trace!("board saved"),
                    Ok(Err(e)) => tracing::warn!(error = %e, "failed to save board"),
                    Err(e) => tracing::error!(error = %e, "board save task panicked"),
                }
            }
            tracing::debug!("background writer stopped");
        });

        (Self { latest }, WriterHandle { worker })
    }
}

impl SnapshotSink for BackgroundWriter {
    fn submit(&self, snapshot: BoardSnapshot) {
        self.latest.send_replace(snapshot);
    }
}

impl WriterHandle {
    /// Waits for the pending snapshot to be saved and the task to exit.
    ///
    /// The matching [`BackgroundWriter`] must be dropped first, or this
    /// never returns.
    pub async fn shutdown(self) {
        if let Err(e) = self.worker.await {
            tracing::error!(error = %e, "background writer task failed");
        }
    }
}
