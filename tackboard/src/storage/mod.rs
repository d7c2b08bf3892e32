//! Board persistence on a key-value byte store.
//!
//! The board is stored as two values, one per sequence, under the fixed
//! keys from [`tackboard_proto::codec`]. Loading never fails: a missing key
//! is an empty sequence, and unreadable or malformed data is logged and
//! replaced by an empty sequence. Saving is driven by a
//! [`SnapshotSink`](writer::SnapshotSink); the interactive app uses the
//! non-blocking [`BackgroundWriter`](writer::BackgroundWriter).

pub mod file;
pub mod memory;
pub mod writer;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use writer::{BackgroundWriter, Discard, SnapshotSink, SyncWriter, WriterHandle};

use tackboard_proto::codec::{self, COLUMNS_KEY, CodecError, TASKS_KEY};
use tackboard_proto::{BoardSnapshot, Format};

/// Errors that can occur in a key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading a stored value failed.
    #[error("failed to read {key}: {source}")]
    Read {
        /// Key that was being read.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing or removing a stored value failed.
    #[error("failed to write {key}: {source}")]
    Write {
        /// Key that was being written.
        key: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backing store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The board could not be encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// A process-wide byte store keyed by string.
pub trait KvStore {
    /// Returns the bytes stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `bytes` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be written.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Deletes the value under `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value exists but cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Loads the stored board, substituting empty sequences for anything
/// missing or unreadable.
pub fn load_snapshot(store: &impl KvStore, format: Format) -> BoardSnapshot {
    BoardSnapshot {
        columns: load_sequence(store, COLUMNS_KEY, format, codec::decode_columns),
        tasks: load_sequence(store, TASKS_KEY, format, codec::decode_tasks),
    }
}

/// Writes the board to `store`. An empty board removes both keys.
///
/// # Errors
///
/// Returns [`StorageError`] if encoding or any write fails.
pub fn save_snapshot(
    store: &impl KvStore,
    snapshot: &BoardSnapshot,
    format: Format,
) -> Result<(), StorageError> {
    if snapshot.is_empty() {
        store.remove(COLUMNS_KEY)?;
        return store.remove(TASKS_KEY);
    }
    for (key, bytes) in codec::encode_snapshot(snapshot, format)? {
        store.save(key, &bytes)?;
    }
    Ok(())
}

fn load_sequence<T>(
    store: &impl KvStore,
    key: &str,
    format: Format,
    decode: fn(&[u8], Format) -> Result<Vec<T>, CodecError>,
) -> Vec<T> {
    let bytes = match store.load(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored board data, starting empty");
            return Vec::new();
        }
    };
    match decode(&bytes, format) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(
                key,
                %format,
                error = %e,
                "stored board data is malformed, starting empty"
            );
            Vec::new()
        }
    }
}
