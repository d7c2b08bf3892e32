//! Serialization of board sequences for the key-value persistence layer.
//!
//! Columns and tasks are stored under two fixed keys, each value holding
//! the whole sequence field-for-field. JSON is the default, matching what
//! the browser app kept in local storage; postcard is a compact binary
//! alternative.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::board::{BoardSnapshot, Column, Task};

/// Storage key for the column sequence.
pub const COLUMNS_KEY: &str = "tackboard.columns";

/// Storage key for the task sequence.
pub const TASKS_KEY: &str = "tackboard.tasks";

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The storage format name is not recognised.
    #[error("unknown storage format: {0}")]
    UnknownFormat(String),
}

/// On-disk encoding of a stored sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// UTF-8 JSON arrays.
    #[default]
    Json,
    /// postcard binary encoding.
    Postcard,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Postcard => write!(f, "postcard"),
        }
    }
}

impl std::str::FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "postcard" => Ok(Self::Postcard),
            other => Err(CodecError::UnknownFormat(other.to_string())),
        }
    }
}

/// Encodes a sequence of entities in the given format.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the sequence cannot be serialized.
pub fn encode_sequence<T: Serialize>(items: &[T], format: Format) -> Result<Vec<u8>, CodecError> {
    match format {
        Format::Json => {
            serde_json::to_vec(items).map_err(|e| CodecError::Serialization(e.to_string()))
        }
        Format::Postcard => {
            postcard::to_allocvec(items).map_err(|e| CodecError::Serialization(e.to_string()))
        }
    }
}

/// Decodes a sequence of entities from bytes in the given format.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the bytes are malformed.
pub fn decode_sequence<T: DeserializeOwned>(
    bytes: &[u8],
    format: Format,
) -> Result<Vec<T>, CodecError> {
    match format {
        Format::Json => {
            serde_json::from_slice(bytes).map_err(|e| CodecError::Serialization(e.to_string()))
        }
        Format::Postcard => {
            postcard::from_bytes(bytes).map_err(|e| CodecError::Serialization(e.to_string()))
        }
    }
}

/// Encodes a snapshot into its `(key, bytes)` storage entries.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if either sequence fails to encode.
pub fn encode_snapshot(
    snapshot: &BoardSnapshot,
    format: Format,
) -> Result<[(&'static str, Vec<u8>); 2], CodecError> {
    Ok([
        (COLUMNS_KEY, encode_sequence(&snapshot.columns, format)?),
        (TASKS_KEY, encode_sequence(&snapshot.tasks, format)?),
    ])
}

/// Decodes the stored column sequence.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the bytes are malformed.
pub fn decode_columns(bytes: &[u8], format: Format) -> Result<Vec<Column>, CodecError> {
    decode_sequence(bytes, format)
}

/// Decodes the stored task sequence.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the bytes are malformed.
pub fn decode_tasks(bytes: &[u8], format: Format) -> Result<Vec<Task>, CodecError> {
    decode_sequence(bytes, format)
}
