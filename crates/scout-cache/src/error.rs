//! Error types for cache persistence

use thiserror::Error;

/// Failures of the cache's load/save steps.
///
/// These never propagate out of [`crate::PersistentCache`]; `get` and `add`
/// log them and degrade to in-memory-only behavior.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Backing file could not be read or written
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache contents could not be serialized or parsed
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for cache persistence internals
pub(crate) type Result<T> = std::result::Result<T, CacheError>;
