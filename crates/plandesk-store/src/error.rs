//! Error types for the store

use std::path::PathBuf;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure while reading or writing a key
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blob could not be encoded
    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] serde_json::Error),

    /// Key is not usable as a storage name
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
