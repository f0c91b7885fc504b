//! Error types for the patch system

/// Patch errors
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// A patch value could not be serialized to JSON
    #[error("patch serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A merged value no longer matches the record shape
    #[error("merged value is not a valid member record: {0}")]
    InvalidShape(#[source] serde_json::Error),
}
