use thiserror::Error;

/// Failures surfaced by the mutation path.
///
/// Reads never error: a stored string that does not decode degrades to its
/// raw form, and an unreadable backend reads as absent.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refused the operation (quota exceeded, store disabled).
    #[error("storage backend unavailable: {reason}")]
    Unavailable { reason: String },

    /// The value could not be encoded for persistence.
    #[error("value could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StorageError::Unavailable {
            reason: reason.into(),
        }
    }
}
