pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that can happen while moving the transaction list in and out of storage.
///
/// None of these are fatal. The store logs them and carries on with whatever it holds in memory.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The stored blob exists but could not be decoded.
    #[error("unable to decode the stored transactions: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The in-memory list could not be encoded.
    #[error("unable to encode the transactions: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The storage backend failed to read or write `key`.
    #[error("unable to access '{key}' in storage: {message}")]
    Storage { key: String, message: String },
}

impl PersistError {
    pub(crate) fn storage(key: &str, e: &Error) -> Self {
        Self::Storage {
            key: key.to_string(),
            message: format!("{e:#}"),
        }
    }
}
