use stakeout_types::ResourceId;

/// Errors from store operations.
///
/// Probes return these verbatim; classification (retry vs. give up) is the
/// polling engine's concern, not the store's.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record exists for the addressed kind + identity.
    #[error("resource not found: {kind} {id}")]
    NotFound { kind: String, id: ResourceId },

    /// A compare-and-swap update observed a version newer than the one it
    /// fetched. Re-fetching and re-applying the mutation is the remedy.
    #[error("conflict updating {kind} {id}: write based on version {expected}, store has {found}")]
    Conflict {
        kind: String,
        id: ResourceId,
        expected: u64,
        found: u64,
    },

    /// Payload serialization or deserialization failure.
    #[error("codec error: {0}")]
    Codec(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether this error is a missing-record condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error is a version conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
