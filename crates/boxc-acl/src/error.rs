use boxc_store::StoreError;
use boxc_types::ObjectId;

/// Errors from permission loading and resolution.
///
/// Every variant is fatal for the object being resolved: an object is never
/// indexed with a guessed permission state.
#[derive(Debug, thiserror::Error)]
pub enum AclError {
    /// The repository or ancestor resolver failed.
    #[error("permission store error: {0}")]
    Store(#[from] StoreError),

    /// A non-root object has no ancestor chain.
    #[error("no ancestors found for non-root object {0}")]
    MissingAncestors(ObjectId),

    /// An embargo literal could not be parsed.
    #[error("invalid embargo date on {id}: {value:?}")]
    InvalidDate { id: ObjectId, value: String },

    /// Cache or resolver misconfiguration.
    #[error("ACL configuration error: {0}")]
    Config(String),
}

impl AclError {
    /// Returns `true` for errors caused by malformed repository content
    /// rather than by an unreachable backend.
    pub fn is_structural(&self) -> bool {
        match self {
            Self::MissingAncestors(_) | Self::InvalidDate { .. } => true,
            Self::Store(e) => matches!(
                e,
                StoreError::Type(_) | StoreError::BrokenChain { .. } | StoreError::CyclicChain(_)
            ),
            Self::Config(_) => false,
        }
    }
}

/// Result alias for ACL operations.
pub type AclResult<T> = Result<T, AclError>;
