use boxc_types::{ObjectId, TypeError};

/// Errors from repository and search index operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// The object's parent chain does not reach the repository root.
    #[error("ancestor chain of {id} is broken at {missing}")]
    BrokenChain { id: ObjectId, missing: ObjectId },

    /// The object's parent chain loops back on itself.
    #[error("ancestor chain of {0} contains a cycle")]
    CyclicChain(ObjectId),

    /// A snapshot could not be converted into the content model.
    #[error("invalid object snapshot: {0}")]
    Type(#[from] TypeError),

    /// A document handed to the search index has no id field.
    #[error("document has no id field")]
    MissingDocumentId,

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
