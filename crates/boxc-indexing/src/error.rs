use boxc_acl::AclError;
use boxc_store::StoreError;
use boxc_types::{IndexField, ObjectId, TypeError};

/// Errors that abort indexing of a single object.
///
/// Every variant is object-scoped: a batch records it against the object and
/// carries on with the rest.
#[derive(Debug, thiserror::Error)]
pub enum IndexingError {
    /// The repository returned a resource type the indexer does not know.
    #[error("unknown resource type: {0:?}")]
    UnknownResourceType(String),

    /// A non-root object has no ancestor chain.
    #[error("no ancestors found for non-root object {0}")]
    MissingAncestors(ObjectId),

    /// The ancestor chain of an object does not start at the repository root.
    #[error("ancestor chain of {id} starts at {first}, not the repository root")]
    RootlessChain { id: ObjectId, first: ObjectId },

    /// A file has neither an original binary nor streaming properties.
    #[error("file {0} has no original binary and no streaming properties")]
    MissingOriginal(ObjectId),

    /// A date literal could not be parsed.
    #[error("invalid date on {id}: {value:?}")]
    InvalidDate { id: ObjectId, value: String },

    /// Effective access could not be determined.
    #[error(transparent)]
    Acl(#[from] AclError),

    /// The repository or search index failed.
    #[error("store error: {0}")]
    Store(StoreError),

    /// A value could not be converted or written.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// A filter requires a field no earlier filter provides.
    #[error("filter '{filter}' requires {field}, which no earlier filter provides")]
    UnsatisfiedDependency { filter: String, field: IndexField },

    /// Two filters claim the same field.
    #[error("field {field} is provided by both '{first}' and '{second}'")]
    DuplicateProvider {
        field: IndexField,
        first: String,
        second: String,
    },

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for IndexingError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Type(TypeError::UnknownResourceType(kind)) => Self::UnknownResourceType(kind),
            other => Self::Store(other),
        }
    }
}

impl IndexingError {
    /// Malformed repository content: retrying without fixing the data will
    /// fail the same way.
    pub fn is_structural(&self) -> bool {
        match self {
            Self::UnknownResourceType(_)
            | Self::MissingAncestors(_)
            | Self::RootlessChain { .. }
            | Self::MissingOriginal(_)
            | Self::InvalidDate { .. }
            | Self::Type(_) => true,
            Self::Acl(e) => e.is_structural(),
            Self::Store(e) => matches!(
                e,
                StoreError::Type(_) | StoreError::BrokenChain { .. } | StoreError::CyclicChain(_)
            ),
            Self::UnsatisfiedDependency { .. } | Self::DuplicateProvider { .. } | Self::Config(_) => {
                false
            }
        }
    }

    /// Permission state could not be resolved.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Acl(e) if !e.is_structural())
    }
}

/// Result alias for indexing operations.
pub type IndexingResult<T> = Result<T, IndexingError>;
