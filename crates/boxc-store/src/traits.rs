use boxc_types::{BinaryDescriptor, ContentObject, ObjectId, OutputDocument, ResourceType};

use crate::error::StoreResult;

/// Read access to the object repository.
///
/// Implementations must satisfy these invariants:
/// - Calls return point-in-time snapshots; the caller never mutates them.
/// - An unknown id is `Err(StoreError::NotFound)`, not an empty object.
/// - Backend failures are propagated, never silently ignored.
pub trait ObjectRepository: Send + Sync {
    /// Load an object snapshot.
    fn get_content_object(&self, id: &ObjectId) -> StoreResult<ContentObject>;

    /// All binaries recorded for an object (original, derivatives, metadata).
    ///
    /// Non-file objects may still carry metadata binaries.
    fn get_binary_descriptors(&self, id: &ObjectId) -> StoreResult<Vec<BinaryDescriptor>>;

    /// The object's display title, if it has one.
    fn get_title(&self, id: &ObjectId) -> StoreResult<Option<String>>;

    /// Check whether an object exists.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        match self.get_content_object(id) {
            Ok(_) => Ok(true),
            Err(crate::StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Resolves the chain of ancestors of an object.
pub trait AncestorPathResolver: Send + Sync {
    /// Ancestor ids ordered from the repository root to the immediate parent.
    ///
    /// The object itself is excluded; the root's chain is empty.
    fn get_ancestor_ids(&self, id: &ObjectId) -> StoreResult<Vec<ObjectId>>;
}

/// Document store of the search index service.
pub trait SearchIndex: Send + Sync {
    /// Add or replace a document, keyed by its `id` field.
    fn add(&self, document: OutputDocument) -> StoreResult<()>;

    /// Fetch an indexed document.
    fn get(&self, id: &ObjectId) -> StoreResult<Option<OutputDocument>>;

    /// Remove a document. Returns `true` if it was present.
    fn remove(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Documents of the given type whose `ancestorPath` contains `path_entry`
    /// (a `"{tier},{id}"` string), ordered by id.
    fn find_members(
        &self,
        path_entry: &str,
        resource_type: ResourceType,
    ) -> StoreResult<Vec<OutputDocument>>;
}
