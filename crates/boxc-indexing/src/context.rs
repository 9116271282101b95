use std::collections::HashMap;

use boxc_acl::{EffectiveAccessState, OwnGrants};
use boxc_store::StoreError;
use boxc_types::{
    BinaryDescriptor, ContentObject, FieldValue, IndexField, ObjectId, OutputDocument, ResourceType,
};

use crate::error::{IndexingError, IndexingResult};
use crate::services::IndexingServices;

/// Per-object state passed through the filter pipeline.
///
/// A context is owned by exactly one worker for the duration of one object's
/// run, so nothing in it is synchronised. Related data is fetched on first
/// use and kept for the rest of the run.
pub struct DocumentIndexingContext<'a> {
    services: &'a IndexingServices,
    object: ContentObject,
    document: OutputDocument,
    ancestor_ids: Option<Vec<ObjectId>>,
    access_state: Option<EffectiveAccessState>,
    own_grants: Option<OwnGrants>,
    related: HashMap<ObjectId, Option<ContentObject>>,
}

impl<'a> DocumentIndexingContext<'a> {
    pub fn new(services: &'a IndexingServices, object: ContentObject) -> Self {
        Self {
            services,
            object,
            document: OutputDocument::new(),
            ancestor_ids: None,
            access_state: None,
            own_grants: None,
            related: HashMap::new(),
        }
    }

    pub fn services(&self) -> &'a IndexingServices {
        self.services
    }

    pub fn id(&self) -> &ObjectId {
        self.object.id()
    }

    pub fn object(&self) -> &ContentObject {
        &self.object
    }

    pub fn resource_type(&self) -> ResourceType {
        self.object.resource_type()
    }

    pub fn document(&self) -> &OutputDocument {
        &self.document
    }

    /// Write a document field. Each field may be written once.
    pub fn set(&mut self, field: IndexField, value: impl Into<FieldValue>) -> IndexingResult<()> {
        self.document.set(field, value)?;
        Ok(())
    }

    /// Finish the run and take the document.
    pub fn into_document(self) -> OutputDocument {
        self.document
    }

    /// Ancestor ids from the repository root to the immediate parent.
    ///
    /// Empty only for the root; any other object without ancestors is a
    /// structural error.
    pub fn ancestor_ids(&mut self) -> IndexingResult<&[ObjectId]> {
        let ids = match self.ancestor_ids.take() {
            Some(ids) => ids,
            None => {
                let ids = self.services.ancestors().get_ancestor_ids(self.object.id())?;
                if ids.is_empty() && !self.object.is_root() {
                    return Err(IndexingError::MissingAncestors(self.object.id().clone()));
                }
                ids
            }
        };
        Ok(self.ancestor_ids.insert(ids).as_slice())
    }

    /// Effective access of this object.
    pub fn access_state(&mut self) -> IndexingResult<&EffectiveAccessState> {
        let state = match self.access_state.take() {
            Some(state) => state,
            None => self.services.acl().resolve(self.object.id())?,
        };
        Ok(self.access_state.insert(state))
    }

    /// Grants recorded directly on this object.
    pub fn own_grants(&mut self) -> IndexingResult<&OwnGrants> {
        let grants = match self.own_grants.take() {
            Some(grants) => grants,
            None => self.services.permissions().own_grants(self.object.id())?,
        };
        Ok(self.own_grants.insert(grants))
    }

    /// Another object, or `None` if the repository no longer holds it.
    pub fn related_object(&mut self, id: &ObjectId) -> IndexingResult<Option<&ContentObject>> {
        if !self.related.contains_key(id) {
            let loaded = match self.services.repository().get_content_object(id) {
                Ok(object) => Some(object),
                Err(StoreError::NotFound(_)) => None,
                Err(e) => return Err(e.into()),
            };
            self.related.insert(id.clone(), loaded);
        }
        Ok(self.related.get(id).and_then(Option::as_ref))
    }

    /// The immediate parent, if any.
    pub fn parent_object(&mut self) -> IndexingResult<Option<&ContentObject>> {
        match self.object.parent().cloned() {
            Some(parent) => self.related_object(&parent),
            None => Ok(None),
        }
    }

    /// Binaries of another object; an object that has disappeared has none.
    pub fn related_binaries(&self, id: &ObjectId) -> IndexingResult<Vec<BinaryDescriptor>> {
        match self.services.repository().get_binary_descriptors(id) {
            Ok(binaries) => Ok(binaries),
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(id = %id, "related object gone, no binaries");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}
