use std::collections::BTreeMap;
use std::sync::RwLock;

use boxc_types::{IndexField, ObjectId, OutputDocument, ResourceType};

use crate::error::{StoreError, StoreResult};
use crate::traits::SearchIndex;

/// In-memory search index keyed by document id.
///
/// Documents are held in id order so member lookups come back in a stable
/// order.
pub struct InMemorySearchIndex {
    documents: RwLock<BTreeMap<ObjectId, OutputDocument>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }

    /// Ids of every indexed document, in order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.documents
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.documents.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemorySearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn document_id(document: &OutputDocument) -> StoreResult<ObjectId> {
    let raw = document
        .text(IndexField::Id)
        .ok_or(StoreError::MissingDocumentId)?;
    Ok(ObjectId::new(raw)?)
}

impl SearchIndex for InMemorySearchIndex {
    fn add(&self, document: OutputDocument) -> StoreResult<()> {
        let id = document_id(&document)?;
        self.documents
            .write()
            .expect("lock poisoned")
            .insert(id, document);
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> StoreResult<Option<OutputDocument>> {
        Ok(self.documents.read().expect("lock poisoned").get(id).cloned())
    }

    fn remove(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self
            .documents
            .write()
            .expect("lock poisoned")
            .remove(id)
            .is_some())
    }

    fn find_members(
        &self,
        path_entry: &str,
        resource_type: ResourceType,
    ) -> StoreResult<Vec<OutputDocument>> {
        let map = self.documents.read().expect("lock poisoned");
        Ok(map
            .values()
            .filter(|doc| doc.text(IndexField::ResourceType) == Some(resource_type.as_str()))
            .filter(|doc| {
                doc.list(IndexField::AncestorPath)
                    .iter()
                    .any(|entry| entry == path_entry)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, kind: ResourceType, path: &[&str]) -> OutputDocument {
        let mut doc = OutputDocument::new();
        doc.set(IndexField::Id, id).unwrap();
        doc.set(IndexField::ResourceType, kind.as_str()).unwrap();
        doc.set(
            IndexField::AncestorPath,
            path.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
        .unwrap();
        doc
    }

    #[test]
    fn add_replaces_by_id() {
        let index = InMemorySearchIndex::new();
        index.add(doc("f1", ResourceType::File, &["1,w"])).unwrap();
        index.add(doc("f1", ResourceType::File, &["1,w2"])).unwrap();
        assert_eq!(index.len(), 1);
        let stored = index.get(&ObjectId::new("f1").unwrap()).unwrap().unwrap();
        assert_eq!(stored.list(IndexField::AncestorPath).to_vec(), vec!["1,w2".to_string()]);
    }

    #[test]
    fn document_without_id_is_rejected() {
        let index = InMemorySearchIndex::new();
        assert!(matches!(
            index.add(OutputDocument::new()),
            Err(StoreError::MissingDocumentId)
        ));
    }

    #[test]
    fn find_members_filters_on_path_and_type() {
        let index = InMemorySearchIndex::new();
        index.add(doc("f2", ResourceType::File, &["1,c", "2,w"])).unwrap();
        index.add(doc("f1", ResourceType::File, &["1,c", "2,w"])).unwrap();
        index.add(doc("w", ResourceType::Work, &["1,c", "2,w"])).unwrap();
        index.add(doc("f3", ResourceType::File, &["1,c", "2,other"])).unwrap();

        let members = index.find_members("2,w", ResourceType::File).unwrap();
        let ids: Vec<&str> = members
            .iter()
            .filter_map(|d| d.text(IndexField::Id))
            .collect();
        assert_eq!(ids, vec!["f1", "f2"]);
    }

    #[test]
    fn remove_reports_presence() {
        let index = InMemorySearchIndex::new();
        index.add(doc("f1", ResourceType::File, &[])).unwrap();
        let id = ObjectId::new("f1").unwrap();
        assert!(index.remove(&id).unwrap());
        assert!(!index.remove(&id).unwrap());
        assert!(index.is_empty());
    }
}
