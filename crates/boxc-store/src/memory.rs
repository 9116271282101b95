use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use boxc_types::{vocab, BinaryDescriptor, ContentObject, ObjectId, ObjectRecord, ResourceType};

use crate::error::{StoreError, StoreResult};
use crate::traits::{AncestorPathResolver, ObjectRepository};

/// In-memory, HashMap-based object repository.
///
/// Intended for tests and embedding. Records are held behind a `RwLock` for
/// safe concurrent access and cloned on read. The same store answers
/// ancestor queries by walking `parent` links.
pub struct InMemoryRepository {
    records: RwLock<HashMap<ObjectId, ObjectRecord>>,
}

impl InMemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Build a repository from a list of records. Later duplicates win.
    pub fn from_records(records: impl IntoIterator<Item = ObjectRecord>) -> Self {
        let repo = Self::new();
        for record in records {
            repo.insert(record);
        }
        repo
    }

    /// Insert or replace a record.
    pub fn insert(&self, record: ObjectRecord) {
        let mut map = self.records.write().expect("lock poisoned");
        map.insert(record.id.clone(), record);
    }

    /// Apply an in-place change to a stored record.
    pub fn update<F>(&self, id: &ObjectId, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut ObjectRecord),
    {
        let mut map = self.records.write().expect("lock poisoned");
        let record = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        change(record);
        Ok(())
    }

    /// Remove a record. Returns the removed record if it was present.
    pub fn remove(&self, id: &ObjectId) -> Option<ObjectRecord> {
        self.records.write().expect("lock poisoned").remove(id)
    }

    /// The raw record, without conversion into the content model.
    pub fn record(&self, id: &ObjectId) -> Option<ObjectRecord> {
        self.records.read().expect("lock poisoned").get(id).cloned()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of all stored ids.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.records.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Id of the content root, if one is stored.
    pub fn root_id(&self) -> Option<ObjectId> {
        let map = self.records.read().expect("lock poisoned");
        let root = ResourceType::ContentRoot.as_str();
        let mut roots: Vec<&ObjectId> = map
            .values()
            .filter(|r| r.resource_type == root)
            .map(|r| &r.id)
            .collect();
        roots.sort();
        roots.first().map(|id| (*id).clone())
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRepository for InMemoryRepository {
    fn get_content_object(&self, id: &ObjectId) -> StoreResult<ContentObject> {
        let record = self
            .record(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(ContentObject::try_from(record)?)
    }

    fn get_binary_descriptors(&self, id: &ObjectId) -> StoreResult<Vec<BinaryDescriptor>> {
        let map = self.records.read().expect("lock poisoned");
        map.get(id)
            .map(|r| r.binaries.clone())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn get_title(&self, id: &ObjectId) -> StoreResult<Option<String>> {
        let map = self.records.read().expect("lock poisoned");
        let record = map.get(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(record.properties.first(vocab::TITLE).map(str::to_string))
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.records.read().expect("lock poisoned").contains_key(id))
    }
}

impl AncestorPathResolver for InMemoryRepository {
    fn get_ancestor_ids(&self, id: &ObjectId) -> StoreResult<Vec<ObjectId>> {
        let map = self.records.read().expect("lock poisoned");
        let mut current = map.get(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let mut chain = Vec::new();
        let mut seen = HashSet::from([id.clone()]);
        while let Some(parent) = &current.parent {
            if !seen.insert(parent.clone()) {
                return Err(StoreError::CyclicChain(id.clone()));
            }
            current = map.get(parent).ok_or_else(|| StoreError::BrokenChain {
                id: id.clone(),
                missing: parent.clone(),
            })?;
            chain.push(parent.clone());
        }

        chain.reverse();
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ObjectId {
        ObjectId::new(s).unwrap()
    }

    fn record(s: &str, kind: ResourceType, parent: Option<&str>) -> ObjectRecord {
        ObjectRecord::new(id(s), kind, parent.map(id))
    }

    fn sample() -> InMemoryRepository {
        InMemoryRepository::from_records([
            record("root", ResourceType::ContentRoot, None),
            record("unit", ResourceType::AdminUnit, Some("root")),
            record("coll", ResourceType::Collection, Some("unit")),
            record("work", ResourceType::Work, Some("coll")),
        ])
    }

    #[test]
    fn get_content_object_converts_record() {
        let repo = sample();
        let obj = repo.get_content_object(&id("coll")).unwrap();
        assert_eq!(obj.resource_type(), ResourceType::Collection);
        assert_eq!(obj.parent(), Some(&id("unit")));
    }

    #[test]
    fn missing_object_is_not_found() {
        let repo = sample();
        assert!(matches!(
            repo.get_content_object(&id("nope")),
            Err(StoreError::NotFound(_))
        ));
        assert!(!repo.exists(&id("nope")).unwrap());
        assert!(repo.exists(&id("work")).unwrap());
    }

    #[test]
    fn unknown_type_surfaces_as_type_error() {
        let repo = sample();
        let mut bad = record("bad", ResourceType::Folder, Some("coll"));
        bad.resource_type = "Aggregate".into();
        repo.insert(bad);
        assert!(matches!(
            repo.get_content_object(&id("bad")),
            Err(StoreError::Type(_))
        ));
    }

    #[test]
    fn ancestors_ordered_root_first() {
        let repo = sample();
        assert_eq!(
            repo.get_ancestor_ids(&id("work")).unwrap(),
            vec![id("root"), id("unit"), id("coll")]
        );
        assert!(repo.get_ancestor_ids(&id("root")).unwrap().is_empty());
    }

    #[test]
    fn broken_chain_reports_missing_link() {
        let repo = sample();
        repo.insert(record("stray", ResourceType::Folder, Some("ghost")));
        let err = repo.get_ancestor_ids(&id("stray")).unwrap_err();
        assert!(matches!(err, StoreError::BrokenChain { missing, .. } if missing == id("ghost")));
    }

    #[test]
    fn cyclic_chain_is_detected() {
        let repo = InMemoryRepository::from_records([
            record("a", ResourceType::Folder, Some("b")),
            record("b", ResourceType::Folder, Some("a")),
        ]);
        assert!(matches!(
            repo.get_ancestor_ids(&id("a")),
            Err(StoreError::CyclicChain(_))
        ));
    }

    #[test]
    fn title_comes_from_properties() {
        let repo = sample();
        repo.update(&id("coll"), |r| r.properties.set(vocab::TITLE, "Letters"))
            .unwrap();
        assert_eq!(repo.get_title(&id("coll")).unwrap().as_deref(), Some("Letters"));
        assert_eq!(repo.get_title(&id("unit")).unwrap(), None);
    }

    #[test]
    fn update_missing_record_fails() {
        let repo = sample();
        assert!(repo.update(&id("nope"), |_| {}).is_err());
    }

    #[test]
    fn bookkeeping() {
        let repo = sample();
        assert_eq!(repo.len(), 4);
        assert_eq!(repo.root_id(), Some(id("root")));
        assert_eq!(repo.all_ids().first(), Some(&id("coll")));
        assert!(repo.remove(&id("work")).is_some());
        assert_eq!(repo.len(), 3);
        assert!(InMemoryRepository::new().is_empty());
    }
}
