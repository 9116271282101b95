//! Shared repository fixture for tests.

use std::sync::Arc;

use boxc_acl::AclCacheConfig;
use boxc_indexing::{IndexingServices, PipelineDriver};
use boxc_store::{InMemoryRepository, InMemorySearchIndex, RepositoryFixture};
use boxc_types::ObjectId;

/// ```text
/// collections
/// └── unit
///     └── coll                (viewOriginals: everyone)
///         ├── work            files: pdf, jpg
///         └── folder
///             └── work2       files: scan, broken (no original)
/// ```
pub const TREE: &str = r#"{
    "objects": [
        { "id": "collections", "resourceType": "ContentRoot", "members": ["unit"] },
        { "id": "unit", "resourceType": "AdminUnit", "parent": "collections", "members": ["coll"],
          "properties": { "dc:title": ["Special Collections"], "acl:unitOwner": ["curators"] } },
        { "id": "coll", "resourceType": "Collection", "parent": "unit", "members": ["work", "folder"],
          "properties": { "dc:title": ["Letters"], "acl:viewOriginals": ["everyone"] } },
        { "id": "work", "resourceType": "Work", "parent": "coll", "members": ["pdf", "jpg"],
          "primaryObject": "pdf" },
        { "id": "pdf", "resourceType": "File", "parent": "work",
          "binaries": [ { "name": "original_file", "mimetype": "application/pdf", "filename": "a.pdf", "size": 100 } ] },
        { "id": "jpg", "resourceType": "File", "parent": "work",
          "binaries": [ { "name": "original_file", "mimetype": "image/jpeg", "filename": "b.jpg", "size": 50 } ] },
        { "id": "folder", "resourceType": "Folder", "parent": "coll", "members": ["work2"] },
        { "id": "work2", "resourceType": "Work", "parent": "folder", "members": ["scan", "broken"] },
        { "id": "scan", "resourceType": "File", "parent": "work2",
          "binaries": [ { "name": "original_file", "mimetype": "image/tiff", "filename": "scan.tif" } ] },
        { "id": "broken", "resourceType": "File", "parent": "work2" }
    ]
}"#;

pub fn id(s: &str) -> ObjectId {
    ObjectId::new(s).unwrap()
}

pub struct Fixture {
    pub repo: Arc<InMemoryRepository>,
    pub index: Arc<InMemorySearchIndex>,
    pub driver: Arc<PipelineDriver>,
}

pub fn fixture() -> Fixture {
    let repo = Arc::new(RepositoryFixture::from_json(TREE).unwrap().into_repository());
    let index = Arc::new(InMemorySearchIndex::new());
    let services =
        IndexingServices::in_memory(repo.clone(), index.clone(), &AclCacheConfig::default()).unwrap();
    let driver = Arc::new(PipelineDriver::with_default_filters(Arc::new(services)).unwrap());
    Fixture { repo, index, driver }
}
