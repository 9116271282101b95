//! Repository fixtures for tests.

use std::sync::Arc;

use boxc_acl::AclCacheConfig;
use boxc_store::{InMemoryRepository, InMemorySearchIndex, ObjectRepository};
use boxc_types::{BinaryDescriptor, ContentObject, ObjectId, ObjectRecord, ResourceType};
use chrono::{DateTime, TimeZone, Utc};

use crate::context::DocumentIndexingContext;
use crate::driver::PipelineDriver;
use crate::services::IndexingServices;

pub const ROOT: &str = "collections";

pub fn id(s: &str) -> ObjectId {
    ObjectId::new(s).unwrap()
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
}

/// Builds a repository tree under a content root named `collections`.
pub struct TreeBuilder {
    records: Vec<ObjectRecord>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            records: vec![ObjectRecord::new(id(ROOT), ResourceType::ContentRoot, None)],
        }
    }

    fn record_mut(&mut self, target: &str) -> &mut ObjectRecord {
        self.records
            .iter_mut()
            .find(|r| r.id.as_str() == target)
            .unwrap_or_else(|| panic!("no record {target}"))
    }

    fn child(mut self, child: &str, kind: ResourceType, parent: &str) -> Self {
        self.record_mut(parent).members.push(id(child));
        self.records
            .push(ObjectRecord::new(id(child), kind, Some(id(parent))));
        self
    }

    pub fn unit(self, unit: &str) -> Self {
        self.child(unit, ResourceType::AdminUnit, ROOT)
    }

    pub fn collection(self, coll: &str, parent: &str) -> Self {
        self.child(coll, ResourceType::Collection, parent)
    }

    pub fn folder(self, folder: &str, parent: &str) -> Self {
        self.child(folder, ResourceType::Folder, parent)
    }

    pub fn work(self, work: &str, parent: &str) -> Self {
        self.child(work, ResourceType::Work, parent)
    }

    pub fn file(self, file: &str, parent: &str) -> Self {
        self.child(file, ResourceType::File, parent)
    }

    /// A record whose parent does not exist.
    pub fn orphan(mut self, stray: &str, missing_parent: &str) -> Self {
        self.records.push(ObjectRecord::new(
            id(stray),
            ResourceType::Folder,
            Some(id(missing_parent)),
        ));
        self
    }

    /// Add a raw record, e.g. one with an unrecognised resource type.
    pub fn record(mut self, record: ObjectRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn prop(mut self, target: &str, predicate: &str, value: &str) -> Self {
        self.record_mut(target).properties.add(predicate, value);
        self
    }

    /// Grant `predicate` (e.g. `acl:viewOriginals`) to `principal`.
    pub fn grant(self, target: &str, predicate: &str, principal: &str) -> Self {
        self.prop(target, predicate, principal)
    }

    pub fn binary(mut self, target: &str, binary: BinaryDescriptor) -> Self {
        self.record_mut(target).binaries.push(binary);
        self
    }

    pub fn primary(mut self, work: &str, file: &str) -> Self {
        self.record_mut(work).primary_object = Some(id(file));
        self
    }

    pub fn thumbnail(mut self, work: &str, file: &str) -> Self {
        self.record_mut(work).thumbnail = Some(id(file));
        self
    }

    pub fn ordered(mut self, target: &str) -> Self {
        self.record_mut(target).ordered = true;
        self
    }

    pub fn build(self) -> Harness {
        let repo = Arc::new(InMemoryRepository::from_records(self.records));
        let index = Arc::new(InMemorySearchIndex::new());
        let services = IndexingServices::in_memory(repo.clone(), index.clone(), &AclCacheConfig::default())
            .unwrap()
            .with_clock(fixed_now);
        Harness {
            repo,
            index,
            services: Arc::new(services),
        }
    }
}

/// A built repository with services wired over it.
pub struct Harness {
    pub repo: Arc<InMemoryRepository>,
    pub index: Arc<InMemorySearchIndex>,
    pub services: Arc<IndexingServices>,
}

impl Harness {
    pub fn object(&self, target: &str) -> ContentObject {
        self.repo.get_content_object(&id(target)).unwrap()
    }

    pub fn context(&self, target: &str) -> DocumentIndexingContext<'_> {
        DocumentIndexingContext::new(&self.services, self.object(target))
    }

    pub fn driver(&self) -> PipelineDriver {
        PipelineDriver::with_default_filters(Arc::clone(&self.services)).unwrap()
    }
}
