use std::sync::Arc;

use boxc_acl::{
    AclCacheConfig, InheritedAclResolver, ObjectAclCache, PermissionStore, PermissionStoreAdapter,
};
use boxc_store::{AncestorPathResolver, InMemoryRepository, InMemorySearchIndex, ObjectRepository, SearchIndex};
use chrono::{DateTime, Utc};

use crate::error::IndexingResult;

/// Read-only collaborators shared by every indexing run.
///
/// One instance is shared across all workers; everything inside is
/// `Send + Sync`.
pub struct IndexingServices {
    repository: Arc<dyn ObjectRepository>,
    ancestors: Arc<dyn AncestorPathResolver>,
    search_index: Arc<dyn SearchIndex>,
    acl: InheritedAclResolver,
    cache: Arc<ObjectAclCache>,
}

impl IndexingServices {
    /// Wire the collaborators, placing an ACL cache in front of the
    /// repository's permission data.
    pub fn new(
        repository: Arc<dyn ObjectRepository>,
        ancestors: Arc<dyn AncestorPathResolver>,
        search_index: Arc<dyn SearchIndex>,
        cache_config: &AclCacheConfig,
    ) -> IndexingResult<Self> {
        let adapter = Arc::new(PermissionStoreAdapter::new(Arc::clone(&repository)));
        let cache = Arc::new(ObjectAclCache::new(adapter, cache_config)?);
        let acl = InheritedAclResolver::new(cache.clone(), Arc::clone(&ancestors));
        Ok(Self {
            repository,
            ancestors,
            search_index,
            acl,
            cache,
        })
    }

    /// Services backed by an in-memory repository, which also answers
    /// ancestor queries.
    pub fn in_memory(
        repository: Arc<InMemoryRepository>,
        search_index: Arc<InMemorySearchIndex>,
        cache_config: &AclCacheConfig,
    ) -> IndexingResult<Self> {
        Self::new(repository.clone(), repository, search_index, cache_config)
    }

    /// Replace the clock used for embargo decisions.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.acl = self.acl.with_clock(clock);
        self
    }

    pub fn repository(&self) -> &dyn ObjectRepository {
        self.repository.as_ref()
    }

    pub fn ancestors(&self) -> &dyn AncestorPathResolver {
        self.ancestors.as_ref()
    }

    pub fn search_index(&self) -> &dyn SearchIndex {
        self.search_index.as_ref()
    }

    /// Own-grant lookups, served through the ACL cache.
    pub fn permissions(&self) -> &dyn PermissionStore {
        self.cache.as_ref()
    }

    pub fn acl(&self) -> &InheritedAclResolver {
        &self.acl
    }

    pub fn acl_cache(&self) -> &ObjectAclCache {
        &self.cache
    }
}
