use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use boxc_types::ObjectId;
use serde::{Deserialize, Serialize};
use sieve_cache::ShardedSieveCache;

use crate::error::{AclError, AclResult};
use crate::record::ObjectAclRecord;
use crate::store::PermissionStore;

const MAX_SHARDS: usize = 16;

/// Sizing and expiry of the [`ObjectAclCache`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclCacheConfig {
    /// Maximum number of cached objects. Must be non-zero.
    pub max_entries: usize,
    /// Seconds before a cached entry is refetched.
    pub ttl_secs: u64,
}

impl AclCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for AclCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 4096,
            ttl_secs: 300,
        }
    }
}

#[derive(Clone)]
struct CachedAcl {
    record: Arc<ObjectAclRecord>,
    loaded_at: Instant,
}

/// Hit and miss counters of an [`ObjectAclCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Bounded, time-expiring cache in front of a [`PermissionStore`].
///
/// Entries are evicted by the SIEVE policy once `max_entries` is reached and
/// refetched once older than the TTL. Writers that know an object's grants
/// changed call [`ObjectAclCache::invalidate`]; any other change becomes
/// visible at the latest one TTL after it was made.
///
/// The underlying map is sharded, so concurrent readers on different shards
/// never contend.
pub struct ObjectAclCache {
    inner: Arc<dyn PermissionStore>,
    entries: ShardedSieveCache<ObjectId, CachedAcl>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ObjectAclCache {
    /// Wrap `inner` with a cache sized by `config`.
    pub fn new(inner: Arc<dyn PermissionStore>, config: &AclCacheConfig) -> AclResult<Self> {
        if config.max_entries == 0 {
            return Err(AclError::Config("ACL cache max_entries must be non-zero".into()));
        }
        // Every shard holds at least one entry.
        let shards = config.max_entries.min(MAX_SHARDS);
        let entries = ShardedSieveCache::with_shards(config.max_entries, shards)
            .map_err(|e| AclError::Config(e.to_string()))?;
        Ok(Self {
            inner,
            entries,
            ttl: config.ttl(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    /// Drop the cached record of one object.
    pub fn invalidate(&self, id: &ObjectId) -> bool {
        let removed = self.entries.remove(id).is_some();
        if removed {
            tracing::debug!(id = %id, "ACL cache entry invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn fresh(&self, id: &ObjectId) -> Option<Arc<ObjectAclRecord>> {
        let cached = self.entries.get(id)?;
        if cached.loaded_at.elapsed() < self.ttl {
            Some(cached.record)
        } else {
            tracing::trace!(id = %id, "ACL cache entry expired");
            None
        }
    }
}

impl PermissionStore for ObjectAclCache {
    fn load(&self, id: &ObjectId) -> AclResult<Arc<ObjectAclRecord>> {
        if let Some(record) = self.fresh(id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(record);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let record = self.inner.load(id)?;
        self.entries.insert(
            id.clone(),
            CachedAcl {
                record: Arc::clone(&record),
                loaded_at: Instant::now(),
            },
        );
        tracing::trace!(id = %id, "ACL cache populated");
        Ok(record)
    }
}
