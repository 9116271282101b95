//! Permission resolution for Box-C indexing.
//!
//! An object's *own* grants, embargo and deletion marker are read from its
//! property bag by the [`PermissionStoreAdapter`], optionally fronted by the
//! bounded, time-expiring [`ObjectAclCache`]. The [`InheritedAclResolver`]
//! combines own grants with those of every ancestor, nearest explicit
//! assignment winning, into an [`EffectiveAccessState`].
//!
//! # Resolution Rules
//!
//! 1. Patron and staff roles are resolved independently.
//! 2. Walking root to parent, then the object itself, each explicit grant
//!    overwrites the principal's current role.
//! 3. A `none` grant overwrites like any other, which revokes inherited access.
//! 4. Own embargo and nearest future ancestor embargo are reported separately.
//! 5. Any failure to load grants fails the whole resolution.

pub mod cache;
pub mod error;
pub mod record;
pub mod resolver;
pub mod state;
pub mod store;

pub use cache::{AclCacheConfig, CacheStats, ObjectAclCache};
pub use error::{AclError, AclResult};
pub use record::{ObjectAclRecord, OwnGrants};
pub use resolver::InheritedAclResolver;
pub use state::EffectiveAccessState;
pub use store::{PermissionStore, PermissionStoreAdapter};
