use std::sync::Arc;

use boxc_store::ObjectRepository;
use boxc_types::temporal::parse_date;
use boxc_types::{vocab, ObjectId, PermissionGrant, Role};
use chrono::{DateTime, Utc};

use crate::error::{AclError, AclResult};
use crate::record::{ObjectAclRecord, OwnGrants};

/// Source of an object's own (non-inherited) permission data.
///
/// Implemented by the repository adapter and by the cache in front of it,
/// so callers never need to know whether caching is in play.
pub trait PermissionStore: Send + Sync {
    /// Load the full permission record of an object.
    fn load(&self, id: &ObjectId) -> AclResult<Arc<ObjectAclRecord>>;

    /// Patron and staff grants recorded directly on the object.
    fn own_grants(&self, id: &ObjectId) -> AclResult<OwnGrants> {
        Ok(self.load(id)?.grants.clone())
    }

    /// The object's own embargo end date.
    fn embargo_until(&self, id: &ObjectId) -> AclResult<Option<DateTime<Utc>>> {
        Ok(self.load(id)?.embargo_until)
    }

    /// Whether the object itself is marked for deletion.
    fn is_marked_for_deletion(&self, id: &ObjectId) -> AclResult<bool> {
        Ok(self.load(id)?.marked_for_deletion)
    }
}

/// Reads permission data out of an object's property bag.
///
/// Each role has its own predicate (`acl:viewOriginals`, `acl:manage`, ...)
/// whose values are the principals holding that role.
pub struct PermissionStoreAdapter {
    repository: Arc<dyn ObjectRepository>,
}

impl PermissionStoreAdapter {
    pub fn new(repository: Arc<dyn ObjectRepository>) -> Self {
        Self { repository }
    }
}

impl PermissionStore for PermissionStoreAdapter {
    fn load(&self, id: &ObjectId) -> AclResult<Arc<ObjectAclRecord>> {
        let object = self.repository.get_content_object(id)?;
        let properties = object.properties();

        let mut grants = OwnGrants::default();
        for role in Role::ALL {
            for principal in properties.all(role.predicate()) {
                let grant = PermissionGrant::new(principal.trim(), role, id.clone());
                if role.is_staff() {
                    grants.staff.push(grant);
                } else {
                    grants.patron.push(grant);
                }
            }
        }

        let embargo_until = match properties.first(vocab::EMBARGO_UNTIL) {
            Some(literal) => Some(parse_date(literal).map_err(|_| AclError::InvalidDate {
                id: id.clone(),
                value: literal.to_string(),
            })?),
            None => None,
        };

        tracing::trace!(
            id = %id,
            patron = grants.patron.len(),
            staff = grants.staff.len(),
            "loaded own grants"
        );

        Ok(Arc::new(ObjectAclRecord {
            resource_type: object.resource_type(),
            grants,
            embargo_until,
            marked_for_deletion: properties.flag(vocab::MARKED_FOR_DELETION),
        }))
    }
}
