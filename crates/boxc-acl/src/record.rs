use std::collections::BTreeMap;

use boxc_types::{PermissionGrant, ResourceType, Role, RoleCategory};
use chrono::{DateTime, Utc};

/// Grants recorded directly on one object, split by audience.
///
/// Revocations (`none` grants) are kept with the patron grants but apply
/// to both audiences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnGrants {
    pub patron: Vec<PermissionGrant>,
    pub staff: Vec<PermissionGrant>,
}

impl OwnGrants {
    pub fn is_empty(&self) -> bool {
        self.patron.is_empty() && self.staff.is_empty()
    }

    /// Grants of one audience.
    pub fn of(&self, category: RoleCategory) -> &[PermissionGrant] {
        match category {
            RoleCategory::Patron => &self.patron,
            RoleCategory::Staff => &self.staff,
        }
    }

    /// Every grant, patron first.
    pub fn iter(&self) -> impl Iterator<Item = &PermissionGrant> {
        self.patron.iter().chain(self.staff.iter())
    }

    /// One role per principal for the given audience.
    ///
    /// When a principal holds several grants on the same object the strongest
    /// wins, except that an explicit `none` defeats all of them. Staff
    /// assignments include the object's revocations.
    pub fn explicit_assignments(&self, category: RoleCategory) -> BTreeMap<String, Role> {
        let revocations = match category {
            RoleCategory::Patron => None,
            RoleCategory::Staff => Some(self.patron.iter().filter(|g| g.is_revocation())),
        };
        let mut assignments: BTreeMap<String, Role> = BTreeMap::new();
        for grant in self.of(category).iter().chain(revocations.into_iter().flatten()) {
            assignments
                .entry(grant.principal.clone())
                .and_modify(|current| {
                    if *current == Role::None || grant.role == Role::None {
                        *current = Role::None;
                    } else if grant.role.strength() > current.strength() {
                        *current = grant.role;
                    }
                })
                .or_insert(grant.role);
        }
        assignments
    }
}

/// Everything permission resolution needs to know about one object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectAclRecord {
    pub resource_type: ResourceType,
    pub grants: OwnGrants,
    pub embargo_until: Option<DateTime<Utc>>,
    pub marked_for_deletion: bool,
}

impl ObjectAclRecord {
    /// A record with no grants, embargo or deletion marker.
    pub fn empty(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            grants: OwnGrants::default(),
            embargo_until: None,
            marked_for_deletion: false,
        }
    }
}
