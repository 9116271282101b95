use std::collections::BTreeMap;
use std::sync::Arc;

use boxc_store::AncestorPathResolver;
use boxc_types::{ObjectId, ResourceType, Role, RoleCategory};
use chrono::{DateTime, Utc};

use crate::error::{AclError, AclResult};
use crate::record::ObjectAclRecord;
use crate::state::EffectiveAccessState;
use crate::store::PermissionStore;

/// Computes effective access by walking an object's ancestor chain.
///
/// Each tier's explicit grants overwrite whatever the principal held from
/// the tiers above it. Patron and staff roles are walked independently.
pub struct InheritedAclResolver {
    store: Arc<dyn PermissionStore>,
    ancestors: Arc<dyn AncestorPathResolver>,
    clock: fn() -> DateTime<Utc>,
}

impl InheritedAclResolver {
    pub fn new(store: Arc<dyn PermissionStore>, ancestors: Arc<dyn AncestorPathResolver>) -> Self {
        Self {
            store,
            ancestors,
            clock: Utc::now,
        }
    }

    /// Replace the clock used to decide whether embargoes are still active.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// The permission store backing this resolver.
    pub fn store(&self) -> &Arc<dyn PermissionStore> {
        &self.store
    }

    /// Resolve the effective access state of `id`.
    pub fn resolve(&self, id: &ObjectId) -> AclResult<EffectiveAccessState> {
        let now = (self.clock)();
        let own = self.store.load(id)?;
        let chain = self.ancestors.get_ancestor_ids(id)?;
        if chain.is_empty() && own.resource_type != ResourceType::ContentRoot {
            return Err(AclError::MissingAncestors(id.clone()));
        }

        let mut patron: BTreeMap<String, Role> = BTreeMap::new();
        let mut staff: BTreeMap<String, Role> = BTreeMap::new();
        let mut ancestor_embargo = None;

        for ancestor in &chain {
            let record = self.store.load(ancestor)?;
            apply_tier(&mut patron, &mut staff, &record);
            if let Some(until) = record.embargo_until.filter(|until| *until > now) {
                ancestor_embargo = Some(until);
            }
        }

        let inherited_patron = patron.clone();
        apply_tier(&mut patron, &mut staff, &own);

        let has_distinct_patron_settings = own.resource_type == ResourceType::Collection
            || own
                .grants
                .explicit_assignments(RoleCategory::Patron)
                .iter()
                .any(|(principal, role)| {
                    inherited_patron.get(principal).copied().unwrap_or(Role::None) != *role
                });

        tracing::debug!(
            id = %id,
            depth = chain.len(),
            patron = patron.len(),
            staff = staff.len(),
            distinct = has_distinct_patron_settings,
            "resolved effective access"
        );

        Ok(EffectiveAccessState {
            object: id.clone(),
            resource_type: own.resource_type,
            patron,
            staff,
            own_embargo: own.embargo_until,
            ancestor_embargo,
            marked_for_deletion: own.marked_for_deletion,
            has_distinct_patron_settings,
            resolved_at: now,
        })
    }
}

/// Overwrite current roles with one tier's explicit assignments.
fn apply_tier(
    patron: &mut BTreeMap<String, Role>,
    staff: &mut BTreeMap<String, Role>,
    record: &ObjectAclRecord,
) {
    patron.extend(record.grants.explicit_assignments(RoleCategory::Patron));
    staff.extend(record.grants.explicit_assignments(RoleCategory::Staff));
}
