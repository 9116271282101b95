use std::collections::BTreeMap;

use boxc_types::{vocab::principals, ObjectId, ResourceType, Role};
use chrono::{DateTime, Utc};

/// Effective access of one object, computed fresh per indexing run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveAccessState {
    pub object: ObjectId,
    pub resource_type: ResourceType,
    /// Principal to effective patron role. Revoked principals map to `None`.
    pub patron: BTreeMap<String, Role>,
    /// Principal to effective staff role. Revoked principals map to `None`.
    pub staff: BTreeMap<String, Role>,
    pub own_embargo: Option<DateTime<Utc>>,
    /// Nearest ancestor embargo that had not ended at resolution time.
    pub ancestor_embargo: Option<DateTime<Utc>>,
    pub marked_for_deletion: bool,
    /// Whether patron visibility is owned by this object rather than inherited.
    pub has_distinct_patron_settings: bool,
    pub resolved_at: DateTime<Utc>,
}

impl EffectiveAccessState {
    /// Effective patron role of a principal, `None` when it has no access.
    pub fn patron_role(&self, principal: &str) -> Role {
        self.patron.get(principal).copied().unwrap_or(Role::None)
    }

    /// Effective staff role of a principal, `None` when it has no access.
    pub fn staff_role(&self, principal: &str) -> Role {
        self.staff.get(principal).copied().unwrap_or(Role::None)
    }

    /// No patron principal has any effective role above `none`.
    pub fn is_staff_only(&self) -> bool {
        self.patron.values().all(|role| *role == Role::None)
    }

    /// The public principal can view originals.
    pub fn has_public_access(&self) -> bool {
        self.patron_role(principals::PUBLIC)
            .satisfies(Role::ViewOriginals)
    }

    /// The object's own embargo has not yet ended.
    pub fn is_embargoed(&self) -> bool {
        self.own_embargo.is_some_and(|until| until > self.resolved_at)
    }

    /// An ancestor's embargo applies and the object has none of its own.
    pub fn is_embargoed_via_ancestor(&self) -> bool {
        !self.is_embargoed() && self.ancestor_embargo.is_some()
    }

    /// Principals with an effective patron role above `none`, sorted.
    pub fn patron_principals(&self) -> Vec<&str> {
        self.patron
            .iter()
            .filter(|(_, role)| **role != Role::None)
            .map(|(principal, _)| principal.as_str())
            .collect()
    }
}
