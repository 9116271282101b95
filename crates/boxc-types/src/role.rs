use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::object::ObjectId;

/// Which audience a role applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleCategory {
    /// Non-staff consumers of content.
    Patron,
    /// Administrative users.
    Staff,
}

/// A permission level granted to a principal.
///
/// Patron roles order as `ViewMetadata < ViewAccessCopies < ViewOriginals`.
/// Staff roles order as `Access < Describe < Process < Manage < UnitOwner`.
/// `None` is an explicit revocation and sits outside both orderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    None,
    ViewMetadata,
    ViewAccessCopies,
    ViewOriginals,
    Access,
    Describe,
    Process,
    Manage,
    UnitOwner,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Self::None,
        Self::ViewMetadata,
        Self::ViewAccessCopies,
        Self::ViewOriginals,
        Self::Access,
        Self::Describe,
        Self::Process,
        Self::Manage,
        Self::UnitOwner,
    ];

    pub const PATRON_ROLES: [Role; 3] = [Self::ViewMetadata, Self::ViewAccessCopies, Self::ViewOriginals];

    pub const STAFF_ROLES: [Role; 5] = [
        Self::Access,
        Self::Describe,
        Self::Process,
        Self::Manage,
        Self::UnitOwner,
    ];

    /// Role name as written in `roleGroup` entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ViewMetadata => "viewMetadata",
            Self::ViewAccessCopies => "viewAccessCopies",
            Self::ViewOriginals => "viewOriginals",
            Self::Access => "access",
            Self::Describe => "describe",
            Self::Process => "process",
            Self::Manage => "manage",
            Self::UnitOwner => "unitOwner",
        }
    }

    /// Category of the role, or `None` for the revocation sentinel.
    pub fn category(&self) -> Option<RoleCategory> {
        match self {
            Self::None => None,
            Self::ViewMetadata | Self::ViewAccessCopies | Self::ViewOriginals => {
                Some(RoleCategory::Patron)
            }
            _ => Some(RoleCategory::Staff),
        }
    }

    pub fn is_patron(&self) -> bool {
        self.category() == Some(RoleCategory::Patron)
    }

    pub fn is_staff(&self) -> bool {
        self.category() == Some(RoleCategory::Staff)
    }

    /// Strength within the role's own ordering; `None` is 0.
    pub fn strength(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::ViewMetadata | Self::Access => 1,
            Self::ViewAccessCopies | Self::Describe => 2,
            Self::ViewOriginals | Self::Process => 3,
            Self::Manage => 4,
            Self::UnitOwner => 5,
        }
    }

    /// Returns `true` if `self` grants at least what `other` grants.
    ///
    /// Roles of different categories never satisfy each other; every role
    /// satisfies `None`.
    pub fn satisfies(&self, other: Role) -> bool {
        if other == Role::None {
            return true;
        }
        self.category() == other.category() && self.strength() >= other.strength()
    }

    /// Metadata predicate holding the principals granted this role.
    pub fn predicate(&self) -> &'static str {
        match self {
            Self::None => "acl:none",
            Self::ViewMetadata => "acl:viewMetadata",
            Self::ViewAccessCopies => "acl:viewAccessCopies",
            Self::ViewOriginals => "acl:viewOriginals",
            Self::Access => "acl:access",
            Self::Describe => "acl:describe",
            Self::Process => "acl:process",
            Self::Manage => "acl:manage",
            Self::UnitOwner => "acl:unitOwner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| TypeError::UnknownRole(s.to_string()))
    }
}

/// A role assigned to a principal on a specific object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// User, group, or well-known patron class.
    pub principal: String,
    /// Granted role; [`Role::None`] revokes.
    pub role: Role,
    /// Object on which the grant is recorded.
    pub source: ObjectId,
}

impl PermissionGrant {
    pub fn new(principal: impl Into<String>, role: Role, source: ObjectId) -> Self {
        Self {
            principal: principal.into(),
            role,
            source,
        }
    }

    /// Returns `true` if this grant is an explicit revocation.
    pub fn is_revocation(&self) -> bool {
        self.role == Role::None
    }

    /// The `"{role}|{principal}"` form used by the `roleGroup` field.
    pub fn role_group_entry(&self) -> String {
        format!("{}|{}", self.role, self.principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(Role::None.category(), None);
        for r in Role::PATRON_ROLES {
            assert!(r.is_patron());
            assert!(!r.is_staff());
        }
        for r in Role::STAFF_ROLES {
            assert!(r.is_staff());
        }
    }

    #[test]
    fn patron_ordering() {
        assert!(Role::ViewOriginals.satisfies(Role::ViewAccessCopies));
        assert!(Role::ViewAccessCopies.satisfies(Role::ViewMetadata));
        assert!(!Role::ViewMetadata.satisfies(Role::ViewOriginals));
    }

    #[test]
    fn staff_ordering() {
        assert!(Role::UnitOwner.satisfies(Role::Manage));
        assert!(Role::Process.satisfies(Role::Describe));
        assert!(!Role::Access.satisfies(Role::Describe));
    }

    #[test]
    fn categories_do_not_mix() {
        assert!(!Role::UnitOwner.satisfies(Role::ViewMetadata));
        assert!(!Role::ViewOriginals.satisfies(Role::Access));
    }

    #[test]
    fn none_is_satisfied_by_everything_but_satisfies_nothing() {
        assert!(Role::ViewMetadata.satisfies(Role::None));
        assert!(Role::None.satisfies(Role::None));
        assert!(!Role::None.satisfies(Role::ViewMetadata));
        assert!(!Role::None.satisfies(Role::Access));
    }

    #[test]
    fn parse_and_display() {
        for r in Role::ALL {
            assert_eq!(r.to_string().parse::<Role>().unwrap(), r);
        }
        assert!("canViewOriginals".parse::<Role>().is_err());
    }

    #[test]
    fn role_group_entry_format() {
        let grant = PermissionGrant::new(
            "group1",
            Role::Manage,
            ObjectId::new("coll").unwrap(),
        );
        assert_eq!(grant.role_group_entry(), "manage|group1");
        assert!(!grant.is_revocation());
    }
}
