use std::fmt;

use boxc_types::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Descriptive data or binaries changed.
    Updated,
    /// Grants, embargo or deletion marking changed.
    AccessChanged,
    /// The object was moved under a different parent.
    Moved,
    /// The object was removed from the repository.
    Deleted,
}

impl ChangeKind {
    /// Whether documents below the object depend on the change.
    ///
    /// Access and path facets are inherited, so both reach every descendant.
    pub fn affects_descendants(&self) -> bool {
        matches!(self, Self::AccessChanged | Self::Moved)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Updated => "Updated",
            Self::AccessChanged => "AccessChanged",
            Self::Moved => "Moved",
            Self::Deleted => "Deleted",
        };
        write!(f, "{s}")
    }
}

/// Notification that an object changed in the repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectChanged {
    pub id: ObjectId,
    pub kind: ChangeKind,
    pub occurred_at: DateTime<Utc>,
}

impl ObjectChanged {
    pub fn new(id: ObjectId, kind: ChangeKind) -> Self {
        Self {
            id,
            kind,
            occurred_at: Utc::now(),
        }
    }

    pub fn updated(id: ObjectId) -> Self {
        Self::new(id, ChangeKind::Updated)
    }

    pub fn access_changed(id: ObjectId) -> Self {
        Self::new(id, ChangeKind::AccessChanged)
    }

    pub fn moved(id: ObjectId) -> Self {
        Self::new(id, ChangeKind::Moved)
    }

    pub fn deleted(id: ObjectId) -> Self {
        Self::new(id, ChangeKind::Deleted)
    }
}

impl fmt::Display for ObjectChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
