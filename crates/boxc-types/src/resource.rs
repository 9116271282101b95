use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Classification of a repository object.
///
/// The declaration order is the browse order of the hierarchy, from the
/// repository root down to individual files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
    /// The single repository root.
    ContentRoot,
    /// Administrative unit, the first tier below the root.
    AdminUnit,
    /// Collection, the tier that owns patron access policy.
    Collection,
    /// Folder within a collection.
    Folder,
    /// Work grouping one or more files.
    Work,
    /// A single file with binaries.
    File,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        Self::ContentRoot,
        Self::AdminUnit,
        Self::Collection,
        Self::Folder,
        Self::Work,
        Self::File,
    ];

    /// Name used in the `resourceType` index field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContentRoot => "ContentRoot",
            Self::AdminUnit => "AdminUnit",
            Self::Collection => "Collection",
            Self::Folder => "Folder",
            Self::Work => "Work",
            Self::File => "File",
        }
    }

    /// Sort key emitted as `resourceTypeSort`.
    pub fn sort_order(&self) -> u64 {
        match self {
            Self::ContentRoot => 0,
            Self::AdminUnit => 1,
            Self::Collection => 2,
            Self::Folder => 3,
            Self::Work => 4,
            Self::File => 5,
        }
    }

    /// Returns `true` for types that hold members.
    pub fn is_container(&self) -> bool {
        !matches!(self, Self::File)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownResourceType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_type() {
        for t in ResourceType::ALL {
            assert_eq!(t.as_str().parse::<ResourceType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_type_is_error() {
        let err = "Aggregate".parse::<ResourceType>().unwrap_err();
        assert_eq!(err, TypeError::UnknownResourceType("Aggregate".into()));
    }

    #[test]
    fn sort_order_follows_hierarchy() {
        let orders: Vec<u64> = ResourceType::ALL.iter().map(|t| t.sort_order()).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4, 5]);
        assert!(!ResourceType::File.is_container());
        assert!(ResourceType::Work.is_container());
    }
}
