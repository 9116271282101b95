//! The repository content model.
//!
//! Objects reference each other only by [`ObjectId`]; ancestor chains and
//! member lists are resolved through repository collaborators rather than
//! in-memory pointers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::binary::{BinaryDescriptor, TechnicalMetadata};
use crate::error::TypeError;
use crate::object::ObjectId;
use crate::resource::ResourceType;

/// Multi-valued property bag keyed by metadata predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, Vec<String>>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::add`].
    pub fn with(mut self, predicate: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(predicate, value);
        self
    }

    /// Append a value for a predicate.
    pub fn add(&mut self, predicate: impl Into<String>, value: impl Into<String>) {
        self.0.entry(predicate.into()).or_default().push(value.into());
    }

    /// Replace every value of a predicate.
    pub fn set(&mut self, predicate: impl Into<String>, value: impl Into<String>) {
        self.0.insert(predicate.into(), vec![value.into()]);
    }

    pub fn remove(&mut self, predicate: &str) -> Option<Vec<String>> {
        self.0.remove(predicate)
    }

    /// First value of a predicate.
    pub fn first(&self, predicate: &str) -> Option<&str> {
        self.0.get(predicate).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values of a predicate, empty if absent.
    pub fn all(&self, predicate: &str) -> &[String] {
        self.0.get(predicate).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if the first value is `true` (case-insensitive).
    pub fn flag(&self, predicate: &str) -> bool {
        self.first(predicate)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fields common to every content object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectHeader {
    pub id: ObjectId,
    /// Absent only for the repository root.
    pub parent: Option<ObjectId>,
    pub properties: Properties,
}

/// A container: root, unit, collection, or folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub header: ObjectHeader,
    pub members: Vec<ObjectId>,
    /// Whether `members` carries a meaningful order.
    pub ordered: bool,
}

/// A work grouping files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkObject {
    pub container: Container,
    /// Member file representing the work.
    pub primary_object: Option<ObjectId>,
    /// Member file providing the work's thumbnail.
    pub thumbnail: Option<ObjectId>,
}

/// A file with its binaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileObject {
    pub header: ObjectHeader,
    pub binaries: Vec<BinaryDescriptor>,
    pub technical: Option<TechnicalMetadata>,
}

impl FileObject {
    /// The binary with the given name.
    pub fn binary(&self, name: &str) -> Option<&BinaryDescriptor> {
        self.binaries.iter().find(|b| b.name == name)
    }
}

/// A repository object snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentObject {
    Root(Container),
    AdminUnit(Container),
    Collection(Container),
    Folder(Container),
    Work(WorkObject),
    File(FileObject),
}

impl ContentObject {
    pub fn header(&self) -> &ObjectHeader {
        match self {
            Self::Root(c) | Self::AdminUnit(c) | Self::Collection(c) | Self::Folder(c) => &c.header,
            Self::Work(w) => &w.container.header,
            Self::File(f) => &f.header,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.header().id
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.header().parent.as_ref()
    }

    pub fn properties(&self) -> &Properties {
        &self.header().properties
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::Root(_) => ResourceType::ContentRoot,
            Self::AdminUnit(_) => ResourceType::AdminUnit,
            Self::Collection(_) => ResourceType::Collection,
            Self::Folder(_) => ResourceType::Folder,
            Self::Work(_) => ResourceType::Work,
            Self::File(_) => ResourceType::File,
        }
    }

    /// Member ids; always empty for files.
    pub fn members(&self) -> &[ObjectId] {
        match self {
            Self::Root(c) | Self::AdminUnit(c) | Self::Collection(c) | Self::Folder(c) => &c.members,
            Self::Work(w) => &w.container.members,
            Self::File(_) => &[],
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root(_))
    }

    pub fn as_work(&self) -> Option<&WorkObject> {
        match self {
            Self::Work(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileObject> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }
}

/// Flat snapshot of an object as the repository hands it over.
///
/// The resource type is carried as a string; converting into a
/// [`ContentObject`] rejects types the indexer does not recognise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    pub id: ObjectId,
    pub resource_type: String,
    #[serde(default)]
    pub parent: Option<ObjectId>,
    #[serde(default)]
    pub members: Vec<ObjectId>,
    #[serde(default)]
    pub ordered: bool,
    #[serde(default)]
    pub primary_object: Option<ObjectId>,
    #[serde(default)]
    pub thumbnail: Option<ObjectId>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub binaries: Vec<BinaryDescriptor>,
    #[serde(default)]
    pub technical: Option<TechnicalMetadata>,
}

impl ObjectRecord {
    pub fn new(id: ObjectId, resource_type: ResourceType, parent: Option<ObjectId>) -> Self {
        Self {
            id,
            resource_type: resource_type.as_str().to_string(),
            parent,
            members: Vec::new(),
            ordered: false,
            primary_object: None,
            thumbnail: None,
            properties: Properties::new(),
            binaries: Vec::new(),
            technical: None,
        }
    }
}

impl TryFrom<ObjectRecord> for ContentObject {
    type Error = TypeError;

    fn try_from(record: ObjectRecord) -> Result<Self, Self::Error> {
        let resource_type: ResourceType = record.resource_type.parse()?;
        if resource_type != ResourceType::ContentRoot && record.parent.is_none() {
            return Err(TypeError::MissingParent {
                id: record.id.to_string(),
                kind: record.resource_type,
            });
        }

        let header = ObjectHeader {
            id: record.id,
            parent: record.parent,
            properties: record.properties,
        };
        let container = |header| Container {
            header,
            members: record.members,
            ordered: record.ordered,
        };

        Ok(match resource_type {
            ResourceType::ContentRoot => Self::Root(container(header)),
            ResourceType::AdminUnit => Self::AdminUnit(container(header)),
            ResourceType::Collection => Self::Collection(container(header)),
            ResourceType::Folder => Self::Folder(container(header)),
            ResourceType::Work => Self::Work(WorkObject {
                container: container(header),
                primary_object: record.primary_object,
                thumbnail: record.thumbnail,
            }),
            ResourceType::File => Self::File(FileObject {
                header,
                binaries: record.binaries,
                technical: record.technical,
            }),
        })
    }
}
