//! The search index document produced by the filter pipeline.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::TypeError;

/// Fields of an [`OutputDocument`].
///
/// Declaration order is the serialization order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexField {
    Id,
    Title,
    Abstract,
    DateCreated,
    ResourceType,
    ResourceTypeSort,
    AdminGroup,
    ReadGroup,
    RoleGroup,
    Status,
    ContentStatus,
    AncestorPath,
    AncestorIds,
    ParentUnit,
    ParentCollection,
    Rollup,
    FileFormatType,
    FileFormatDescription,
    FileFormatCategory,
    Datastream,
    FilesizeSort,
    FilesizeTotal,
}

impl IndexField {
    /// Field name in the search index schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Abstract => "abstract",
            Self::DateCreated => "dateCreated",
            Self::ResourceType => "resourceType",
            Self::ResourceTypeSort => "resourceTypeSort",
            Self::AdminGroup => "adminGroup",
            Self::ReadGroup => "readGroup",
            Self::RoleGroup => "roleGroup",
            Self::Status => "status",
            Self::ContentStatus => "contentStatus",
            Self::AncestorPath => "ancestorPath",
            Self::AncestorIds => "ancestorIds",
            Self::ParentUnit => "parentUnit",
            Self::ParentCollection => "parentCollection",
            Self::Rollup => "rollup",
            Self::FileFormatType => "fileFormatType",
            Self::FileFormatDescription => "fileFormatDescription",
            Self::FileFormatCategory => "fileFormatCategory",
            Self::Datastream => "datastream",
            Self::FilesizeSort => "filesizeSort",
            Self::FilesizeTotal => "filesizeTotal",
        }
    }
}

impl fmt::Display for IndexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Long(u64),
    Date(DateTime<Utc>),
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Long(n)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

/// Flat attribute bag sent to the search index.
///
/// Each field may be written once per indexing run; a second write is an
/// error, which keeps filters from silently clobbering each other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputDocument {
    fields: BTreeMap<IndexField, FieldValue>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field that has not been set yet.
    pub fn set(&mut self, field: IndexField, value: impl Into<FieldValue>) -> Result<(), TypeError> {
        if self.fields.contains_key(&field) {
            return Err(TypeError::FieldAlreadySet(field));
        }
        self.fields.insert(field, value.into());
        Ok(())
    }

    pub fn get(&self, field: IndexField) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    pub fn contains(&self, field: IndexField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Text value of a field.
    pub fn text(&self, field: IndexField) -> Option<&str> {
        match self.fields.get(&field) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// List value of a field; empty when unset.
    pub fn list(&self, field: IndexField) -> &[String] {
        match self.fields.get(&field) {
            Some(FieldValue::List(v)) => v,
            _ => &[],
        }
    }

    pub fn long(&self, field: IndexField) -> Option<u64> {
        match self.fields.get(&field) {
            Some(FieldValue::Long(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn date(&self, field: IndexField) -> Option<DateTime<Utc>> {
        match self.fields.get(&field) {
            Some(FieldValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    /// Iterate set fields in serialization order.
    pub fn fields(&self) -> impl Iterator<Item = (IndexField, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compact JSON rendering, stable for identical documents.
    pub fn to_json(&self) -> Result<String, TypeError> {
        serde_json::to_string(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_write_once() {
        let mut doc = OutputDocument::new();
        doc.set(IndexField::Id, "obj1").unwrap();
        let err = doc.set(IndexField::Id, "obj2").unwrap_err();
        assert_eq!(err, TypeError::FieldAlreadySet(IndexField::Id));
        assert_eq!(doc.text(IndexField::Id), Some("obj1"));
    }

    #[test]
    fn typed_accessors() {
        let mut doc = OutputDocument::new();
        doc.set(IndexField::ReadGroup, vec!["everyone".to_string()]).unwrap();
        doc.set(IndexField::FilesizeTotal, 42u64).unwrap();
        assert_eq!(doc.list(IndexField::ReadGroup).to_vec(), vec!["everyone".to_string()]);
        assert!(doc.list(IndexField::AdminGroup).is_empty());
        assert_eq!(doc.long(IndexField::FilesizeTotal), Some(42));
        assert_eq!(doc.text(IndexField::FilesizeTotal), None);
    }

    #[test]
    fn json_uses_schema_names_in_declaration_order() {
        let mut doc = OutputDocument::new();
        doc.set(IndexField::FilesizeSort, 5u64).unwrap();
        doc.set(IndexField::Id, "a").unwrap();
        doc.set(IndexField::ReadGroup, Vec::<String>::new()).unwrap();
        assert_eq!(doc.to_json().unwrap(), r#"{"id":"a","readGroup":[],"filesizeSort":5}"#);
    }

    #[test]
    fn equal_documents_serialize_identically() {
        let build = || {
            let mut doc = OutputDocument::new();
            doc.set(IndexField::Status, vec!["Public Access".to_string()]).unwrap();
            doc.set(IndexField::Title, "T").unwrap();
            doc
        };
        assert_eq!(build().to_json().unwrap(), build().to_json().unwrap());
    }
}
