//! JSON repository fixtures.
//!
//! A fixture is a flat list of object records:
//!
//! ```json
//! { "objects": [ { "id": "collections", "resourceType": "ContentRoot" }, ... ] }
//! ```

use std::path::Path;

use boxc_types::ObjectRecord;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryRepository;

/// A serialized repository snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RepositoryFixture {
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
}

impl RepositoryFixture {
    /// Parse a fixture from JSON text.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read and parse a fixture file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let fixture = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), objects = fixture.objects.len(), "loaded repository fixture");
        Ok(fixture)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Build an in-memory repository holding every record.
    pub fn into_repository(self) -> InMemoryRepository {
        InMemoryRepository::from_records(self.objects)
    }
}
