//! Access-aware document indexing for the repository.
//!
//! Each object is turned into one [`OutputDocument`](boxc_types::OutputDocument)
//! by running an ordered pipeline of filters over a per-object
//! [`DocumentIndexingContext`]. Filters set disjoint fields; a filter that
//! fails aborts the object and nothing partial is emitted.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use boxc_acl::AclCacheConfig;
//! use boxc_indexing::{IndexingServices, PipelineDriver};
//! use boxc_store::{InMemoryRepository, InMemorySearchIndex};
//! use boxc_types::{IndexField, ObjectId, ObjectRecord, ResourceType};
//!
//! let root = ObjectId::new("collections").unwrap();
//! let repo = Arc::new(InMemoryRepository::new());
//! repo.insert(ObjectRecord::new(root.clone(), ResourceType::ContentRoot, None));
//!
//! let services = IndexingServices::in_memory(
//!     repo,
//!     Arc::new(InMemorySearchIndex::new()),
//!     &AclCacheConfig::default(),
//! )
//! .unwrap();
//! let driver = PipelineDriver::with_default_filters(Arc::new(services)).unwrap();
//! let doc = driver.index_object(&root).unwrap();
//! assert_eq!(doc.list(IndexField::ReadGroup), ["everyone"]);
//! ```

pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod filter;
pub mod filters;
pub mod pipeline;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience.
pub use config::{IndexerConfig, WorkerConfig};
pub use context::DocumentIndexingContext;
pub use driver::{BatchSummary, FailedObject, PipelineDriver};
pub use error::{IndexingError, IndexingResult};
pub use filter::{FilterResult, IndexDocumentFilter};
pub use filters::content_type::{classify_file, ContentType};
pub use filters::formats::FormatCategory;
pub use filters::{
    AccessControlFilter, AccessStatusFilter, ContentStatusFilter, ContentTypeFilter,
    DatastreamFilter, DescriptiveFilter, PathFilter, ResourceTypeFilter,
};
pub use pipeline::{default_filters, FilterPipeline};
pub use services::IndexingServices;
