//! Repository and search index boundaries for Box-C indexing.
//!
//! The object repository and the search index service are external systems.
//! This crate defines the narrow interfaces the indexing core consumes and
//! produces through, plus in-memory backends for tests and embedding.
//!
//! # Interfaces
//!
//! - [`ObjectRepository`] -- object snapshots, binaries, titles
//! - [`AncestorPathResolver`] -- root-to-parent ancestor chains
//! - [`SearchIndex`] -- document storage and member lookups
//!
//! # Backends
//!
//! - [`InMemoryRepository`] -- `HashMap`-based repository, loadable from a JSON fixture
//! - [`InMemorySearchIndex`] -- `BTreeMap`-based document store
//!
//! # Design Rules
//!
//! 1. The indexing core only reads repository snapshots; it never writes them.
//! 2. Every call is synchronous and may block.
//! 3. Backend failures are propagated, never silently ignored.

pub mod error;
pub mod fixture;
pub mod memory;
pub mod search;
pub mod traits;
pub mod traverse;

pub use error::{StoreError, StoreResult};
pub use fixture::RepositoryFixture;
pub use memory::InMemoryRepository;
pub use search::InMemorySearchIndex;
pub use traits::{AncestorPathResolver, ObjectRepository, SearchIndex};
pub use traverse::{walk_tree, TreeEntry};
