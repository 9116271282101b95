//! Foundation types for Box-C indexing.
//!
//! This crate provides the identity, content-model, permission and document
//! types shared by every other `boxc-*` crate.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Opaque identifier of a repository object
//! - [`ContentObject`] — Tagged union over Root, AdminUnit, Collection, Folder, Work, File
//! - [`ObjectRecord`] — Flat repository snapshot that converts into a [`ContentObject`]
//! - [`Role`] / [`PermissionGrant`] — Patron and staff permission vocabulary
//! - [`BinaryDescriptor`] — Original, derivative and metadata binaries of a File
//! - [`OutputDocument`] — Write-once search index document

pub mod binary;
pub mod content;
pub mod document;
pub mod error;
pub mod object;
pub mod resource;
pub mod role;
pub mod temporal;
pub mod vocab;

pub use binary::{BinaryDescriptor, FormatIdentity, RasterExtent, TechnicalMetadata};
pub use content::{Container, ContentObject, FileObject, ObjectHeader, ObjectRecord, Properties, WorkObject};
pub use document::{FieldValue, IndexField, OutputDocument};
pub use error::TypeError;
pub use object::ObjectId;
pub use resource::ResourceType;
pub use role::{PermissionGrant, Role, RoleCategory};
