use thiserror::Error;

use crate::document::IndexField;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unparseable date literal: {0}")]
    InvalidDate(String),

    #[error("invalid object id: {0:?}")]
    InvalidObjectId(String),

    #[error("{kind} object {id} is missing its parent")]
    MissingParent { id: String, kind: String },

    #[error("document field '{0}' has already been set")]
    FieldAlreadySet(IndexField),

    #[error("serialization error: {0}")]
    Serialization(String),
}
