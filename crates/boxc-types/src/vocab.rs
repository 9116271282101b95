//! Predicates of the repository metadata graph and well-known principals.
//!
//! Role predicates live on [`crate::Role::predicate`].

/// Embargo end date literal.
pub const EMBARGO_UNTIL: &str = "acl:embargoUntil";
/// `"true"` when the object has been marked for deletion.
pub const MARKED_FOR_DELETION: &str = "acl:markedForDeletion";

pub const TITLE: &str = "dc:title";
pub const DESCRIPTION: &str = "dc:description";
pub const DATE_CREATED: &str = "dcterms:created";

/// Streaming media location for files without a stored original.
pub const STREAMING_URL: &str = "stream:url";
/// Streaming media kind, `video` or `sound`.
pub const STREAMING_TYPE: &str = "stream:type";

/// Well-known principals.
pub mod principals {
    /// Every patron, signed in or not.
    pub const PUBLIC: &str = "everyone";
    /// Any signed-in patron.
    pub const AUTHENTICATED: &str = "authenticated";
    /// Administrative access group, granted on the repository root.
    pub const ADMIN_ACCESS: &str = "adminaccess";
}

/// Well-known binary names.
pub mod datastreams {
    pub const ORIGINAL_FILE: &str = "original_file";
    pub const TECHNICAL_METADATA: &str = "techmd_fits";
    pub const DESCRIPTIVE_METADATA: &str = "md_descriptive";
    pub const ACCESS_SURROGATE: &str = "jp2";
    pub const THUMBNAIL_SMALL: &str = "thumbnail_small";
    pub const THUMBNAIL_LARGE: &str = "thumbnail_large";
    pub const ALT_TEXT: &str = "alt_text";
}
