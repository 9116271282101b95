use std::fmt;

use serde::{Deserialize, Serialize};

use crate::object::ObjectId;

/// Pixel dimensions of a raster binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RasterExtent {
    pub height: u32,
    pub width: u32,
}

impl fmt::Display for RasterExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Description of one binary attached to an object: the original file, a
/// derivative, or a metadata document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryDescriptor {
    /// Well-known binary name (see [`crate::vocab::datastreams`]).
    pub name: String,
    /// Stored mimetype, possibly with parameters (`text/plain; charset=utf-8`).
    pub mimetype: String,
    #[serde(default)]
    pub filename: Option<String>,
    /// Byte size, when the repository recorded one.
    #[serde(default)]
    pub size: Option<u64>,
    /// Content digest URN.
    #[serde(default)]
    pub digest: Option<String>,
    /// Object that owns the binary when it is borrowed from another object.
    #[serde(default)]
    pub owner: Option<ObjectId>,
    #[serde(default)]
    pub extent: Option<RasterExtent>,
}

impl BinaryDescriptor {
    pub fn new(name: impl Into<String>, mimetype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mimetype: mimetype.into(),
            filename: None,
            size: None,
            digest: None,
            owner: None,
            extent: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    pub fn with_extent(mut self, height: u32, width: u32) -> Self {
        self.extent = Some(RasterExtent { height, width });
        self
    }

    /// Lower-cased filename extension, if the filename has one.
    pub fn extension(&self) -> Option<String> {
        let filename = self.filename.as_deref()?;
        let (stem, ext) = filename.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Mimetype with any parameters removed and lower-cased.
    pub fn base_mimetype(&self) -> String {
        strip_mimetype_parameters(&self.mimetype)
    }

    /// Byte size, zero when unknown.
    pub fn size_or_zero(&self) -> u64 {
        self.size.unwrap_or(0)
    }
}

/// Remove `;`-separated parameters from a mimetype and normalise case.
pub fn strip_mimetype_parameters(mimetype: &str) -> String {
    mimetype
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Format identification recovered from technical metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatIdentity {
    /// Human-readable format name, e.g. `Portable Document Format`.
    pub format: String,
    #[serde(default)]
    pub mimetype: Option<String>,
}

/// Technical metadata extracted for a File's original binary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalMetadata {
    #[serde(default)]
    pub identity: Option<FormatIdentity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        let b = BinaryDescriptor::new("original_file", "text/plain").with_filename("Notes.RTF");
        assert_eq!(b.extension().as_deref(), Some("rtf"));
    }

    #[test]
    fn extension_absent_cases() {
        assert_eq!(BinaryDescriptor::new("x", "a/b").extension(), None);
        let no_dot = BinaryDescriptor::new("x", "a/b").with_filename("README");
        assert_eq!(no_dot.extension(), None);
        let hidden = BinaryDescriptor::new("x", "a/b").with_filename(".profile");
        assert_eq!(hidden.extension(), None);
        let trailing = BinaryDescriptor::new("x", "a/b").with_filename("file.");
        assert_eq!(trailing.extension(), None);
    }

    #[test]
    fn mimetype_parameters_stripped() {
        let b = BinaryDescriptor::new("x", "Text/Plain; charset=UTF-8");
        assert_eq!(b.base_mimetype(), "text/plain");
    }

    #[test]
    fn missing_size_is_zero() {
        assert_eq!(BinaryDescriptor::new("x", "a/b").size_or_zero(), 0);
        assert_eq!(BinaryDescriptor::new("x", "a/b").with_size(12).size_or_zero(), 12);
    }

    #[test]
    fn extent_display() {
        let b = BinaryDescriptor::new("jp2", "image/jp2").with_extent(375, 250);
        assert_eq!(b.extent.unwrap().to_string(), "375x250");
    }
}
