use std::collections::BTreeSet;

use boxc_types::binary::strip_mimetype_parameters;
use boxc_types::vocab::{self, datastreams};
use boxc_types::{ContentObject, FileObject, IndexField, ResourceType};

use super::formats::{self, FormatCategory};
use crate::context::DocumentIndexingContext;
use crate::error::{IndexingError, IndexingResult};
use crate::filter::IndexDocumentFilter;

/// Resolved format of a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentType {
    /// Unset for streaming media.
    pub mimetype: Option<String>,
    pub description: String,
    pub category: FormatCategory,
}

/// Sets `fileFormatType`, `fileFormatDescription` and `fileFormatCategory`.
///
/// Files are classified directly. Works take the union of the facets
/// already indexed for their member files. Other containers get nothing.
pub struct ContentTypeFilter;

impl IndexDocumentFilter for ContentTypeFilter {
    fn name(&self) -> &str {
        "content_type"
    }

    fn requires(&self) -> &[IndexField] {
        &[IndexField::ResourceType, IndexField::AncestorPath]
    }

    fn provides(&self) -> &[IndexField] {
        &[
            IndexField::FileFormatType,
            IndexField::FileFormatDescription,
            IndexField::FileFormatCategory,
        ]
    }

    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
        match ctx.object() {
            ContentObject::File(file) => {
                let content_type = classify_file(file)?;
                if let Some(mimetype) = content_type.mimetype {
                    ctx.set(IndexField::FileFormatType, vec![mimetype])?;
                }
                ctx.set(IndexField::FileFormatDescription, vec![content_type.description])?;
                ctx.set(
                    IndexField::FileFormatCategory,
                    vec![content_type.category.as_str().to_string()],
                )?;
                Ok(())
            }
            ContentObject::Work(_) => aggregate_members(ctx),
            ContentObject::Root(_)
            | ContentObject::AdminUnit(_)
            | ContentObject::Collection(_)
            | ContentObject::Folder(_) => Ok(()),
        }
    }
}

/// Determine a file's format.
///
/// Extension overrides come first, then technical metadata, then the
/// extension table, then the stored mimetype as-is.
pub fn classify_file(file: &FileObject) -> IndexingResult<ContentType> {
    let Some(original) = file.binary(datastreams::ORIGINAL_FILE) else {
        return streaming_type(file).ok_or_else(|| IndexingError::MissingOriginal(file.header.id.clone()));
    };

    let extension = original.extension();
    if let Some(entry) = extension.as_deref().and_then(formats::override_for) {
        return Ok(ContentType {
            mimetype: Some(entry.mimetype.to_string()),
            description: entry.description.to_string(),
            category: entry.category,
        });
    }

    let stored = original.base_mimetype();
    if let Some(identity) = file.technical.as_ref().and_then(|t| t.identity.as_ref()) {
        let mimetype = identity
            .mimetype
            .as_deref()
            .map(strip_mimetype_parameters)
            .unwrap_or(stored);
        let category = formats::by_mimetype(&mimetype)
            .or_else(|| extension.as_deref().and_then(formats::by_extension))
            .map_or(FormatCategory::Unknown, |e| e.category);
        return Ok(ContentType {
            mimetype: Some(mimetype),
            description: identity.format.clone(),
            category,
        });
    }

    if let Some(entry) = extension.as_deref().and_then(formats::by_extension) {
        return Ok(ContentType {
            mimetype: Some(entry.mimetype.to_string()),
            description: entry.description.to_string(),
            category: entry.category,
        });
    }

    Ok(ContentType {
        mimetype: Some(stored),
        description: FormatCategory::Unknown.as_str().to_string(),
        category: FormatCategory::Unknown,
    })
}

/// Fixed type for files that only reference streaming media.
fn streaming_type(file: &FileObject) -> Option<ContentType> {
    let properties = &file.header.properties;
    properties.first(vocab::STREAMING_URL)?;
    let (description, category) = match properties.first(vocab::STREAMING_TYPE)?.trim() {
        "video" => ("Streaming Video", FormatCategory::Video),
        "sound" => ("Streaming Audio", FormatCategory::Audio),
        _ => return None,
    };
    Some(ContentType {
        mimetype: None,
        description: description.to_string(),
        category,
    })
}

/// Union the facets of the Work's member files as stored in the index.
fn aggregate_members(ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
    let Some(own_entry) = ctx.document().list(IndexField::AncestorPath).last().cloned() else {
        return Err(IndexingError::MissingAncestors(ctx.id().clone()));
    };
    let members = ctx
        .services()
        .search_index()
        .find_members(&own_entry, ResourceType::File)?;

    let mut types = BTreeSet::new();
    let mut descriptions = BTreeSet::new();
    let mut categories = BTreeSet::new();
    for member in &members {
        types.extend(member.list(IndexField::FileFormatType).iter().cloned());
        descriptions.extend(member.list(IndexField::FileFormatDescription).iter().cloned());
        categories.extend(member.list(IndexField::FileFormatCategory).iter().cloned());
    }
    tracing::trace!(id = %ctx.id(), members = members.len(), "aggregated member content types");

    ctx.set(IndexField::FileFormatType, types.into_iter().collect::<Vec<_>>())?;
    ctx.set(IndexField::FileFormatDescription, descriptions.into_iter().collect::<Vec<_>>())?;
    ctx.set(IndexField::FileFormatCategory, categories.into_iter().collect::<Vec<_>>())?;
    Ok(())
}
