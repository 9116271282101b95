use boxc_types::vocab::datastreams;
use boxc_types::{BinaryDescriptor, ContentObject, IndexField, ObjectId};

use crate::context::DocumentIndexingContext;
use crate::error::IndexingResult;
use crate::filter::IndexDocumentFilter;

/// Serializes binaries into `datastream` lines and computes file sizes.
///
/// Line format: `name|mimetype|filename|extension|size|digest|owner|extent`,
/// with empty segments for absent values. Sizes are summed per descriptor
/// without deduplication, so an access copy and a thumbnail of equal size
/// both count in full.
pub struct DatastreamFilter;

impl IndexDocumentFilter for DatastreamFilter {
    fn name(&self) -> &str {
        "datastream"
    }

    fn requires(&self) -> &[IndexField] {
        &[IndexField::ResourceType]
    }

    fn provides(&self) -> &[IndexField] {
        &[
            IndexField::Datastream,
            IndexField::FilesizeSort,
            IndexField::FilesizeTotal,
        ]
    }

    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
        let own = ctx.services().repository().get_binary_descriptors(ctx.id())?;
        let filesize_total: u64 = own.iter().map(BinaryDescriptor::size_or_zero).sum();
        let mut lines: Vec<String> = own.iter().map(|b| descriptor_line(b, None)).collect();

        let filesize_sort = match ctx.object() {
            ContentObject::File(_) => original_size(&own),
            ContentObject::Work(work) => {
                // Primary member first; the thumbnail member stands in when the
                // primary has no original.
                let mut representative: Option<(&ObjectId, Vec<BinaryDescriptor>)> = None;
                for member in work.primary_object.iter().chain(work.thumbnail.iter()) {
                    let borrowed = ctx.related_binaries(member)?;
                    let has_original = original_size(&borrowed).is_some();
                    if representative.is_none() || has_original {
                        representative = Some((member, borrowed));
                    }
                    if has_original {
                        break;
                    }
                }
                match representative {
                    Some((member, borrowed)) => {
                        lines.extend(borrowed.iter().map(|b| descriptor_line(b, Some(member))));
                        original_size(&borrowed)
                    }
                    None => None,
                }
            }
            _ => None,
        };

        if !lines.is_empty() {
            ctx.set(IndexField::Datastream, lines)?;
        }
        if let Some(size) = filesize_sort {
            ctx.set(IndexField::FilesizeSort, size)?;
        }
        if !own.is_empty() {
            ctx.set(IndexField::FilesizeTotal, filesize_total)?;
        }
        Ok(())
    }
}

fn original_size(binaries: &[BinaryDescriptor]) -> Option<u64> {
    binaries
        .iter()
        .find(|b| b.name == datastreams::ORIGINAL_FILE)
        .map(BinaryDescriptor::size_or_zero)
}

/// One `datastream` line. `owner` is set for binaries borrowed from another
/// object.
pub fn descriptor_line(binary: &BinaryDescriptor, owner: Option<&ObjectId>) -> String {
    let owner = owner.or(binary.owner.as_ref());
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}",
        binary.name,
        binary.base_mimetype(),
        binary.filename.as_deref().unwrap_or_default(),
        binary.extension().unwrap_or_default(),
        binary.size_or_zero(),
        binary.digest.as_deref().unwrap_or_default(),
        owner.map(ObjectId::as_str).unwrap_or_default(),
        binary.extent.map(|e| e.to_string()).unwrap_or_default(),
    )
}
