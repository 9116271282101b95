use boxc_types::{vocab, ContentObject, IndexField};

use crate::context::DocumentIndexingContext;
use crate::error::IndexingResult;
use crate::filter::IndexDocumentFilter;

/// Facet tags of the `contentStatus` field.
pub mod tags {
    pub const DESCRIBED: &str = "Described";
    pub const NOT_DESCRIBED: &str = "Not Described";
    pub const HAS_PRIMARY_OBJECT: &str = "Has Primary Object";
    pub const NO_PRIMARY_OBJECT: &str = "No Primary Object";
    pub const MEMBERS_ORDERED: &str = "Members Are Ordered";
    pub const MEMBERS_UNORDERED: &str = "Members Are Unordered";
    pub const IS_PRIMARY_OBJECT: &str = "Is Primary Object";
}

/// Sets `contentStatus` tags describing how complete an object is.
pub struct ContentStatusFilter;

impl IndexDocumentFilter for ContentStatusFilter {
    fn name(&self) -> &str {
        "content_status"
    }

    fn provides(&self) -> &[IndexField] {
        &[IndexField::ContentStatus]
    }

    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
        let mut status = Vec::new();
        if ctx.object().properties().first(vocab::TITLE).is_some() {
            status.push(tags::DESCRIBED);
        } else {
            status.push(tags::NOT_DESCRIBED);
        }

        match ctx.object() {
            ContentObject::Work(work) => {
                status.push(if work.primary_object.is_some() {
                    tags::HAS_PRIMARY_OBJECT
                } else {
                    tags::NO_PRIMARY_OBJECT
                });
                status.push(if work.container.ordered {
                    tags::MEMBERS_ORDERED
                } else {
                    tags::MEMBERS_UNORDERED
                });
            }
            ContentObject::File(_) => {
                let id = ctx.id().clone();
                let is_primary = ctx
                    .parent_object()?
                    .and_then(ContentObject::as_work)
                    .is_some_and(|work| work.primary_object.as_ref() == Some(&id));
                if is_primary {
                    status.push(tags::IS_PRIMARY_OBJECT);
                }
            }
            ContentObject::Root(_)
            | ContentObject::AdminUnit(_)
            | ContentObject::Collection(_)
            | ContentObject::Folder(_) => {}
        }

        let status: Vec<String> = status.into_iter().map(str::to_string).collect();
        ctx.set(IndexField::ContentStatus, status)
    }
}
