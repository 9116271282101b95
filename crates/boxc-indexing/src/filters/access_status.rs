use boxc_types::{IndexField, ResourceType};

use crate::context::DocumentIndexingContext;
use crate::error::IndexingResult;
use crate::filter::IndexDocumentFilter;

/// Facet tags of the `status` field.
pub mod tags {
    pub const MARKED_FOR_DELETION: &str = "Marked For Deletion";
    pub const EMBARGOED: &str = "Embargoed";
    pub const PARENT_EMBARGOED: &str = "Parent Is Embargoed";
    pub const PUBLIC_ACCESS: &str = "Public Access";
    pub const STAFF_ONLY: &str = "Staff-only Access";
    pub const PARENT_STAFF_ONLY: &str = "Parent Has Staff-only Access";
    pub const PATRON_SETTINGS: &str = "Patron Settings";
    pub const INHERITED_PATRON_SETTINGS: &str = "Inherited Patron Settings";
}

/// Patron visibility is governed from the collection tier down; the root and
/// units carry no patron settings of their own.
fn has_patron_tier(kind: ResourceType) -> bool {
    !matches!(kind, ResourceType::ContentRoot | ResourceType::AdminUnit)
}

/// Derives `status` facet tags from the effective access state.
pub struct AccessStatusFilter;

impl IndexDocumentFilter for AccessStatusFilter {
    fn name(&self) -> &str {
        "access_status"
    }

    fn provides(&self) -> &[IndexField] {
        &[IndexField::Status]
    }

    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
        let state = ctx.access_state()?.clone();
        let mut status = Vec::new();

        if state.marked_for_deletion {
            status.push(tags::MARKED_FOR_DELETION);
        }
        if state.is_embargoed() {
            status.push(tags::EMBARGOED);
        } else if state.is_embargoed_via_ancestor() {
            status.push(tags::PARENT_EMBARGOED);
        }

        if has_patron_tier(state.resource_type) {
            if state.has_public_access() {
                status.push(tags::PUBLIC_ACCESS);
            }
            if state.is_staff_only() {
                status.push(tags::STAFF_ONLY);
            }
            if let Some(parent) = ctx.object().parent().cloned() {
                let parent_state = ctx.services().acl().resolve(&parent)?;
                if has_patron_tier(parent_state.resource_type) && parent_state.is_staff_only() {
                    status.push(tags::PARENT_STAFF_ONLY);
                }
            }
            if state.has_distinct_patron_settings {
                status.push(tags::PATRON_SETTINGS);
            } else {
                status.push(tags::INHERITED_PATRON_SETTINGS);
            }
        }

        let status: Vec<String> = status.into_iter().map(str::to_string).collect();
        ctx.set(IndexField::Status, status)
    }
}
