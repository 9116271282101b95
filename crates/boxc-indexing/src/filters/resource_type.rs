use boxc_types::IndexField;

use crate::context::DocumentIndexingContext;
use crate::error::IndexingResult;
use crate::filter::IndexDocumentFilter;

/// Sets `resourceType` and its numeric sort key.
pub struct ResourceTypeFilter;

impl IndexDocumentFilter for ResourceTypeFilter {
    fn name(&self) -> &str {
        "resource_type"
    }

    fn provides(&self) -> &[IndexField] {
        &[IndexField::ResourceType, IndexField::ResourceTypeSort]
    }

    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
        let kind = ctx.resource_type();
        ctx.set(IndexField::ResourceType, kind.as_str())?;
        ctx.set(IndexField::ResourceTypeSort, kind.sort_order())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TreeBuilder;

    #[test]
    fn sets_type_and_sort_key() {
        let harness = TreeBuilder::new()
            .unit("unit")
            .collection("coll", "unit")
            .work("work", "coll")
            .build();
        for (id, kind, sort) in [("collections", "ContentRoot", 0), ("coll", "Collection", 2), ("work", "Work", 4)] {
            let mut ctx = harness.context(id);
            ResourceTypeFilter.filter(&mut ctx).unwrap();
            assert_eq!(ctx.document().text(IndexField::ResourceType), Some(kind));
            assert_eq!(ctx.document().long(IndexField::ResourceTypeSort), Some(sort));
        }
    }
}
