use boxc_types::{IndexField, ObjectId, ResourceType};

use crate::context::DocumentIndexingContext;
use crate::error::{IndexingError, IndexingResult};
use crate::filter::IndexDocumentFilter;

/// Sets `ancestorPath`, `ancestorIds`, `parentUnit`, `parentCollection`
/// and `rollup`.
///
/// Tiers count from 1 below the repository root, which is never a tier
/// itself. The object is always its own deepest tier.
pub struct PathFilter;

impl IndexDocumentFilter for PathFilter {
    fn name(&self) -> &str {
        "path"
    }

    fn requires(&self) -> &[IndexField] {
        &[IndexField::ResourceType]
    }

    fn provides(&self) -> &[IndexField] {
        &[
            IndexField::AncestorPath,
            IndexField::AncestorIds,
            IndexField::ParentUnit,
            IndexField::ParentCollection,
            IndexField::Rollup,
        ]
    }

    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
        if ctx.object().is_root() {
            ctx.set(IndexField::AncestorPath, Vec::<String>::new())?;
            return Ok(());
        }

        let own_id = ctx.id().clone();
        let kind = ctx.resource_type();

        let chain = ctx.ancestor_ids()?.to_vec();
        let Some((first, tiers)) = chain.split_first() else {
            return Err(IndexingError::MissingAncestors(own_id));
        };
        if !ctx.related_object(first)?.is_some_and(|object| object.is_root()) {
            return Err(IndexingError::RootlessChain {
                id: own_id,
                first: first.clone(),
            });
        }
        let mut path: Vec<ObjectId> = tiers.to_vec();
        path.push(own_id.clone());

        let ancestor_path: Vec<String> = path
            .iter()
            .enumerate()
            .map(|(i, id)| format!("{},{}", i + 1, id))
            .collect();
        ctx.set(IndexField::AncestorPath, ancestor_path)?;

        let browsable = if kind == ResourceType::File {
            &path[..path.len() - 1]
        } else {
            &path[..]
        };
        let ancestor_ids: String = browsable.iter().map(|id| format!("/{id}")).collect();
        ctx.set(IndexField::AncestorIds, ancestor_ids)?;

        if let Some(unit) = nearest_of_type(ctx, &path, ResourceType::AdminUnit)? {
            ctx.set(IndexField::ParentUnit, unit)?;
        }
        if let Some(collection) = nearest_of_type(ctx, &path, ResourceType::Collection)? {
            ctx.set(IndexField::ParentCollection, collection)?;
        }

        let rollup = match kind {
            ResourceType::Work => Some(own_id),
            ResourceType::File => {
                let parent_is_work = ctx
                    .parent_object()?
                    .is_some_and(|p| p.resource_type() == ResourceType::Work);
                match ctx.object().parent() {
                    Some(parent) if parent_is_work => Some(parent.clone()),
                    _ => Some(own_id),
                }
            }
            _ => None,
        };
        if let Some(rollup) = rollup {
            ctx.set(IndexField::Rollup, rollup.as_str())?;
        }
        Ok(())
    }
}

/// `"{title}|{id}"` of the deepest object of `kind` on the path, the object
/// itself included.
fn nearest_of_type(
    ctx: &mut DocumentIndexingContext<'_>,
    path: &[ObjectId],
    kind: ResourceType,
) -> IndexingResult<Option<String>> {
    for id in path.iter().rev() {
        let matches = if id == ctx.id() {
            ctx.resource_type() == kind
        } else {
            ctx.related_object(id)?
                .is_some_and(|object| object.resource_type() == kind)
        };
        if matches {
            let title = ctx
                .services()
                .repository()
                .get_title(id)?
                .unwrap_or_else(|| id.to_string());
            return Ok(Some(format!("{title}|{id}")));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ResourceTypeFilter;
    use crate::testing::{Harness, TreeBuilder};
    use crate::context::DocumentIndexingContext;
    use crate::services::IndexingServices;
    use boxc_acl::AclCacheConfig;
    use boxc_store::{AncestorPathResolver, InMemoryRepository, InMemorySearchIndex, StoreResult};
    use boxc_types::{vocab, OutputDocument};
    use std::sync::Arc;

    fn run(harness: &Harness, id: &str) -> IndexingResult<OutputDocument> {
        let mut ctx = harness.context(id);
        ResourceTypeFilter.filter(&mut ctx)?;
        PathFilter.filter(&mut ctx)?;
        Ok(ctx.into_document())
    }

    fn tree() -> TreeBuilder {
        TreeBuilder::new()
            .unit("unit")
            .prop("unit", vocab::TITLE, "Special Collections")
            .collection("coll", "unit")
            .prop("coll", vocab::TITLE, "Letters")
            .folder("folder", "coll")
            .work("work", "folder")
            .file("file", "work")
    }

    #[test]
    fn work_path_and_rollup() {
        let doc = run(&tree().build(), "work").unwrap();
        assert_eq!(
            doc.list(IndexField::AncestorPath).to_vec(),
            vec!["1,unit", "2,coll", "3,folder", "4,work"]
        );
        assert_eq!(doc.text(IndexField::AncestorIds), Some("/unit/coll/folder/work"));
        assert_eq!(doc.text(IndexField::ParentUnit), Some("Special Collections|unit"));
        assert_eq!(doc.text(IndexField::ParentCollection), Some("Letters|coll"));
        assert_eq!(doc.text(IndexField::Rollup), Some("work"));
    }

    #[test]
    fn file_ids_stop_at_parent() {
        let doc = run(&tree().build(), "file").unwrap();
        assert_eq!(doc.list(IndexField::AncestorPath).len(), 5);
        assert_eq!(doc.text(IndexField::AncestorIds), Some("/unit/coll/folder/work"));
        assert_eq!(doc.text(IndexField::Rollup), Some("work"));
    }

    #[test]
    fn file_outside_work_rolls_up_to_itself() {
        let harness = tree().file("loose", "folder").build();
        let doc = run(&harness, "loose").unwrap();
        assert_eq!(doc.text(IndexField::Rollup), Some("loose"));
    }

    #[test]
    fn containers_have_no_rollup() {
        let doc = run(&tree().build(), "folder").unwrap();
        assert!(!doc.contains(IndexField::Rollup));
    }

    #[test]
    fn unit_is_its_own_parent_unit() {
        let doc = run(&tree().build(), "unit").unwrap();
        assert_eq!(doc.list(IndexField::AncestorPath).to_vec(), vec!["1,unit"]);
        assert_eq!(doc.text(IndexField::ParentUnit), Some("Special Collections|unit"));
        assert!(!doc.contains(IndexField::ParentCollection));
    }

    #[test]
    fn untitled_ancestor_uses_id() {
        let harness = TreeBuilder::new()
            .unit("unit")
            .collection("coll", "unit")
            .work("work", "coll")
            .build();
        let doc = run(&harness, "work").unwrap();
        assert_eq!(doc.text(IndexField::ParentCollection), Some("coll|coll"));
    }

    #[test]
    fn root_has_empty_path() {
        let doc = run(&tree().build(), "collections").unwrap();
        assert!(doc.list(IndexField::AncestorPath).is_empty());
        assert!(!doc.contains(IndexField::AncestorIds));
    }

    #[test]
    fn orphan_is_structural_error() {
        let harness = tree().orphan("stray", "ghost").build();
        let err = run(&harness, "stray").unwrap_err();
        assert!(err.is_structural(), "{err}");
        assert!(matches!(err, IndexingError::Store(_)));
    }

    /// Ancestor lookups that lose the root at the top of every chain.
    struct TruncatedChains(Arc<InMemoryRepository>);

    impl AncestorPathResolver for TruncatedChains {
        fn get_ancestor_ids(&self, target: &ObjectId) -> StoreResult<Vec<ObjectId>> {
            let mut chain = self.0.get_ancestor_ids(target)?;
            if !chain.is_empty() {
                chain.remove(0);
            }
            Ok(chain)
        }
    }

    #[test]
    fn chain_without_root_is_structural_error() {
        let harness = tree().build();
        let services = IndexingServices::new(
            harness.repo.clone(),
            Arc::new(TruncatedChains(harness.repo.clone())),
            Arc::new(InMemorySearchIndex::new()),
            &AclCacheConfig::default(),
        )
        .unwrap();
        let mut ctx = DocumentIndexingContext::new(&services, harness.object("work"));
        ResourceTypeFilter.filter(&mut ctx).unwrap();

        let err = PathFilter.filter(&mut ctx).unwrap_err();
        assert!(err.is_structural(), "{err}");
        assert!(matches!(
            err,
            IndexingError::RootlessChain { ref first, .. } if first.as_str() == "unit"
        ));
        assert!(!ctx.document().contains(IndexField::AncestorPath));
    }
}
