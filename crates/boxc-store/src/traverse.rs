use std::collections::{HashSet, VecDeque};

use boxc_types::{ObjectId, ResourceType};

use crate::error::StoreResult;
use crate::traits::ObjectRepository;

/// One object reached by [`walk_tree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub id: ObjectId,
    pub resource_type: ResourceType,
    /// Distance below the starting object, which is depth 0.
    pub depth: usize,
}

/// Breadth-first walk over member links, starting object included.
///
/// Members listed by a container but missing from the repository are
/// skipped with a warning; any other repository failure aborts the walk.
pub fn walk_tree(repo: &dyn ObjectRepository, start: &ObjectId) -> StoreResult<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([(start.clone(), 0usize)]);

    while let Some((id, depth)) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        let object = match repo.get_content_object(&id) {
            Ok(object) => object,
            Err(crate::StoreError::NotFound(missing)) if depth > 0 => {
                tracing::warn!(id = %missing, "member listed but not found, skipping");
                continue;
            }
            Err(e) => return Err(e),
        };
        for member in object.members() {
            queue.push_back((member.clone(), depth + 1));
        }
        entries.push(TreeEntry {
            id,
            resource_type: object.resource_type(),
            depth,
        });
    }

    Ok(entries)
}
