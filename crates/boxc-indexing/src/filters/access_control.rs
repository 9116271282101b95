use std::collections::BTreeSet;

use boxc_types::vocab::principals;
use boxc_types::IndexField;

use crate::context::DocumentIndexingContext;
use crate::error::IndexingResult;
use crate::filter::IndexDocumentFilter;

/// Partitions the object's own grants into `adminGroup`, `readGroup` and
/// `roleGroup`.
///
/// Inherited access is not considered here; it surfaces through the status
/// facets of [`super::AccessStatusFilter`]. Revocations contribute to none
/// of the three lists.
pub struct AccessControlFilter;

impl IndexDocumentFilter for AccessControlFilter {
    fn name(&self) -> &str {
        "access_control"
    }

    fn provides(&self) -> &[IndexField] {
        &[IndexField::AdminGroup, IndexField::ReadGroup, IndexField::RoleGroup]
    }

    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
        if ctx.object().is_root() {
            ctx.set(IndexField::AdminGroup, vec![principals::ADMIN_ACCESS.to_string()])?;
            ctx.set(IndexField::ReadGroup, vec![principals::PUBLIC.to_string()])?;
            ctx.set(IndexField::RoleGroup, Vec::<String>::new())?;
            return Ok(());
        }

        let grants = ctx.own_grants()?;
        let mut admin = BTreeSet::new();
        let mut read = BTreeSet::new();
        let mut roles = BTreeSet::new();

        for grant in grants.iter().filter(|g| !g.is_revocation()) {
            if grant.role.is_staff() {
                admin.insert(grant.principal.clone());
            }
            read.insert(grant.principal.clone());
            roles.insert(grant.role_group_entry());
        }

        let admin: Vec<String> = admin.into_iter().collect();
        let read: Vec<String> = read.into_iter().collect();
        let roles: Vec<String> = roles.into_iter().collect();
        tracing::trace!(id = %ctx.id(), admin = admin.len(), read = read.len(), "access groups");

        ctx.set(IndexField::AdminGroup, admin)?;
        ctx.set(IndexField::ReadGroup, read)?;
        ctx.set(IndexField::RoleGroup, roles)?;
        Ok(())
    }
}
