use boxc_types::temporal::parse_date;
use boxc_types::{vocab, IndexField};

use crate::context::DocumentIndexingContext;
use crate::error::{IndexingError, IndexingResult};
use crate::filter::IndexDocumentFilter;

/// Sets `id`, `title`, `abstract` and `dateCreated`.
///
/// The title falls back to the object id so every document has one.
pub struct DescriptiveFilter;

impl IndexDocumentFilter for DescriptiveFilter {
    fn name(&self) -> &str {
        "descriptive"
    }

    fn provides(&self) -> &[IndexField] {
        &[
            IndexField::Id,
            IndexField::Title,
            IndexField::Abstract,
            IndexField::DateCreated,
        ]
    }

    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
        let id = ctx.id().clone();
        let properties = ctx.object().properties().clone();

        ctx.set(IndexField::Id, id.as_str())?;
        let title = properties
            .first(vocab::TITLE)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(id.as_str());
        ctx.set(IndexField::Title, title)?;

        if let Some(description) = properties.first(vocab::DESCRIPTION) {
            ctx.set(IndexField::Abstract, description)?;
        }

        if let Some(literal) = properties.first(vocab::DATE_CREATED) {
            let created = parse_date(literal).map_err(|_| IndexingError::InvalidDate {
                id: id.clone(),
                value: literal.to_string(),
            })?;
            ctx.set(IndexField::DateCreated, created)?;
        }
        Ok(())
    }
}
