use std::time::Duration;

use boxc_types::IndexField;

use crate::context::DocumentIndexingContext;
use crate::error::IndexingResult;

// ---------------------------------------------------------------------------
// FilterResult
// ---------------------------------------------------------------------------

/// Recorded result from one completed filter.
#[derive(Clone, Debug)]
pub struct FilterResult {
    /// Name of the filter that ran.
    pub filter_name: String,
    /// Wall-clock time the filter took.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// IndexDocumentFilter trait
// ---------------------------------------------------------------------------

/// One transformation step of the indexing pipeline.
///
/// Filters run in a fixed order over a single [`DocumentIndexingContext`].
/// A filter only writes the fields it declares in [`Self::provides`] and may
/// only read document fields declared in [`Self::requires`], which an
/// earlier filter must provide.
///
/// The trait is object-safe and `Send + Sync` so filters can be stored in a
/// `Vec<Box<dyn IndexDocumentFilter>>` shared by all workers.
pub trait IndexDocumentFilter: Send + Sync {
    /// Short name used in logs and errors (e.g. `"path"`).
    fn name(&self) -> &str;

    /// Document fields this filter reads.
    fn requires(&self) -> &[IndexField] {
        &[]
    }

    /// Document fields this filter may write.
    fn provides(&self) -> &[IndexField];

    /// Populate the document from the context.
    fn filter(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()>;
}
