use std::sync::Arc;
use std::time::Instant;

use boxc_types::{ObjectId, OutputDocument};

use crate::context::DocumentIndexingContext;
use crate::error::IndexingResult;
use crate::pipeline::FilterPipeline;
use crate::services::IndexingServices;

/// An object whose pipeline run failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedObject {
    pub id: ObjectId,
    pub reason: String,
    /// The object's data is malformed; retrying unchanged will fail again.
    pub structural: bool,
}

/// Outcome of indexing a batch of objects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub indexed: Vec<ObjectId>,
    pub failed: Vec<FailedObject>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Ids to retry.
    pub fn failed_ids(&self) -> Vec<&ObjectId> {
        self.failed.iter().map(|f| &f.id).collect()
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: BatchSummary) {
        self.indexed.extend(other.indexed);
        self.failed.extend(other.failed);
    }
}

/// Runs the filter pipeline for objects and hands finished documents to the
/// search index.
///
/// The driver is shared by every worker; each call builds its own
/// [`DocumentIndexingContext`].
pub struct PipelineDriver {
    services: Arc<IndexingServices>,
    pipeline: FilterPipeline,
}

impl PipelineDriver {
    pub fn new(services: Arc<IndexingServices>, pipeline: FilterPipeline) -> Self {
        Self { services, pipeline }
    }

    /// A driver running the standard filter order.
    pub fn with_default_filters(services: Arc<IndexingServices>) -> IndexingResult<Self> {
        Ok(Self::new(services, FilterPipeline::with_default_filters()?))
    }

    pub fn services(&self) -> &Arc<IndexingServices> {
        &self.services
    }

    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    /// Build the document for one object without emitting it.
    pub fn build_document(&self, id: &ObjectId) -> IndexingResult<OutputDocument> {
        let start = Instant::now();
        let object = self.services.repository().get_content_object(id)?;
        let mut ctx = DocumentIndexingContext::new(&self.services, object);
        let results = self.pipeline.run(&mut ctx)?;

        for result in &results {
            tracing::trace!(id = %id, filter = %result.filter_name, elapsed = ?result.elapsed, "filter done");
        }
        tracing::debug!(id = %id, filters = results.len(), elapsed = ?start.elapsed(), "document built");
        Ok(ctx.into_document())
    }

    /// Build the document for one object and add it to the search index.
    pub fn index_object(&self, id: &ObjectId) -> IndexingResult<OutputDocument> {
        let document = self.build_document(id)?;
        self.services.search_index().add(document.clone())?;
        tracing::info!(id = %id, "indexed");
        Ok(document)
    }

    /// Index every id in order, isolating failures per object.
    ///
    /// Works aggregate facets of their already indexed files, so callers
    /// should list files before their works.
    pub fn index_batch(&self, ids: &[ObjectId]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for id in ids {
            match self.index_object(id) {
                Ok(_) => summary.indexed.push(id.clone()),
                Err(e) => {
                    let structural = e.is_structural();
                    tracing::warn!(id = %id, error = %e, structural, "indexing failed");
                    summary.failed.push(FailedObject {
                        id: id.clone(),
                        reason: e.to_string(),
                        structural,
                    });
                }
            }
        }
        tracing::info!(
            indexed = summary.indexed.len(),
            failed = summary.failed.len(),
            "batch complete"
        );
        summary
    }
}
