use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use boxc_indexing::{FailedObject, PipelineDriver, WorkerConfig};
use boxc_store::walk_tree;
use boxc_types::ObjectId;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::cancel::CancelHandle;
use crate::error::{EventError, EventResult};
use crate::progress::{InMemoryProgress, ProgressTracker};

/// Outcome of a [`ReindexJob`] run.
#[derive(Clone, Debug, Default)]
pub struct JobReport {
    pub indexed: Vec<ObjectId>,
    /// Objects the progress tracker already held.
    pub skipped: usize,
    pub failed: Vec<FailedObject>,
    /// The job stopped before dispatching every object.
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl JobReport {
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.failed.is_empty()
    }
}

/// Bulk "reindex everything below an object" job.
///
/// Objects are processed level by level from the deepest up, each level
/// fanned out over a bounded pool of blocking workers. A level finishes
/// before the next one starts so Works always see their files' documents.
pub struct ReindexJob {
    driver: Arc<PipelineDriver>,
    workers: usize,
    progress: Arc<dyn ProgressTracker>,
    cancel: CancelHandle,
}

impl ReindexJob {
    pub fn new(driver: Arc<PipelineDriver>, config: &WorkerConfig) -> Self {
        Self {
            driver,
            workers: config.count.max(1),
            progress: Arc::new(InMemoryProgress::new()),
            cancel: CancelHandle::new(),
        }
    }

    /// Record completed objects through `progress`, skipping those it
    /// already holds.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressTracker>) -> Self {
        self.progress = progress;
        self
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Objects below and including `start`, grouped by depth, deepest first.
    pub fn plan(&self, start: &ObjectId) -> EventResult<Vec<Vec<ObjectId>>> {
        let entries = walk_tree(self.driver.services().repository(), start)?;
        let mut levels: BTreeMap<Reverse<usize>, Vec<ObjectId>> = BTreeMap::new();
        for entry in entries {
            levels.entry(Reverse(entry.depth)).or_default().push(entry.id);
        }
        Ok(levels.into_values().collect())
    }

    pub async fn run(&self, start: &ObjectId) -> EventResult<JobReport> {
        let started = Instant::now();
        let levels = self.plan(start)?;
        let total: usize = levels.iter().map(Vec::len).sum();
        info!(start = %start, objects = total, levels = levels.len(), workers = self.workers, "reindex started");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut report = JobReport::default();

        for level in levels {
            let mut tasks = JoinSet::new();

            for id in level {
                if self.progress.is_done(&id) {
                    report.skipped += 1;
                    continue;
                }
                let permit = tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => None,
                    permit = Arc::clone(&semaphore).acquire_owned() => Some(
                        permit.map_err(|_| EventError::Worker("worker pool closed".into()))?,
                    ),
                };
                let Some(permit) = permit else {
                    report.cancelled = true;
                    break;
                };

                let driver = Arc::clone(&self.driver);
                tasks.spawn_blocking(move || {
                    let _permit = permit;
                    let outcome = driver.index_object(&id).map(|_| ());
                    (id, outcome)
                });
            }

            while let Some(joined) = tasks.join_next().await {
                let (id, outcome) = joined?;
                match outcome {
                    Ok(()) => {
                        self.progress.mark_done(&id)?;
                        report.indexed.push(id);
                    }
                    Err(e) => {
                        let structural = e.is_structural();
                        warn!(id = %id, error = %e, structural, "reindex failed for object");
                        report.failed.push(FailedObject {
                            id,
                            reason: e.to_string(),
                            structural,
                        });
                    }
                }
            }

            if report.cancelled {
                break;
            }
        }

        report.elapsed = started.elapsed();
        info!(
            indexed = report.indexed.len(),
            skipped = report.skipped,
            failed = report.failed.len(),
            cancelled = report.cancelled,
            elapsed = ?report.elapsed,
            "reindex finished"
        );
        Ok(report)
    }
}
