use std::cmp::Reverse;
use std::sync::Arc;

use boxc_indexing::{BatchSummary, FailedObject, PipelineDriver};
use boxc_store::walk_tree;
use boxc_types::ObjectId;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::cancel::CancelHandle;
use crate::error::EventResult;
use crate::event::{ChangeKind, ObjectChanged};
use crate::router::EventStream;

/// Totals of a [`ReindexScheduler::run`] loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    pub events: usize,
    pub indexed: usize,
    pub removed: usize,
    pub failed: Vec<FailedObject>,
    /// Events dropped because the subscriber fell behind.
    pub lagged: u64,
    /// Events that could not be expanded into targets.
    pub errors: usize,
}

/// Turns change events into incremental reindexing.
pub struct ReindexScheduler {
    driver: Arc<PipelineDriver>,
}

impl ReindexScheduler {
    pub fn new(driver: Arc<PipelineDriver>) -> Self {
        Self { driver }
    }

    /// Ids to reindex for an event, deepest first.
    ///
    /// Changes to inherited facets reach the whole subtree; ordering members
    /// ahead of their containers lets Works aggregate fresh file documents.
    pub fn targets_for(&self, event: &ObjectChanged) -> EventResult<Vec<ObjectId>> {
        match event.kind {
            ChangeKind::Deleted => Ok(Vec::new()),
            ChangeKind::Updated => Ok(vec![event.id.clone()]),
            ChangeKind::AccessChanged | ChangeKind::Moved => {
                let mut entries = walk_tree(self.driver.services().repository(), &event.id)?;
                entries.sort_by_key(|entry| Reverse(entry.depth));
                Ok(entries.into_iter().map(|entry| entry.id).collect())
            }
        }
    }

    /// Apply one event synchronously.
    pub fn handle(&self, event: &ObjectChanged) -> EventResult<BatchSummary> {
        let services = self.driver.services();
        services.acl_cache().invalidate(&event.id);

        if event.kind == ChangeKind::Deleted {
            let removed = services.search_index().remove(&event.id)?;
            debug!(id = %event.id, removed, "document removed");
            return Ok(BatchSummary::default());
        }

        let targets = self.targets_for(event)?;
        debug!(event = %event, targets = targets.len(), "reindexing");
        Ok(self.driver.index_batch(&targets))
    }

    /// Consume events until the stream closes or `cancel` fires.
    ///
    /// Each event is handled on the blocking pool; events are applied one
    /// at a time so a later change never races an earlier one.
    pub async fn run(
        self: Arc<Self>,
        mut stream: EventStream,
        cancel: CancelHandle,
    ) -> EventResult<SchedulerReport> {
        let mut report = SchedulerReport::default();

        loop {
            let event = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                received = stream.recv() => match received {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event subscriber lagged, changes were dropped");
                        report.lagged += skipped;
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                },
            };

            let id = event.id.clone();
            let kind = event.kind;
            let scheduler = Arc::clone(&self);
            let outcome = tokio::task::spawn_blocking(move || scheduler.handle(&event)).await?;
            report.events += 1;

            match outcome {
                Ok(summary) => {
                    if kind == ChangeKind::Deleted {
                        report.removed += 1;
                    }
                    report.indexed += summary.indexed.len();
                    report.failed.extend(summary.failed);
                }
                Err(e) => {
                    warn!(id = %id, kind = %kind, error = %e, "event not applied");
                    report.errors += 1;
                }
            }
        }

        info!(
            events = report.events,
            indexed = report.indexed,
            failed = report.failed.len(),
            "scheduler stopped"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fixture, id};
    use crate::router::{EventFilter, EventRouter};
    use boxc_store::SearchIndex;
    use boxc_types::IndexField;

    #[test]
    fn updated_targets_only_the_object() {
        let fx = fixture();
        let scheduler = ReindexScheduler::new(fx.driver);
        let targets = scheduler.targets_for(&ObjectChanged::updated(id("coll"))).unwrap();
        assert_eq!(targets, vec![id("coll")]);
    }

    #[test]
    fn access_change_targets_subtree_deepest_first() {
        let fx = fixture();
        let scheduler = ReindexScheduler::new(fx.driver);
        let targets = scheduler
            .targets_for(&ObjectChanged::access_changed(id("folder")))
            .unwrap();
        assert_eq!(targets, vec![id("scan"), id("broken"), id("work2"), id("folder")]);
    }

    #[test]
    fn moving_a_missing_object_is_an_error() {
        let fx = fixture();
        let scheduler = ReindexScheduler::new(fx.driver);
        assert!(scheduler.targets_for(&ObjectChanged::moved(id("ghost"))).is_err());
    }

    #[test]
    fn access_change_is_visible_after_handling() {
        let fx = fixture();
        let scheduler = ReindexScheduler::new(fx.driver.clone());
        scheduler.handle(&ObjectChanged::access_changed(id("coll"))).unwrap();
        let before = fx.index.get(&id("jpg")).unwrap().unwrap();
        assert!(before.list(IndexField::Status).iter().any(|t| t == "Public Access"));

        fx.repo
            .update(&id("coll"), |record| {
                record.properties.set("acl:viewOriginals", "authenticated");
            })
            .unwrap();
        let summary = scheduler.handle(&ObjectChanged::access_changed(id("coll"))).unwrap();
        assert_eq!(summary.failed_ids(), vec![&id("broken")]);

        let after = fx.index.get(&id("jpg")).unwrap().unwrap();
        assert!(!after.list(IndexField::Status).iter().any(|t| t == "Public Access"));
    }

    #[test]
    fn delete_removes_document() {
        let fx = fixture();
        let scheduler = ReindexScheduler::new(fx.driver.clone());
        scheduler.handle(&ObjectChanged::updated(id("pdf"))).unwrap();
        assert!(fx.index.get(&id("pdf")).unwrap().is_some());

        let summary = scheduler.handle(&ObjectChanged::deleted(id("pdf"))).unwrap();
        assert!(summary.indexed.is_empty());
        assert!(fx.index.get(&id("pdf")).unwrap().is_none());
    }

    #[tokio::test]
    async fn run_consumes_routed_events() {
        let fx = fixture();
        let router = EventRouter::default();
        let stream = router.subscribe(EventFilter::default());
        let scheduler = Arc::new(ReindexScheduler::new(fx.driver.clone()));
        let task = tokio::spawn(scheduler.run(stream, CancelHandle::new()));

        router.publish(&ObjectChanged::moved(id("work")));
        router.publish(&ObjectChanged::updated(id("ghost")));
        router.publish(&ObjectChanged::deleted(id("jpg")));
        drop(router);

        let report = task.await.unwrap().unwrap();
        assert_eq!(report.events, 3);
        assert_eq!(report.indexed, 3);
        assert_eq!(report.removed, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.errors, 0);
        assert!(fx.index.get(&id("work")).unwrap().is_some());
        assert!(fx.index.get(&id("jpg")).unwrap().is_none());
    }

    #[tokio::test]
    async fn run_stops_on_cancel() {
        let fx = fixture();
        let router = EventRouter::default();
        let stream = router.subscribe(EventFilter::default());
        let cancel = CancelHandle::new();
        let scheduler = Arc::new(ReindexScheduler::new(fx.driver));
        let task = tokio::spawn(scheduler.run(stream, cancel.clone()));

        cancel.cancel();
        let report = task.await.unwrap().unwrap();
        assert_eq!(report.events, 0);
        assert_eq!(router.subscriber_count(), 1);
    }
}
