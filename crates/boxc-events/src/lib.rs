//! Incremental and bulk reindexing driven by repository change events.
//!
//! Change notifications fan out through an [`EventRouter`]; a
//! [`ReindexScheduler`] turns each one into the set of objects whose
//! documents it invalidates. A [`ReindexJob`] rebuilds a whole subtree on a
//! bounded worker pool, recording progress so an interrupted job resumes
//! where it stopped.

pub mod cancel;
pub mod error;
pub mod event;
pub mod job;
pub mod progress;
pub mod router;
pub mod scheduler;

#[cfg(test)]
mod fixtures;

pub use cancel::CancelHandle;
pub use error::{EventError, EventResult};
pub use event::{ChangeKind, ObjectChanged};
pub use job::{JobReport, ReindexJob};
pub use progress::{FileProgressTracker, InMemoryProgress, ProgressTracker};
pub use router::{EventFilter, EventRouter, EventStream};
pub use scheduler::{ReindexScheduler, SchedulerReport};
