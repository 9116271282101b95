//! Durable record of objects a reindex job has finished.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use boxc_types::ObjectId;

use crate::error::{EventError, EventResult};

/// Tracks which objects have been indexed so a job can resume.
pub trait ProgressTracker: Send + Sync {
    fn is_done(&self, id: &ObjectId) -> bool;

    fn mark_done(&self, id: &ObjectId) -> EventResult<()>;

    /// Number of objects recorded as done.
    fn completed(&self) -> usize;
}

/// Progress kept only for the lifetime of the process.
#[derive(Default)]
pub struct InMemoryProgress {
    done: RwLock<HashSet<ObjectId>>,
}

impl InMemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressTracker for InMemoryProgress {
    fn is_done(&self, id: &ObjectId) -> bool {
        self.done.read().expect("lock poisoned").contains(id)
    }

    fn mark_done(&self, id: &ObjectId) -> EventResult<()> {
        self.done.write().expect("lock poisoned").insert(id.clone());
        Ok(())
    }

    fn completed(&self) -> usize {
        self.done.read().expect("lock poisoned").len()
    }
}

/// Append-only progress file, one object id per line.
pub struct FileProgressTracker {
    path: PathBuf,
    done: RwLock<HashSet<ObjectId>>,
    file: Mutex<File>,
}

impl FileProgressTracker {
    /// Open or create the progress file, loading ids already recorded.
    pub fn open(path: impl AsRef<Path>) -> EventResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut done = HashSet::new();

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for (n, line) in reader.lines().enumerate() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let id = ObjectId::new(line).map_err(|e| EventError::CorruptProgress {
                    path: path.clone(),
                    line: n + 1,
                    reason: e.to_string(),
                })?;
                done.insert(id);
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::info!(path = %path.display(), completed = done.len(), "opened progress file");

        Ok(Self {
            path,
            done: RwLock::new(done),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressTracker for FileProgressTracker {
    fn is_done(&self, id: &ObjectId) -> bool {
        self.done.read().expect("lock poisoned").contains(id)
    }

    fn mark_done(&self, id: &ObjectId) -> EventResult<()> {
        if !self.done.write().expect("lock poisoned").insert(id.clone()) {
            return Ok(());
        }
        let mut file = self.file.lock().expect("lock poisoned");
        writeln!(file, "{id}")?;
        file.flush()?;
        Ok(())
    }

    fn completed(&self) -> usize {
        self.done.read().expect("lock poisoned").len()
    }
}
