//! JSON snapshot of the queue on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dispatch::Persist;
use crate::error::{Error, Result};

use super::queue::Queue;

/// Load the queue from `path`. A missing or blank file is an empty queue.
pub fn load_snapshot(path: &Path) -> Result<Queue> {
    if !path.exists() {
        tracing::info!("No queue snapshot at {}, starting empty", path.display());
        return Ok(Queue::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Queue::new());
    }

    let queue: Queue = serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Malformed queue snapshot {}: {}", path.display(), e))
    })?;

    tracing::info!("Loaded queue from {} ({} entries)", path.display(), queue.len());
    Ok(queue)
}

/// Write the queue to `path` through a temp file and rename.
pub fn save_snapshot(path: &Path, queue: &Queue) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string(queue)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Persistence sink that only touches the disk when the queue changed.
pub struct FilePersister {
    path: PathBuf,
    last: Queue,
}

impl FilePersister {
    /// `current` is the queue already on disk, usually the one just loaded.
    pub fn new(path: impl Into<PathBuf>, current: Queue) -> Self {
        Self {
            path: path.into(),
            last: current,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persist for FilePersister {
    fn persist(&mut self, queue: &Queue) -> Result<()> {
        if *queue == self.last {
            tracing::debug!("Queue unchanged, skipping write");
            return Ok(());
        }

        save_snapshot(&self.path, queue)
            .map_err(|e| Error::Persist(format!("{}: {}", self.path.display(), e)))?;

        self.last = queue.clone();
        tracing::debug!("Saved queue to {}", self.path.display());
        Ok(())
    }
}
