//! Snapshot persistence
//!
//! The registry persists its full state after every mutation as one JSON
//! blob. Persistence is a trait so the registry can be driven against a
//! real file or an in-memory store in tests.

use eyre::{Context, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::SectorRecord;

/// The durable form of the registry: every record, in catalog order.
/// Records carry their identity triple, so the snapshot is self-keyed.
pub type Snapshot = Vec<SectorRecord>;

/// Storage seam for the registry
pub trait SnapshotStore {
    /// Read the stored snapshot. `None` means nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Overwrite the stored snapshot
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Stores the snapshot as a single JSON file
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .context(format!("Failed to read snapshot: {}", self.path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .context(format!("Corrupt snapshot: {}", self.path.display()))?;
        debug!(path = %self.path.display(), records = snapshot.len(), "Loaded snapshot");
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create store directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string(snapshot)?;
        std::fs::write(&self.path, content)
            .context(format!("Failed to write snapshot: {}", self.path.display()))?;
        debug!(path = %self.path.display(), records = snapshot.len(), "Saved snapshot");
        Ok(())
    }
}

/// In-process store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        match self.blob.borrow().as_deref() {
            Some(content) => Ok(Some(serde_json::from_str(content)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.blob.borrow_mut() = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }
}
