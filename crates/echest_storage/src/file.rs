//! File-based storage backend: one JSON document per entity.

use crate::backend::ChestStorage;
use crate::error::{StorageError, StorageResult};
use crate::id::EntityId;
use echest_codec::{Item, Slot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of record files.
pub const RECORD_EXTENSION: &str = "json";

/// On-disk shape of one record.
///
/// ```text
/// {
///   "upgrades": 1,
///   "slots": { "0": { "kind": "stone", "amount": 64 }, "7": { ... } }
/// }
/// ```
///
/// An absent slot has no key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ChestDocument {
    #[serde(default)]
    upgrades: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    slots: BTreeMap<u32, Item>,
}

/// A file-based storage backend.
///
/// Each entity lives in `<dir>/<id>.json`. Every operation reads the
/// whole document, applies one change, and for writes serializes the whole
/// document back. No file handle outlives a call.
///
/// # Thread Safety
///
/// There is no locking. Concurrent writers to the same entity race at the
/// filesystem level and the last writer wins.
///
/// # Example
///
/// ```no_run
/// use echest_storage::{ChestStorage, EntityId, FileBackend};
///
/// let backend = FileBackend::new("playerdata");
/// let id = EntityId::new();
/// backend.set_upgrades(id, 2).unwrap();
/// assert_eq!(backend.size(id).unwrap(), 45);
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Creates a backend rooted at `dir`, creating the directory if needed.
    ///
    /// Never fails: a directory that cannot be created is logged and later
    /// writes report the I/O error. This lets the backend act as the
    /// fallback of last resort.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(error) = fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), %error, "failed to create record directory");
        }
        Self { dir }
    }

    /// Creates a backend rooted at `dir`, failing if the directory cannot
    /// be created.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the record directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the record file for `id`.
    #[must_use]
    pub fn path_for(&self, id: EntityId) -> PathBuf {
        self.dir.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    fn read_document(&self, id: EntityId) -> StorageResult<ChestDocument> {
        let bytes = match fs::read(self.path_for(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ChestDocument::default()),
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Ok(ChestDocument::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Reads the document a write will modify. A malformed file (for
    /// example one cut short by a crash mid-write) is replaced by an empty
    /// document so the entity can be saved again.
    fn read_for_update(&self, id: EntityId) -> StorageResult<ChestDocument> {
        match self.read_document(id) {
            Err(StorageError::Document(error)) => {
                tracing::warn!(
                    entity = %id,
                    path = %self.path_for(id).display(),
                    %error,
                    "malformed record file, overwriting"
                );
                Ok(ChestDocument::default())
            }
            other => other,
        }
    }

    fn write_document(&self, id: EntityId, document: &ChestDocument) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        fs::write(self.path_for(id), bytes)?;
        tracing::debug!(entity = %id, "record file written");
        Ok(())
    }
}

impl ChestStorage for FileBackend {
    fn kind(&self) -> &'static str {
        "file"
    }

    fn upgrades(&self, id: EntityId) -> StorageResult<u32> {
        Ok(self.read_document(id)?.upgrades)
    }

    fn set_upgrades(&self, id: EntityId, upgrades: u32) -> StorageResult<()> {
        let mut document = self.read_for_update(id)?;
        document.upgrades = upgrades;
        self.write_document(id, &document)
    }

    fn save_items(&self, id: EntityId, slots: &[Slot]) -> StorageResult<()> {
        let mut document = self.read_for_update(id)?;
        document.slots = slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let item = slot.as_ref()?;
                Some((u32::try_from(index).ok()?, item.clone()))
            })
            .collect();
        self.write_document(id, &document)
    }

    fn load_items(&self, id: EntityId, size: usize) -> StorageResult<Vec<Slot>> {
        let document = self.read_document(id)?;
        let mut slots: Vec<Slot> = vec![None; size];
        for (index, item) in document.slots {
            if let Some(slot) = slots.get_mut(index as usize) {
                *slot = Some(item);
            }
        }
        Ok(slots)
    }
}
