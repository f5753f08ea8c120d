//! Backend selection from configuration.

use crate::backend::ChestStorage;
use crate::error::{StorageError, StorageResult};
use crate::file::FileBackend;
use crate::id::EntityId;
use crate::memory::InMemoryBackend;
use crate::relational::RelationalBackend;
use echest_codec::Slot;
use std::fmt;
use std::path::Path;

/// Storage kinds a configuration may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Per-entity JSON files. Also chosen for unknown names.
    File,
    /// SQLite through [`RelationalBackend`].
    Sqlite,
    /// MySQL. Served by the relational backend, which only speaks SQLite,
    /// so a `mysql://` URI falls back to file storage.
    MySql,
    /// Document store; no backend exists yet.
    MongoDb,
    /// Ephemeral [`InMemoryBackend`].
    Memory,
}

impl BackendKind {
    /// Parses a configured kind, case-insensitively.
    ///
    /// Never fails: anything unrecognized maps to [`BackendKind::File`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Self::Sqlite,
            "mysql" => Self::MySql,
            "mongodb" | "mongo" => Self::MongoDb,
            "memory" => Self::Memory,
            "file" | "yml" | "yaml" | "json" => Self::File,
            other => {
                tracing::debug!(kind = other, "unknown backend kind, using file storage");
                Self::File
            }
        }
    }

    /// Returns true for kinds served by [`RelationalBackend`].
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Sqlite | Self::MySql)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Sqlite => "sqlite",
            Self::MySql => "mysql",
            Self::MongoDb => "mongodb",
            Self::Memory => "memory",
        })
    }
}

/// A constructed backend, whichever kind was selected.
#[derive(Debug)]
pub enum Backend {
    /// Per-entity files.
    File(FileBackend),
    /// Single-table database.
    Relational(RelationalBackend),
    /// Process-local map.
    Memory(InMemoryBackend),
}

impl Backend {
    /// Builds the backend named by `kind`.
    ///
    /// Never fails. Relational kinds try to connect with `uri` and fall
    /// back to file storage under `data_dir` on any error; the document
    /// store kind falls back without trying.
    pub fn open(kind: &str, uri: Option<&str>, data_dir: &Path) -> Self {
        let kind = BackendKind::parse(kind);
        let backend = match kind {
            BackendKind::File => Self::File(FileBackend::new(data_dir)),
            BackendKind::Memory => Self::Memory(InMemoryBackend::new()),
            BackendKind::MongoDb => {
                tracing::warn!(%kind, "backend is not implemented, falling back to file storage");
                Self::File(FileBackend::new(data_dir))
            }
            BackendKind::Sqlite | BackendKind::MySql => match connect(uri) {
                Ok(relational) => Self::Relational(relational),
                Err(error) => {
                    tracing::warn!(
                        %kind,
                        %error,
                        "failed to initialize relational backend, falling back to file storage"
                    );
                    Self::File(FileBackend::new(data_dir))
                }
            },
        };
        tracing::debug!(requested = %kind, selected = backend.kind(), "storage backend selected");
        backend
    }

    fn inner(&self) -> &dyn ChestStorage {
        match self {
            Self::File(b) => b,
            Self::Relational(b) => b,
            Self::Memory(b) => b,
        }
    }
}

fn connect(uri: Option<&str>) -> StorageResult<RelationalBackend> {
    let uri = uri.ok_or(StorageError::MissingUri)?;
    RelationalBackend::connect(uri)
}

impl From<FileBackend> for Backend {
    fn from(backend: FileBackend) -> Self {
        Self::File(backend)
    }
}

impl From<RelationalBackend> for Backend {
    fn from(backend: RelationalBackend) -> Self {
        Self::Relational(backend)
    }
}

impl From<InMemoryBackend> for Backend {
    fn from(backend: InMemoryBackend) -> Self {
        Self::Memory(backend)
    }
}

impl ChestStorage for Backend {
    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn upgrades(&self, id: EntityId) -> StorageResult<u32> {
        self.inner().upgrades(id)
    }

    fn set_upgrades(&self, id: EntityId, upgrades: u32) -> StorageResult<()> {
        self.inner().set_upgrades(id, upgrades)
    }

    fn save_items(&self, id: EntityId, slots: &[Slot]) -> StorageResult<()> {
        self.inner().save_items(id, slots)
    }

    fn load_items(&self, id: EntityId, size: usize) -> StorageResult<Vec<Slot>> {
        self.inner().load_items(id, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn kind_parsing() {
        assert_eq!(BackendKind::parse("SQLITE"), BackendKind::Sqlite);
        assert_eq!(BackendKind::parse("MySQL"), BackendKind::MySql);
        assert_eq!(BackendKind::parse("MONGODB"), BackendKind::MongoDb);
        assert_eq!(BackendKind::parse("YML"), BackendKind::File);
        assert_eq!(BackendKind::parse("memory"), BackendKind::Memory);
        assert_eq!(BackendKind::parse("cassandra"), BackendKind::File);
        assert_eq!(BackendKind::parse(""), BackendKind::File);
        assert!(BackendKind::MySql.is_relational());
        assert!(!BackendKind::MongoDb.is_relational());
    }

    #[test]
    fn file_kind() {
        let dir = tempdir().unwrap();
        let backend = Backend::open("file", None, dir.path());
        assert!(matches!(backend, Backend::File(_)));
    }

    #[test]
    fn sqlite_kind_connects() {
        let dir = tempdir().unwrap();
        let backend = Backend::open("sqlite", Some("sqlite::memory:"), dir.path());
        assert!(matches!(backend, Backend::Relational(_)));
        assert_eq!(backend.kind(), "relational");
    }

    #[test]
    fn relational_without_uri_falls_back() {
        let dir = tempdir().unwrap();
        let backend = Backend::open("sqlite", None, dir.path());
        assert!(matches!(backend, Backend::File(_)));
    }

    #[test]
    fn invalid_uri_falls_back_to_working_file_backend() {
        let dir = tempdir().unwrap();
        let backend = Backend::open("mysql", Some("mysql://nobody@nowhere/db"), dir.path());
        assert_eq!(backend.kind(), "file");

        let id = EntityId::new();
        backend.set_upgrades(id, 2).unwrap();
        assert_eq!(backend.upgrades(id).unwrap(), 2);
    }

    #[test]
    fn document_store_falls_back() {
        let dir = tempdir().unwrap();
        let backend = Backend::open("MONGODB", Some(":memory:"), dir.path());
        assert!(matches!(backend, Backend::File(_)));
    }

    #[test]
    fn memory_kind() {
        let dir = tempdir().unwrap();
        let backend = Backend::open("memory", None, dir.path());
        assert_eq!(backend.kind(), "memory");
    }
}
