//! Relational storage backend on SQLite.

use crate::backend::ChestStorage;
use crate::error::{StorageError, StorageResult};
use crate::id::EntityId;
use echest_codec::{decode_slots, encode_slots, Slot};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS chests (
    id       TEXT PRIMARY KEY NOT NULL,
    upgrades INTEGER NOT NULL DEFAULT 0,
    items    BLOB
)";

const SELECT_UPGRADES: &str = "SELECT upgrades FROM chests WHERE id = ?1";
const SELECT_ITEMS: &str = "SELECT items FROM chests WHERE id = ?1";
const UPSERT_UPGRADES: &str = "INSERT INTO chests (id, upgrades) VALUES (?1, ?2)
    ON CONFLICT(id) DO UPDATE SET upgrades = excluded.upgrades";
const UPSERT_ITEMS: &str = "INSERT INTO chests (id, items) VALUES (?1, ?2)
    ON CONFLICT(id) DO UPDATE SET items = excluded.items";

/// URI prefixes understood by [`RelationalBackend::connect`], longest first.
const URI_PREFIXES: [&str; 3] = ["jdbc:sqlite:", "sqlite://", "sqlite:"];
const MEMORY_TARGET: &str = ":memory:";

#[derive(Debug, PartialEq, Eq)]
enum Target {
    Memory,
    File(PathBuf),
}

fn parse_uri(uri: &str) -> StorageResult<Target> {
    let trimmed = uri.trim();
    let rest = URI_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .or_else(|| (trimmed == MEMORY_TARGET).then_some(trimmed));

    match rest {
        Some(MEMORY_TARGET) => Ok(Target::Memory),
        Some(path) if !path.is_empty() => Ok(Target::File(PathBuf::from(path))),
        _ => Err(StorageError::unsupported_uri(uri)),
    }
}

/// A relational storage backend.
///
/// One row per entity in the `chests` table:
///
/// | column     | type                | meaning                       |
/// |------------|---------------------|-------------------------------|
/// | `id`       | `TEXT PRIMARY KEY`  | hyphenated entity UUID        |
/// | `upgrades` | `INTEGER`           | upgrade count                 |
/// | `items`    | `BLOB` (nullable)   | slot blob, see `echest_codec` |
///
/// The connection is opened once and shared by every call. Writes are
/// upserts so callers never distinguish create from update.
///
/// # Thread Safety
///
/// The connection sits behind a mutex; calls from several threads are
/// serialized.
#[derive(Debug)]
pub struct RelationalBackend {
    conn: Mutex<Connection>,
    uri: String,
}

impl RelationalBackend {
    /// Connects using a connection URI and creates the table if missing.
    ///
    /// Accepted forms: `sqlite:<path>`, `sqlite://<path>`,
    /// `jdbc:sqlite:<path>` and `:memory:` (also behind any of the
    /// prefixes).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UnsupportedUri`] for any other scheme, or a
    /// database error if the connection or the schema setup fails.
    pub fn connect(uri: &str) -> StorageResult<Self> {
        let conn = match parse_uri(uri)? {
            Target::Memory => Connection::open_in_memory()?,
            Target::File(path) => Connection::open(path)?,
        };
        Self::with_connection(conn, uri)
    }

    /// Opens (or creates) a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or initialized.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, &format!("sqlite:{}", path.display()))
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, MEMORY_TARGET)
    }

    fn with_connection(conn: Connection, uri: &str) -> StorageResult<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        tracing::debug!(uri, "relational backend ready");
        Ok(Self {
            conn: Mutex::new(conn),
            uri: uri.to_string(),
        })
    }

    /// Returns the URI this backend was opened with.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl ChestStorage for RelationalBackend {
    fn kind(&self) -> &'static str {
        "relational"
    }

    fn upgrades(&self, id: EntityId) -> StorageResult<u32> {
        let conn = self.conn.lock();
        let stored: Option<i64> = conn
            .query_row(SELECT_UPGRADES, params![id.to_string()], |row| row.get(0))
            .optional()?;
        Ok(stored.map_or(0, |n| u32::try_from(n.max(0)).unwrap_or(u32::MAX)))
    }

    fn set_upgrades(&self, id: EntityId, upgrades: u32) -> StorageResult<()> {
        let conn = self.conn.lock();
        conn.execute(UPSERT_UPGRADES, params![id.to_string(), upgrades])?;
        Ok(())
    }

    fn save_items(&self, id: EntityId, slots: &[Slot]) -> StorageResult<()> {
        let blob = encode_slots(slots)?;
        let conn = self.conn.lock();
        conn.execute(UPSERT_ITEMS, params![id.to_string(), blob])?;
        tracing::debug!(entity = %id, slots = slots.len(), "slot blob written");
        Ok(())
    }

    fn load_items(&self, id: EntityId, size: usize) -> StorageResult<Vec<Slot>> {
        let blob: Option<Option<Vec<u8>>> = self
            .conn
            .lock()
            .query_row(SELECT_ITEMS, params![id.to_string()], |row| row.get(0))
            .optional()?;

        match blob.flatten() {
            Some(bytes) => Ok(decode_slots(&bytes, size)?),
            None => Ok(vec![None; size]),
        }
    }
}
