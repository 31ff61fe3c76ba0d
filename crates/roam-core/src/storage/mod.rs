//! Durable persistence for the trip record set.
//!
//! The [`Store`](crate::Store) keeps every trip in memory and hands each
//! committed change to a [`Backend`]. Backends are synchronous; the store calls
//! them from the blocking thread pool.
//!
//! Three implementations ship with the crate:
//!
//! - [`FileBackend`]: one JSON document, replaced atomically on every commit
//! - [`SqliteBackend`]: one SQLite row per trip holding the JSON document
//! - [`MemoryBackend`]: no durability, with optional failure injection for
//!   tests

use std::{collections::BTreeMap, fmt, path::Path, str::FromStr, sync::Arc};

use crate::{error::Result, models::Trip};

pub mod file;
pub mod memory;
pub mod sqlite;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// The full record set, ordered by id.
pub type Records = BTreeMap<u64, Trip>;

/// A durable home for trips.
///
/// `upsert` and `remove` receive the record set as it will look once the
/// change is committed, so whole-document backends can write it out as is
/// while row-based backends only touch the affected record. Either call must
/// leave the persisted state as it was when it returns an error.
pub trait Backend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Reads every persisted trip. A backend with nothing stored yet returns
    /// an empty set.
    fn load_all(&self) -> Result<Records>;

    /// Persists `trip`, inserting or replacing the record with its id.
    fn upsert(&self, trip: &Trip, records: &Records) -> Result<()>;

    /// Persists the removal of the trip with `id`.
    fn remove(&self, id: u64, records: &Records) -> Result<()>;
}

/// Built-in backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Single JSON document on disk
    #[default]
    File,
    /// SQLite database with one document row per trip
    Sqlite,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::File => "file",
            BackendKind::Sqlite => "sqlite",
        }
    }

    /// File name used under the XDG data directory when no path is given.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            BackendKind::File => "trips.json",
            BackendKind::Sqlite => "trips.db",
        }
    }

    /// Instantiates the backend for `path`.
    pub fn open(&self, path: &Path) -> Arc<dyn Backend> {
        match self {
            BackendKind::File => Arc::new(FileBackend::new(path)),
            BackendKind::Sqlite => Arc::new(SqliteBackend::new(path)),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(BackendKind::File),
            "sqlite" | "db" => Ok(BackendKind::Sqlite),
            _ => Err(format!("Invalid backend: {s}")),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
