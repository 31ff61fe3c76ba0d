//! Whole-document JSON file backend.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::debug;

use super::{Backend, Records};
use crate::{
    error::{IoResultExt, Result, StoreError},
    models::Trip,
};

/// Stores every trip in one JSON object keyed by id.
///
/// Each commit writes the full record set to a temporary file in the target's
/// directory, syncs it, and renames it over the target. A reader therefore
/// sees either the previous document or the new one, never a torn write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomically(&self, records: &Records) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let directory = self.directory();
        fs::create_dir_all(directory).fs_context(directory)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".trips")
            .suffix(".tmp")
            .tempfile_in(directory)
            .fs_context(directory)?;
        temp.write_all(&bytes).fs_context(temp.path())?;
        temp.as_file().sync_all().fs_context(temp.path())?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::file_system(&self.path, e.error))?;

        sync_directory(directory)?;
        debug!(
            "Wrote {} trips ({} bytes) to {}",
            records.len(),
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(unix)]
fn sync_directory(directory: &Path) -> Result<()> {
    fs::File::open(directory)
        .and_then(|dir| dir.sync_all())
        .fs_context(directory)
}

#[cfg(not(unix))]
fn sync_directory(_directory: &Path) -> Result<()> {
    Ok(())
}

impl Backend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn load_all(&self) -> Result<Records> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Records::new()),
            Err(e) => return Err(StoreError::file_system(&self.path, e)),
        };
        if text.trim().is_empty() {
            return Ok(Records::new());
        }

        let stored: Records = serde_json::from_str(&text)?;
        // The id inside the document is authoritative over the map key.
        Ok(stored
            .into_values()
            .map(|trip: Trip| (trip.id, trip))
            .collect())
    }

    fn upsert(&self, _trip: &Trip, records: &Records) -> Result<()> {
        self.write_atomically(records)
    }

    fn remove(&self, _id: u64, records: &Records) -> Result<()> {
        self.write_atomically(records)
    }
}
