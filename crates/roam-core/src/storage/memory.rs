//! Volatile backend for tests and embedding.

use std::{
    io,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use super::{Backend, Records};
use crate::{
    error::{Result, StoreError},
    models::Trip,
};

/// Keeps the committed record set in memory.
///
/// Commits can be made to fail on demand with [`set_fail_commits`], which is
/// how the store's rollback behaviour is exercised.
///
/// [`set_fail_commits`]: MemoryBackend::set_fail_commits
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<Records>,
    fail_commits: AtomicBool,
    commits: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `records` already committed.
    pub fn with_records(records: Records) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Makes every following commit fail until switched off again.
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Number of successful commits so far.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Copy of what is currently committed.
    pub fn snapshot(&self) -> Records {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn commit(&self, records: &Records) -> Result<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::file_system(
                "<memory>",
                io::Error::other("injected commit failure"),
            ));
        }
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records.clone();
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load_all(&self) -> Result<Records> {
        Ok(self.snapshot())
    }

    fn upsert(&self, _trip: &Trip, records: &Records) -> Result<()> {
        self.commit(records)
    }

    fn remove(&self, _id: u64, records: &Records) -> Result<()> {
        self.commit(records)
    }
}
