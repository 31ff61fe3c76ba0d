//! Builder for creating and configuring Store instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use tokio::task;

use super::Store;
use crate::{
    error::{IoResultExt, Result, StoreError},
    patch::PlanPolicy,
    storage::{Backend, BackendKind},
};

/// Builder for creating and configuring Store instances.
#[derive(Clone, Default)]
pub struct StoreBuilder {
    data_path: Option<PathBuf>,
    backend: BackendKind,
    plan_policy: PlanPolicy,
    custom_backend: Option<Arc<dyn Backend>>,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom data file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/roam/trips.json` (or `trips.db` for SQLite), which
    /// defaults to `~/.local/share/roam/`.
    pub fn with_data_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.data_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Selects one of the built-in backends. Defaults to the JSON file.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Sets how omitted plans are treated when dates change.
    pub fn with_plan_policy(mut self, policy: PlanPolicy) -> Self {
        self.plan_policy = policy;
        self
    }

    /// Uses an already constructed backend. Takes precedence over
    /// [`with_backend`](Self::with_backend) and the data path.
    pub fn with_custom_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.custom_backend = Some(backend);
        self
    }

    /// Builds the configured store, loading every persisted trip.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::XdgDirectory` if no default path can be resolved
    /// Returns `StoreError::FileSystem` if the data directory cannot be created
    /// Returns a persistence error if the existing data cannot be loaded
    pub async fn build(self) -> Result<Store> {
        let backend = match self.custom_backend {
            Some(backend) => backend,
            None => {
                let path = match self.data_path {
                    Some(path) => path,
                    None => Self::default_data_path(self.backend)?,
                };
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent).fs_context(parent)?;
                    }
                }
                info!("Opening {} store at {}", self.backend, path.display());
                self.backend.open(&path)
            }
        };

        let loader = Arc::clone(&backend);
        let records = task::spawn_blocking(move || loader.load_all()).await??;
        info!(
            "Loaded {} trips from {} backend",
            records.len(),
            backend.name()
        );

        Ok(Store::new(records, backend, self.plan_policy))
    }

    /// Returns the default data path following XDG Base Directory
    /// specification.
    fn default_data_path(backend: BackendKind) -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("roam")
            .place_data_file(backend.default_file_name())
            .map_err(|e| StoreError::XdgDirectory(e.to_string()))
    }
}
