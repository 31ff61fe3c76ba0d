use std::path::{Path, PathBuf};

use roam_core::{BackendKind, CreateTrip, PlanPolicy, Store, StoreBuilder};
use tempfile::TempDir;

/// Helper function to create a temporary directory and data path
pub fn create_test_environment(backend: BackendKind) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join(backend.default_file_name());
    (temp_dir, path)
}

/// Helper function to open a store on disk
pub async fn open_store(path: &Path, backend: BackendKind) -> Store {
    open_store_with_policy(path, backend, PlanPolicy::Preserve).await
}

pub async fn open_store_with_policy(path: &Path, backend: BackendKind, policy: PlanPolicy) -> Store {
    StoreBuilder::new()
        .with_data_path(Some(path))
        .with_backend(backend)
        .with_plan_policy(policy)
        .build()
        .await
        .expect("Failed to open store")
}

pub fn trip_params(name: &str, start_date: &str, days: i64) -> CreateTrip {
    CreateTrip {
        name: name.to_string(),
        region: "Taiwan".to_string(),
        start_date: start_date.to_string(),
        days,
        budget: 20000,
        ..Default::default()
    }
}
