//! SQLite document backend.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params, types::Type};

use super::{Backend, Records};
use crate::{
    error::{DatabaseResultExt, Result, StoreError},
    models::Trip,
};

const UPSERT_TRIP_SQL: &str = "INSERT INTO trips (id, name, region, start_date, days, document, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, region = excluded.region, \
     start_date = excluded.start_date, days = excluded.days, document = excluded.document, \
     updated_at = excluded.updated_at";
const SELECT_TRIPS_SQL: &str = "SELECT id, document FROM trips ORDER BY id";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";

/// SQLite keys are signed 64-bit.
fn row_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| {
        StoreError::invalid_input("id").with_reason(format!("{id} does not fit a SQLite row id"))
    })
}

/// Database connection and trip queries.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")
    }

    /// Reads every trip document.
    pub fn load_trips(&self) -> Result<Records> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TRIPS_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| {
                let document: String = row.get(1)?;
                serde_json::from_str::<Trip>(&document)
                    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))
            })
            .db_context("Failed to query trips")?;

        let mut records = Records::new();
        for trip in rows {
            let trip = trip.db_context("Failed to read trip row")?;
            records.insert(trip.id, trip);
        }
        Ok(records)
    }

    /// Inserts or replaces one trip in its own transaction.
    pub fn upsert_trip(&mut self, trip: &Trip) -> Result<()> {
        let id = row_id(trip.id)?;
        let document = serde_json::to_string(trip)?;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_TRIP_SQL,
            params![
                id,
                &trip.name,
                &trip.region,
                trip.start_date.to_string(),
                i64::from(trip.days),
                document,
                trip.created_at.to_string(),
                trip.updated_at.to_string(),
            ],
        )
        .db_context("Failed to upsert trip")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Deletes one trip in its own transaction. Deleting a missing row is not
    /// an error.
    pub fn delete_trip(&mut self, id: u64) -> Result<()> {
        let id = row_id(id)?;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_TRIP_SQL, params![id])
            .db_context("Failed to delete trip")?;

        tx.commit().db_context("Failed to commit transaction")
    }
}

/// Stores each trip as a JSON document row, opening a connection per call.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
}

impl SqliteBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn load_all(&self) -> Result<Records> {
        Database::new(&self.path)?.load_trips()
    }

    fn upsert(&self, trip: &Trip, _records: &Records) -> Result<()> {
        Database::new(&self.path)?.upsert_trip(trip)
    }

    fn remove(&self, id: u64, _records: &Records) -> Result<()> {
        Database::new(&self.path)?.delete_trip(id)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use tempfile::TempDir;

    use super::*;
    use crate::params::CreateTrip;

    fn trip(id: u64, name: &str) -> Trip {
        CreateTrip {
            name: name.to_string(),
            region: "Hokkaido".to_string(),
            start_date: "2024-12-20".to_string(),
            days: 3,
            ..Default::default()
        }
        .into_trip(id, Timestamp::now())
        .unwrap()
    }

    fn create_test_backend() -> (SqliteBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = SqliteBackend::new(temp_dir.path().join("trips.db"));
        (backend, temp_dir)
    }

    #[test]
    fn test_empty_database_loads_empty() {
        let (backend, _temp_dir) = create_test_backend();
        assert!(backend.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_inserts_then_replaces() {
        let (backend, _temp_dir) = create_test_backend();
        let mut records = Records::new();

        let original = trip(3, "Sapporo");
        records.insert(3, original.clone());
        backend.upsert(&original, &records).unwrap();

        let mut renamed = original.clone();
        renamed.name = "Otaru".to_string();
        records.insert(3, renamed.clone());
        backend.upsert(&renamed, &records).unwrap();

        let loaded = backend.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[&3], renamed);

        let conn = Connection::open(backend.path()).unwrap();
        let name: String = conn
            .query_row("SELECT name FROM trips WHERE id = 3", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "Otaru");
    }

    #[test]
    fn test_remove_deletes_row() {
        let (backend, _temp_dir) = create_test_backend();
        let mut records = Records::new();
        for id in [1, 2] {
            let t = trip(id, "Trip");
            records.insert(id, t.clone());
            backend.upsert(&t, &records).unwrap();
        }

        records.remove(&1);
        backend.remove(1, &records).unwrap();
        // Removing again is harmless
        backend.remove(1, &records).unwrap();

        let loaded = backend.load_all().unwrap();
        assert_eq!(loaded.keys().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_ids_beyond_row_id_range_are_rejected() {
        let (backend, _temp_dir) = create_test_backend();
        let mut records = Records::new();
        let huge = trip(u64::MAX, "Overflow");
        records.insert(huge.id, huge.clone());

        let err = backend.upsert(&huge, &records).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { ref field, .. } if field == "id"));
        assert!(backend.remove(u64::MAX, &records).is_err());

        let largest = trip(i64::MAX as u64, "Largest");
        backend.upsert(&largest, &records).unwrap();
        let loaded = backend.load_all().unwrap();
        assert_eq!(loaded.keys().copied().collect::<Vec<_>>(), vec![i64::MAX as u64]);
    }

    #[test]
    fn test_corrupt_document_is_a_database_error() {
        let (backend, _temp_dir) = create_test_backend();
        backend.load_all().unwrap();

        let conn = Connection::open(backend.path()).unwrap();
        conn.execute(
            "INSERT INTO trips (id, name, region, start_date, days, document, created_at, updated_at) \
             VALUES (1, 'x', 'y', '2024-01-01', 1, 'not json', '', '')",
            [],
        )
        .unwrap();

        assert!(matches!(
            backend.load_all(),
            Err(StoreError::Database { .. })
        ));
    }
}
