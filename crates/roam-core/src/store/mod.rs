//! The itinerary store: the shared, concurrency-safe trip repository.
//!
//! A [`Store`] owns the full record set in memory behind an async
//! read/write lock and commits every change through a
//! [`Backend`](crate::storage::Backend) before making it visible.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Callers     │    │      Store      │    │     Backend     │
//! │  (CLI, HTTP,    │───▶│ (patch, plan,   │───▶│ (file, sqlite,  │
//! │   tests)        │    │  RwLock)        │    │  memory)        │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Readers share the lock. A writer holds it exclusively for the whole
//! read-modify-persist sequence: the new record set is computed on a copy,
//! committed on the blocking pool, and only swapped in once the commit
//! succeeded. A failed commit leaves the store exactly as it was, and since
//! the lock guard moves into the blocking task, dropping the caller's future
//! mid-commit cannot leave memory and disk disagreeing either.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use roam_core::{StoreBuilder, params::CreateTrip, patch::TripPatch, storage::MemoryBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new()
//!     .with_custom_backend(Arc::new(MemoryBackend::new()))
//!     .build()
//!     .await?;
//!
//! let trip = store
//!     .create(CreateTrip {
//!         name: "Kyoto".to_string(),
//!         start_date: "2024-03-01".to_string(),
//!         days: 3,
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let patch = TripPatch::from_json(r#"{"region": "Kansai"}"#)?;
//! let updated = store.update(trip.id, patch).await?;
//! assert_eq!(updated.region, "Kansai");
//! assert_eq!(updated.plan.len(), 3);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use jiff::Timestamp;
use log::{debug, warn};
use tokio::{sync::RwLock, task};

use crate::{
    error::{Result, StoreError},
    models::{Trip, TripSummary},
    params::CreateTrip,
    patch::{PlanPolicy, TripPatch, apply_patch},
    storage::{Backend, Records},
};

pub mod builder;


pub use builder::StoreBuilder;

/// In-memory view of the committed record set.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) records: Records,
    /// `None` once the id space is used up.
    pub(crate) next_id: Option<u64>,
}

impl State {
    pub(crate) fn new(records: Records) -> Self {
        let next_id = match records.keys().next_back() {
            Some(id) => id.checked_add(1),
            None => Some(1),
        };
        Self { records, next_id }
    }

    fn claim_id(&self) -> Result<u64> {
        self.next_id
            .ok_or_else(|| StoreError::invalid_input("id").with_reason("no trip ids left"))
    }
}

/// A single change to commit.
enum Change {
    Upsert(Trip),
    Remove(u64),
}

/// Shared trip repository. Clone the surrounding `Arc` to share it.
pub struct Store {
    state: Arc<RwLock<State>>,
    backend: Arc<dyn Backend>,
    policy: PlanPolicy,
}

impl Store {
    pub(crate) fn new(records: Records, backend: Arc<dyn Backend>, policy: PlanPolicy) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::new(records))),
            backend,
            policy,
        }
    }

    /// The policy applied to omitted plans on schedule changes.
    pub fn plan_policy(&self) -> PlanPolicy {
        self.policy
    }

    /// Name of the persistence backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Validates `params`, assigns the next id and persists the new trip.
    pub async fn create(&self, params: CreateTrip) -> Result<Trip> {
        self.commit(move |state, now| {
            let trip = params.into_trip(state.claim_id()?, now)?;
            Ok((Change::Upsert(trip.clone()), trip))
        })
        .await
        .inspect(|trip| debug!("Created trip {} ({} days)", trip.id, trip.days))
    }

    /// Like [`create`](Self::create), from a raw JSON body.
    pub async fn create_json(&self, body: &str) -> Result<Trip> {
        self.create(CreateTrip::from_json(body)?).await
    }

    /// Returns the trip with `id`.
    pub async fn get(&self, id: u64) -> Result<Trip> {
        let state = self.state.read().await;
        state
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::TripNotFound { id })
    }

    /// Returns every trip, ordered by id.
    pub async fn list(&self) -> Vec<Trip> {
        let state = self.state.read().await;
        state.records.values().cloned().collect()
    }

    /// Returns a summary of every trip, ordered by id.
    pub async fn list_summaries(&self) -> Vec<TripSummary> {
        let state = self.state.read().await;
        state.records.values().map(TripSummary::from).collect()
    }

    /// Number of stored trips.
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.records.is_empty()
    }

    /// Applies a presence-based patch to the trip with `id` and persists it.
    pub async fn update(&self, id: u64, patch: TripPatch) -> Result<Trip> {
        let policy = self.policy;
        let fields = patch.present_fields();
        self.commit(move |state, now| {
            let existing = state
                .records
                .get(&id)
                .ok_or(StoreError::TripNotFound { id })?;
            let trip = apply_patch(existing, patch, now, policy)?;
            Ok((Change::Upsert(trip.clone()), trip))
        })
        .await
        .inspect(|trip| debug!("Updated trip {} fields {:?}", trip.id, fields))
    }

    /// Like [`update`](Self::update), from a raw JSON body.
    pub async fn update_json(&self, id: u64, body: &str) -> Result<Trip> {
        self.update(id, TripPatch::from_json(body)?).await
    }

    /// Removes the trip with `id` and persists the removal.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.commit(move |state, _| {
            if !state.records.contains_key(&id) {
                return Err(StoreError::TripNotFound { id });
            }
            Ok((Change::Remove(id), ()))
        })
        .await
        .inspect(|_| debug!("Deleted trip {id}"))
    }

    /// Runs `action` under the write lock, commits the change it yields and
    /// publishes the new record set only if the commit succeeded.
    async fn commit<T, F>(&self, action: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&State, Timestamp) -> Result<(Change, T)> + Send + 'static,
    {
        let mut state = Arc::clone(&self.state).write_owned().await;
        let backend = Arc::clone(&self.backend);

        task::spawn_blocking(move || {
            let (change, output) = action(&state, Timestamp::now())?;

            let mut records = state.records.clone();
            let committed = match &change {
                Change::Upsert(trip) => {
                    records.insert(trip.id, trip.clone());
                    backend.upsert(trip, &records)
                }
                Change::Remove(id) => {
                    records.remove(id);
                    backend.remove(*id, &records)
                }
            };
            if let Err(e) = committed {
                warn!("Commit to {} backend failed: {e}", backend.name());
                return Err(e);
            }

            if let Change::Upsert(trip) = &change {
                if state.next_id == Some(trip.id) {
                    state.next_id = trip.id.checked_add(1);
                }
            }
            state.records = records;
            Ok(output)
        })
        .await?
    }
}
