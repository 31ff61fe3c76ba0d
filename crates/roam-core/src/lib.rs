//! Core library for the Roam itinerary store.
//!
//! This crate owns trip records end to end: the data model, day expansion and
//! plan reconciliation, presence-based partial updates, the concurrency-safe
//! [`Store`], and its persistence backends.
//!
//! # Layers
//!
//! - **Models** ([`models`]): `Trip`, `Day`, `Item` and friends
//! - **Plan** ([`plan`]): pure day expansion and reconciliation
//! - **Patch** ([`patch`]): `TripPatch` and the merge rules
//! - **Store** ([`store`]): the shared record set behind an async RW lock
//! - **Storage** ([`storage`]): JSON file, SQLite and in-memory backends
//! - **Display** ([`display`]): markdown formatting for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use roam_core::{BackendKind, StoreBuilder, params::CreateTrip};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new()
//!     .with_data_path(Some("trips.json"))
//!     .with_backend(BackendKind::File)
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
//! println!("Created trip: {}", trip);
//!
//! let trip = store
//!     .update_json(trip.id, r#"{"plan": [{"day_index": 2, "items": [{"title": "Lunch"}]}]}"#)
//!     .await?;
//! assert_eq!(trip.plan[1].items[0].title, "Lunch");
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod patch;
pub mod plan;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use display::{CreateResult, DeleteResult, TripSummaries, UpdateResult};
pub use error::{ErrorKind, Result, StoreError};
pub use models::{Day, DayDraft, Item, Preferences, Trip, TripSummary};
pub use params::{CreateTrip, Id};
pub use patch::{Field, PlanPolicy, TripPatch};
pub use storage::{Backend, BackendKind};
pub use store::{Store, StoreBuilder};
