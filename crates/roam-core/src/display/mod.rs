//! Display formatting for trips and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and for the outcome of
//! create, update and delete operations. Everything renders as markdown so the
//! CLI can pass it straight to its terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │  (Trip, Day)    │───▶│ Result Types    │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (TripSummaries)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use roam_core::{display::CreateResult, params::CreateTrip};
//! use jiff::Timestamp;
//!
//! let trip = CreateTrip {
//!     name: "Hualien".to_string(),
//!     start_date: "2024-06-01".to_string(),
//!     days: 2,
//!     ..Default::default()
//! }
//! .into_trip(1, Timestamp::now())?;
//!
//! let output = CreateResult::new(trip).to_string();
//! assert!(output.contains("Created trip with ID: 1"));
//! assert!(output.contains("### Day 2 (2024-06-02)"));
//! # Ok::<(), roam_core::StoreError>(())
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

// Re-export commonly used types for convenience
pub use collections::TripSummaries;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
