//! Data models for trips, days and items.
//!
//! A [`Trip`] embeds its whole itinerary: the `plan` is an ordered list of
//! [`Day`]s and each day holds the [`Item`]s scheduled on it. Nothing outside
//! the trip references days or items, so deleting a trip removes everything.
//!
//! Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use roam_core::models::{Day, Item};
//!
//! let day = Day {
//!     day_index: 1,
//!     date: "2024-03-01".parse().unwrap(),
//!     items: vec![Item {
//!         id: "a".to_string(),
//!         title: "Lunch".to_string(),
//!         ..Default::default()
//!     }],
//! };
//! assert_eq!(day.items.len(), 1);
//! ```

pub mod day;
pub mod preferences;
pub mod summary;
pub mod trip;


pub use day::{Day, DayDraft, Item};
pub use preferences::Preferences;
pub use summary::TripSummary;
pub use trip::Trip;
