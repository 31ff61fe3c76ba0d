//! Trip summary types for list views.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::Trip;

/// Compact view of a trip without its plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    /// Trip ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Destination region
    pub region: String,
    /// First day of the trip
    pub start_date: Date,
    /// Number of days
    pub days: u32,
    /// Number of travellers
    pub people: u32,
    /// Items scheduled across all days
    pub total_items: usize,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
}

impl From<&Trip> for TripSummary {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            name: trip.name.clone(),
            region: trip.region.clone(),
            start_date: trip.start_date,
            days: trip.days,
            people: trip.people,
            total_items: trip.item_count(),
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}
