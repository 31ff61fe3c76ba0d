//! Trip model definition.

use jiff::{Span, Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::{Day, Preferences};

/// A stored itinerary record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier, assigned by the store and never changed
    pub id: u64,

    /// Display name of the trip
    pub name: String,

    /// Destination region
    pub region: String,

    /// First calendar day of the trip
    pub start_date: Date,

    /// Number of days the trip lasts
    pub days: u32,

    /// Total budget
    #[serde(alias = "budget_twd")]
    pub budget: i64,

    /// Number of travellers
    pub people: u32,

    /// Hours per day available for activities
    pub daily_hours: u32,

    /// Travel style preferences
    #[serde(default)]
    pub preferences: Preferences,

    /// Day-by-day itinerary, one entry per day in `1..=days`
    #[serde(default)]
    pub plan: Vec<Day>,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Trip {
    /// Last calendar day covered by the trip, if it has any days.
    ///
    /// Derived from `start_date` and `days`, so it stays correct when a kept
    /// plan no longer matches the day count.
    pub fn end_date(&self) -> Option<Date> {
        let offset = i64::from(self.days.checked_sub(1)?);
        self.start_date.checked_add(Span::new().days(offset)).ok()
    }

    /// Total number of items across every day of the plan.
    pub fn item_count(&self) -> usize {
        self.plan.iter().map(|day| day.items.len()).sum()
    }

    /// Looks up a day of the plan by its 1-based index.
    pub fn day(&self, day_index: u32) -> Option<&Day> {
        self.plan.iter().find(|day| day.day_index == day_index)
    }
}
