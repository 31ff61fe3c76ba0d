//! Parameter structures for store operations.
//!
//! These types describe what callers send in. They stay lenient on purpose:
//! numeric fields are signed and the start date is text, so that malformed
//! values reach the store's validation and come back as
//! [`StoreError::InvalidInput`] or [`StoreError::InvalidDate`] instead of an
//! opaque deserialization failure.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, StoreError},
    models::{DayDraft, Preferences, Trip},
    plan,
};

fn default_people() -> i64 {
    1
}

fn default_daily_hours() -> i64 {
    8
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the trip to operate on
    pub id: u64,
}

/// Parameters for creating a new trip.
///
/// `id`, `created_at` and `updated_at` are assigned by the store; if a body
/// carries them they are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrip {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    /// ISO `YYYY-MM-DD` start date (required)
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub days: i64,
    #[serde(default, alias = "budget_twd")]
    pub budget: i64,
    #[serde(default = "default_people")]
    pub people: i64,
    #[serde(default = "default_daily_hours")]
    pub daily_hours: i64,
    #[serde(default)]
    pub preferences: Preferences,
    /// Optional initial plan; expanded from the dates when empty
    #[serde(default)]
    pub plan: Vec<DayDraft>,
}

impl Default for CreateTrip {
    fn default() -> Self {
        Self {
            name: String::new(),
            region: String::new(),
            start_date: String::new(),
            days: 0,
            budget: 0,
            people: default_people(),
            daily_hours: default_daily_hours(),
            preferences: Preferences::default(),
            plan: Vec::new(),
        }
    }
}

impl CreateTrip {
    /// Parses a create body. Anything that is not a JSON object is rejected.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|source| StoreError::InvalidBody { source })?;
        if !value.is_object() {
            return Err(StoreError::invalid_input("body").with_reason("expected a JSON object"));
        }
        serde_json::from_value(value).map_err(|source| StoreError::InvalidBody { source })
    }

    /// Validates the draft and turns it into a trip with the given identity.
    ///
    /// When the draft has no plan, one empty day is expanded per trip day.
    /// A supplied plan is reconciled against that same skeleton so its length
    /// and dates always agree with `start_date` and `days`.
    pub fn into_trip(self, id: u64, now: Timestamp) -> Result<Trip> {
        let start_date = plan::parse_start_date(&self.start_date)?;
        let days = plan::validate_days(self.days)?;
        let people = validate_at_least_one("people", self.people)?;
        let daily_hours = validate_at_least_one("daily_hours", self.daily_hours)?;

        let skeleton = plan::expand(start_date, days)?;
        let plan = if self.plan.is_empty() {
            skeleton
        } else {
            plan::reconcile(skeleton, self.plan)
        };

        Ok(Trip {
            id,
            name: self.name,
            region: self.region,
            start_date,
            days,
            budget: self.budget,
            people,
            daily_hours,
            preferences: self.preferences,
            plan,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Validates a count that must be at least one, such as `people`.
pub(crate) fn validate_at_least_one(field: &str, value: i64) -> Result<u32> {
    if value < 1 {
        return Err(StoreError::invalid_input(field).with_reason("must be at least 1"));
    }
    u32::try_from(value)
        .map_err(|_| StoreError::invalid_input(field).with_reason("value is too large"))
}
