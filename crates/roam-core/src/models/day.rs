//! Day and item models that make up a trip's plan.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// One calendar day of a trip.
///
/// `date` is always `start_date + (day_index - 1)` days and is recomputed by
/// the store whenever the plan is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Day {
    /// 1-based position of the day in the trip
    pub day_index: u32,

    /// Calendar date of the day
    pub date: Date,

    /// Scheduled activities, in the order the traveller intends them
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A single scheduled activity or place.
///
/// Items are opaque to the store: `time` is advisory and never validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Item {
    /// Identifier unique within its day; generated when left empty
    pub id: String,

    /// Start time in `HH:MM` form
    pub time: String,

    /// Planned duration in minutes
    #[serde(alias = "duration_min")]
    pub duration_minutes: u32,

    pub title: String,

    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    pub link: String,

    pub note: String,
}

/// Caller-supplied day used when creating or patching a plan.
///
/// Only `day_index` and `items` are read. Any `date` sent along is ignored
/// because dates are derived from the trip's start date. Indices outside the
/// trip's range are dropped during reconciliation, so the index is signed to
/// let such input deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayDraft {
    pub day_index: i64,

    #[serde(default)]
    pub items: Vec<Item>,
}

impl From<Day> for DayDraft {
    fn from(day: Day) -> Self {
        Self {
            day_index: i64::from(day.day_index),
            items: day.items,
        }
    }
}
