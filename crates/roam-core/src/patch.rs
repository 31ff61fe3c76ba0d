//! Presence-based partial updates for trips.
//!
//! A [`TripPatch`] is deserialized from the raw request body. Every field is a
//! [`Field`], which records whether the key was in the body at all: a missing
//! key leaves the stored value alone, while a present key overwrites it, even
//! when the value is empty or `null`.
//!
//! ```rust
//! use roam_core::patch::{Field, TripPatch};
//!
//! let patch = TripPatch::from_json(r#"{"name": "", "unknown": 1}"#)?;
//! assert_eq!(patch.name, Field::Set(String::new()));
//! assert!(patch.region.is_missing());
//! assert_eq!(patch.present_fields(), vec!["name"]);
//! # Ok::<(), roam_core::StoreError>(())
//! ```

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Deserializer};

use crate::{
    error::{Result, StoreError},
    models::{DayDraft, Preferences, Trip},
    params::validate_at_least_one,
    plan,
};

/// A patch value that distinguishes "not sent" from "sent".
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// The key was absent from the patch.
    Missing,
    /// The key was present; `null` arrives as the type's empty value.
    Set(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> Field<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Field::Set(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    /// Maps a present value through a fallible conversion.
    pub fn try_map<U, F>(self, f: F) -> Result<Field<U>>
    where
        F: FnOnce(T) -> Result<U>,
    {
        match self {
            Field::Missing => Ok(Field::Missing),
            Field::Set(value) => f(value).map(Field::Set),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Set(value)
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key exists; absent keys fall back to `Missing`
        // through `#[serde(default)]`.
        Option::<T>::deserialize(deserializer).map(|value| Field::Set(value.unwrap_or_default()))
    }
}

/// What happens to a trip's plan when a patch changes `days` or `start_date`
/// without sending a new `plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanPolicy {
    /// Keep the stored plan exactly as it is.
    #[default]
    Preserve,
    /// Rebuild the plan for the new dates, keeping items on their day index.
    Realign,
}

impl PlanPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanPolicy::Preserve => "preserve",
            PlanPolicy::Realign => "realign",
        }
    }
}

impl FromStr for PlanPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" | "keep" => Ok(PlanPolicy::Preserve),
            "realign" | "reexpand" => Ok(PlanPolicy::Realign),
            _ => Err(format!("Invalid plan policy: {s}")),
        }
    }
}

impl fmt::Display for PlanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial update for a trip. Unrecognized keys in the body are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripPatch {
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub region: Field<String>,
    #[serde(default)]
    pub start_date: Field<String>,
    #[serde(default)]
    pub days: Field<i64>,
    #[serde(default, alias = "budget_twd")]
    pub budget: Field<i64>,
    #[serde(default)]
    pub people: Field<i64>,
    #[serde(default)]
    pub daily_hours: Field<i64>,
    #[serde(default)]
    pub preferences: Field<Preferences>,
    #[serde(default)]
    pub plan: Field<Vec<DayDraft>>,
}

impl TripPatch {
    /// Parses a patch from a raw JSON body, which must be an object.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|source| StoreError::InvalidBody { source })?;
        Self::from_value(value)
    }

    /// Builds a patch from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(StoreError::invalid_input("body").with_reason("expected a JSON object"));
        }
        serde_json::from_value(value).map_err(|source| StoreError::InvalidBody { source })
    }

    /// Names of the fields this patch will overwrite, in declaration order.
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_set()),
            ("region", self.region.is_set()),
            ("start_date", self.start_date.is_set()),
            ("days", self.days.is_set()),
            ("budget", self.budget.is_set()),
            ("people", self.people.is_set()),
            ("daily_hours", self.daily_hours.is_set()),
            ("preferences", self.preferences.is_set()),
            ("plan", self.plan.is_set()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Returns true when the patch would only bump `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

/// Applies `patch` to a copy of `existing` and returns the result.
///
/// All present values are validated before any of them is applied, so on
/// error nothing changes. `updated_at` becomes `now`, clamped so it never
/// moves backwards. A present `plan` is reconciled against the skeleton for
/// the (possibly new) dates; an absent one is handled by `policy`.
pub fn apply_patch(
    existing: &Trip,
    patch: TripPatch,
    now: Timestamp,
    policy: PlanPolicy,
) -> Result<Trip> {
    let start_date = patch
        .start_date
        .try_map(|value| plan::parse_start_date(&value))?;
    let days = patch.days.try_map(plan::validate_days)?;
    let people = patch
        .people
        .try_map(|value| validate_at_least_one("people", value))?;
    let daily_hours = patch
        .daily_hours
        .try_map(|value| validate_at_least_one("daily_hours", value))?;

    let mut trip = existing.clone();

    if let Field::Set(name) = patch.name {
        trip.name = name;
    }
    if let Field::Set(region) = patch.region {
        trip.region = region;
    }
    if let Field::Set(start_date) = start_date {
        trip.start_date = start_date;
    }
    if let Field::Set(days) = days {
        trip.days = days;
    }
    if let Field::Set(budget) = patch.budget {
        trip.budget = budget;
    }
    if let Field::Set(people) = people {
        trip.people = people;
    }
    if let Field::Set(daily_hours) = daily_hours {
        trip.daily_hours = daily_hours;
    }
    if let Field::Set(preferences) = patch.preferences {
        trip.preferences = preferences;
    }

    let schedule_changed =
        trip.start_date != existing.start_date || trip.days != existing.days;

    match patch.plan {
        Field::Set(incoming) => {
            let skeleton = plan::expand(trip.start_date, trip.days)?;
            trip.plan = plan::reconcile(skeleton, incoming);
        }
        Field::Missing if schedule_changed && policy == PlanPolicy::Realign => {
            trip.plan = plan::realign(&existing.plan, trip.start_date, trip.days)?;
        }
        Field::Missing if schedule_changed => {
            plan::check_range(trip.start_date, trip.days)?;
        }
        Field::Missing => {}
    }

    trip.updated_at = now.max(existing.updated_at).max(existing.created_at);

    Ok(trip)
}

#[cfg(test)]
mod tests {
    use jiff::{ToSpan, civil::date};
    use serde_json::json;

    use super::*;
    use crate::params::CreateTrip;

    fn base_trip() -> Trip {
        CreateTrip {
            name: "Tokyo".to_string(),
            region: "Kanto".to_string(),
            start_date: "2024-03-01".to_string(),
            days: 3,
            budget: 90000,
            people: 2,
            daily_hours: 9,
            preferences: Preferences {
                pace: "packed".to_string(),
                types: vec!["museum".to_string()],
                ..Default::default()
            },
            plan: vec![DayDraft {
                day_index: 1,
                items: vec![crate::models::Item {
                    id: "a".to_string(),
                    title: "Tsukiji".to_string(),
                    ..Default::default()
                }],
            }],
        }
        .into_trip(1, Timestamp::from_second(1_700_000_000).unwrap())
        .unwrap()
    }

    fn patch(value: serde_json::Value) -> TripPatch {
        TripPatch::from_value(value).unwrap()
    }

    fn later(trip: &Trip) -> Timestamp {
        trip.updated_at + 1.hour()
    }

    #[test]
    fn test_absent_vs_null_vs_value() {
        let p = patch(json!({"name": null, "region": "Tohoku", "preferences": null}));
        assert_eq!(p.name, Field::Set(String::new()));
        assert_eq!(p.region, Field::Set("Tohoku".to_string()));
        assert_eq!(p.preferences, Field::Set(Preferences::default()));
        assert!(p.days.is_missing());
        assert!(p.plan.is_missing());
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(matches!(
            TripPatch::from_value(json!([{"name": "x"}])),
            Err(StoreError::InvalidInput { .. })
        ));
        assert!(matches!(
            TripPatch::from_json(r#"{"days": "many"}"#),
            Err(StoreError::InvalidBody { .. })
        ));
    }

    #[test]
    fn test_budget_accepts_legacy_key() {
        let p = patch(json!({"budget_twd": 500}));
        assert_eq!(p.budget, Field::Set(500));
        assert_eq!(p.present_fields(), vec!["budget"]);
    }

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let trip = base_trip();
        let now = later(&trip);
        let updated = apply_patch(
            &trip,
            patch(json!({"name": "Tokyo again", "budget": 0, "bogus": 1})),
            now,
            PlanPolicy::Preserve,
        )
        .unwrap();

        assert_eq!(updated.name, "Tokyo again");
        assert_eq!(updated.budget, 0);
        assert_eq!(updated.region, trip.region);
        assert_eq!(updated.start_date, trip.start_date);
        assert_eq!(updated.days, trip.days);
        assert_eq!(updated.people, trip.people);
        assert_eq!(updated.daily_hours, trip.daily_hours);
        assert_eq!(updated.preferences, trip.preferences);
        assert_eq!(updated.plan, trip.plan);
        assert_eq!(updated.id, trip.id);
        assert_eq!(updated.created_at, trip.created_at);
        assert_eq!(updated.updated_at, now);
    }

    #[test]
    fn test_empty_patch_only_bumps_timestamp() {
        let trip = base_trip();
        let p = TripPatch::default();
        assert!(p.is_empty());

        let updated = apply_patch(&trip, p, later(&trip), PlanPolicy::Preserve).unwrap();
        let mut expected = trip.clone();
        expected.updated_at = updated.updated_at;
        assert_eq!(updated, expected);
        assert!(updated.updated_at > trip.updated_at);
    }

    #[test]
    fn test_updated_at_never_moves_backwards() {
        let trip = base_trip();
        let earlier = trip.updated_at - 5.minutes();
        let updated =
            apply_patch(&trip, TripPatch::default(), earlier, PlanPolicy::Preserve).unwrap();
        assert_eq!(updated.updated_at, trip.updated_at);
    }

    #[test]
    fn test_patch_is_idempotent() {
        let trip = base_trip();
        let body = json!({
            "region": "Kyushu",
            "days": 2,
            "plan": [{"day_index": 2, "items": [{"id": "b", "title": "Ramen"}]}]
        });

        let once = apply_patch(&trip, patch(body.clone()), later(&trip), PlanPolicy::Preserve)
            .unwrap();
        let twice =
            apply_patch(&once, patch(body), later(&once), PlanPolicy::Preserve).unwrap();

        let mut once_cmp = once.clone();
        once_cmp.updated_at = twice.updated_at;
        assert_eq!(once_cmp, twice);
    }

    #[test]
    fn test_plan_patch_reconciles_against_current_dates() {
        let trip = base_trip();
        let updated = apply_patch(
            &trip,
            patch(json!({
                "plan": [{"day_index": 2, "date": "1990-01-01", "items": [{"id": "a", "title": "Lunch"}]}]
            })),
            later(&trip),
            PlanPolicy::Preserve,
        )
        .unwrap();

        assert_eq!(updated.plan.len(), 3);
        assert!(updated.plan[0].items.is_empty());
        assert_eq!(updated.plan[1].items[0].title, "Lunch");
        assert_eq!(updated.plan[1].date, date(2024, 3, 2));
        assert!(updated.plan[2].items.is_empty());
        assert_eq!(updated.days, 3);
        assert_eq!(updated.start_date, trip.start_date);
    }

    #[test]
    fn test_plan_patch_uses_new_dates_in_same_patch() {
        let trip = base_trip();
        let updated = apply_patch(
            &trip,
            patch(json!({
                "start_date": "2024-04-10",
                "days": 2,
                "plan": [{"day_index": 1, "items": [{"title": "Arrive"}]}, {"day_index": 3}]
            })),
            later(&trip),
            PlanPolicy::Preserve,
        )
        .unwrap();

        assert_eq!(updated.plan.len(), 2);
        assert_eq!(updated.plan[0].date, date(2024, 4, 10));
        assert_eq!(updated.plan[1].date, date(2024, 4, 11));
        assert_eq!(updated.plan[0].items[0].id, "1-1");
    }

    #[test]
    fn test_preserve_policy_keeps_plan_when_days_change() {
        let trip = base_trip();
        let updated = apply_patch(
            &trip,
            patch(json!({"days": 5})),
            later(&trip),
            PlanPolicy::Preserve,
        )
        .unwrap();
        assert_eq!(updated.days, 5);
        assert_eq!(updated.plan, trip.plan);
    }

    #[test]
    fn test_realign_policy_rebuilds_plan_when_days_change() {
        let trip = base_trip();
        let updated = apply_patch(
            &trip,
            patch(json!({"days": 5, "start_date": "2024-03-02"})),
            later(&trip),
            PlanPolicy::Realign,
        )
        .unwrap();

        assert_eq!(updated.plan.len(), 5);
        assert_eq!(updated.plan[0].date, date(2024, 3, 2));
        assert_eq!(updated.plan[0].items[0].title, "Tsukiji");
        assert_eq!(updated.plan[4].date, date(2024, 3, 6));

        // Unrelated edits leave the plan untouched even under realign
        let renamed = apply_patch(
            &trip,
            patch(json!({"name": "Renamed"})),
            later(&trip),
            PlanPolicy::Realign,
        )
        .unwrap();
        assert_eq!(renamed.plan, trip.plan);
    }

    #[test]
    fn test_invalid_values_leave_trip_untouched() {
        let trip = base_trip();
        for body in [
            json!({"name": "ok", "start_date": "2024-02-31"}),
            json!({"name": "ok", "days": -2}),
            json!({"name": "ok", "people": 0}),
            json!({"name": "ok", "daily_hours": 0}),
        ] {
            let err = apply_patch(&trip, patch(body), later(&trip), PlanPolicy::Preserve)
                .unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
        }
    }

    #[test]
    fn test_plan_policy_parsing() {
        assert_eq!("preserve".parse::<PlanPolicy>().unwrap(), PlanPolicy::Preserve);
        assert_eq!("REALIGN".parse::<PlanPolicy>().unwrap(), PlanPolicy::Realign);
        assert!("sometimes".parse::<PlanPolicy>().is_err());
        assert_eq!(PlanPolicy::default(), PlanPolicy::Preserve);
        assert_eq!(PlanPolicy::Realign.to_string(), "realign");
    }
}
