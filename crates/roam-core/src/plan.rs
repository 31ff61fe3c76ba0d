//! Day expansion and plan reconciliation.
//!
//! A trip's plan is always derived from a *skeleton*: one empty [`Day`] per
//! day of the trip, dated from the start date. Caller-supplied days are then
//! laid onto the skeleton by `day_index`, so the skeleton decides which days
//! exist and what their dates are, while the caller only decides what happens
//! on them.
//!
//! ```rust
//! use roam_core::{models::{DayDraft, Item}, plan};
//!
//! let start = plan::parse_start_date("2024-03-01")?;
//! let skeleton = plan::expand(start, 3)?;
//! let lunch = Item { id: "a".into(), title: "Lunch".into(), ..Default::default() };
//! let days = plan::reconcile(skeleton, vec![DayDraft { day_index: 2, items: vec![lunch] }]);
//!
//! assert!(days[0].items.is_empty());
//! assert_eq!(days[1].items[0].title, "Lunch");
//! assert_eq!(days[2].date.to_string(), "2024-03-03");
//! # Ok::<(), roam_core::StoreError>(())
//! ```

use std::collections::{BTreeMap, HashSet};

use jiff::{Span, civil::Date};

use crate::{
    error::{Result, StoreError},
    models::{Day, DayDraft, Item},
};

/// Parses an ISO `YYYY-MM-DD` calendar date.
pub fn parse_start_date(value: &str) -> Result<Date> {
    value
        .trim()
        .parse::<Date>()
        .map_err(|source| StoreError::InvalidDate {
            value: value.to_string(),
            source,
        })
}

/// Checks a caller-supplied day count.
///
/// Only the sign is checked here; how long a trip may be is bounded by the
/// calendar, which [`expand`] enforces.
pub fn validate_days(days: i64) -> Result<u32> {
    if days < 0 {
        return Err(StoreError::invalid_input("days").with_reason("must not be negative"));
    }
    u32::try_from(days)
        .map_err(|_| StoreError::invalid_input("days").with_reason("exceeds the calendar range"))
}

/// Checks that every day of a `day_count`-day trip from `start_date` falls
/// inside the supported calendar range.
pub fn check_range(start_date: Date, day_count: u32) -> Result<()> {
    if day_count > 0 {
        day_date(start_date, day_count)?;
    }
    Ok(())
}

/// Produces `day_count` empty days starting at `start_date`.
///
/// Day `n` is dated `start_date + (n - 1)` days. Fails only when the last date
/// would fall outside the supported calendar range.
pub fn expand(start_date: Date, day_count: u32) -> Result<Vec<Day>> {
    check_range(start_date, day_count)?;
    (1..=day_count)
        .map(|day_index| {
            Ok(Day {
                day_index,
                date: day_date(start_date, day_index)?,
                items: Vec::new(),
            })
        })
        .collect()
}

fn day_date(start_date: Date, day_index: u32) -> Result<Date> {
    Span::new()
        .try_days(i64::from(day_index) - 1)
        .and_then(|offset| start_date.checked_add(offset))
        .map_err(|e| {
            StoreError::invalid_input("days")
                .with_reason(format!("day {day_index} falls outside the calendar: {e}"))
        })
}

/// Textual form of [`expand`] for raw request values.
pub fn expand_str(start_date: &str, day_count: i64) -> Result<Vec<Day>> {
    expand(parse_start_date(start_date)?, validate_days(day_count)?)
}

/// Lays `incoming` days onto `skeleton` by `day_index`.
///
/// Items of a matching incoming day replace the skeleton day's items; the
/// skeleton's index and date are kept. Incoming days whose index is not in the
/// skeleton are dropped, and when an index repeats the last one wins. Items
/// without an id, or repeating an earlier item's id, get one that is unique
/// within their day.
pub fn reconcile(skeleton: Vec<Day>, incoming: Vec<DayDraft>) -> Vec<Day> {
    let mut by_index: BTreeMap<i64, Vec<Item>> = incoming
        .into_iter()
        .map(|draft| (draft.day_index, draft.items))
        .collect();

    skeleton
        .into_iter()
        .map(|mut day| {
            if let Some(items) = by_index.remove(&i64::from(day.day_index)) {
                day.items = items;
            }
            fill_item_ids(&mut day);
            day
        })
        .collect()
}

/// Rebuilds an existing plan for a new start date or day count, keeping each
/// day's items attached to its index.
pub fn realign(existing: &[Day], start_date: Date, day_count: u32) -> Result<Vec<Day>> {
    let skeleton = expand(start_date, day_count)?;
    let drafts = existing.iter().cloned().map(DayDraft::from).collect();
    Ok(reconcile(skeleton, drafts))
}

/// Gives every item an id unique within its day. The first item keeps a
/// caller id; empty ids and later repeats get a fresh `"{day_index}-{n}"` that
/// collides with no caller id.
fn fill_item_ids(day: &mut Day) {
    let day_index = day.day_index;
    let mut taken: HashSet<String> = day
        .items
        .iter()
        .filter(|item| !item.id.is_empty())
        .map(|item| item.id.clone())
        .collect();
    let mut seen: HashSet<String> = HashSet::with_capacity(day.items.len());
    let mut counter = 0u32;

    for item in &mut day.items {
        if !item.id.is_empty() && seen.insert(item.id.clone()) {
            continue;
        }
        item.id = loop {
            counter += 1;
            let candidate = format!("{day_index}-{counter}");
            if taken.insert(candidate.clone()) {
                break candidate;
            }
        };
        seen.insert(item.id.clone());
    }
}
