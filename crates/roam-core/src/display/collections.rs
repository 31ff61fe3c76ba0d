//! Collection wrapper types for displaying groups of trips.

use std::{fmt, ops::Index};

use crate::models::TripSummary;

/// Newtype wrapper for displaying collections of trip summaries.
///
/// Handles empty collections gracefully.
///
/// # Examples
///
/// ```rust
/// use roam_core::{display::TripSummaries, models::TripSummary, params::CreateTrip};
/// use jiff::Timestamp;
///
/// let trip = CreateTrip {
///     name: "Penghu".to_string(),
///     start_date: "2024-07-01".to_string(),
///     days: 4,
///     ..Default::default()
/// }
/// .into_trip(1, Timestamp::now())?;
///
/// let summaries = TripSummaries(vec![TripSummary::from(&trip)]);
/// assert!(summaries.to_string().contains("Penghu"));
/// # Ok::<(), roam_core::StoreError>(())
/// ```
pub struct TripSummaries(pub Vec<TripSummary>);

impl TripSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of trip summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the trip summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, TripSummary> {
        self.0.iter()
    }
}

impl From<Vec<TripSummary>> for TripSummaries {
    fn from(summaries: Vec<TripSummary>) -> Self {
        Self(summaries)
    }
}

impl Index<usize> for TripSummaries {
    type Output = TripSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a TripSummaries {
    type Item = &'a TripSummary;
    type IntoIter = std::slice::Iter<'a, TripSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TripSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No trips found.")
        } else {
            for trip in &self.0 {
                write!(f, "{trip}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use super::*;

    fn create_test_summary(id: u64, name: &str) -> TripSummary {
        TripSummary {
            id,
            name: name.to_string(),
            region: "Yilan".to_string(),
            start_date: date(2024, 1, 20),
            days: 2,
            people: 3,
            total_items: 4,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn test_trip_summaries_display() {
        let summaries = TripSummaries(vec![
            create_test_summary(1, "Hot springs"),
            create_test_summary(2, "Surf camp"),
        ]);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].name, "Surf camp");

        let output = summaries.to_string();
        assert!(output.contains("## Hot springs (ID: 1)"));
        assert!(output.contains("## Surf camp (ID: 2)"));
        assert!(!output.starts_with("# "));
    }

    #[test]
    fn test_empty_summaries() {
        let empty = TripSummaries(vec![]);
        assert!(empty.is_empty());
        assert_eq!(empty.to_string(), "No trips found.\n");
    }
}
