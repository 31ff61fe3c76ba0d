//! Display implementations for domain models.
//!
//! Kept apart from the model definitions; every implementation produces
//! markdown.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Day, Item, Preferences, Trip, TripSummary};

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        // Metadata section
        if !self.region.is_empty() {
            writeln!(f, "- Region: {}", self.region)?;
        }
        match self.end_date() {
            Some(end) if self.days > 1 => {
                writeln!(f, "- Dates: {} to {} ({} days)", self.start_date, end, self.days)?;
            }
            _ => writeln!(f, "- Dates: {} ({} days)", self.start_date, self.days)?,
        }
        writeln!(f, "- Budget: {}", self.budget)?;
        writeln!(f, "- People: {}", self.people)?;
        writeln!(f, "- Daily hours: {}", self.daily_hours)?;
        if !self.preferences.is_empty() {
            write!(f, "{}", self.preferences)?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.plan.is_empty() {
            writeln!(f, "\nNo days planned.")?;
        } else {
            writeln!(f, "\n## Plan")?;
            writeln!(f)?;
            for day in &self.plan {
                write!(f, "{day}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.pace.is_empty() {
            writeln!(f, "- Pace: {}", self.pace)?;
        }
        for (label, tags) in [
            ("Interests", &self.types),
            ("Transport", &self.transport),
            ("Dining", &self.dining),
        ] {
            if !tags.is_empty() {
                writeln!(f, "- {label}: {}", tags.join(", "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Day {} ({})", self.day_index, self.date)?;
        writeln!(f)?;

        if self.items.is_empty() {
            writeln!(f, "No items planned.")?;
        } else {
            for item in &self.items {
                write!(f, "{item}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- ")?;
        if !self.time.is_empty() {
            write!(f, "**{}** ", self.time)?;
        }
        write!(f, "{}", self.title)?;
        if self.duration_minutes > 0 {
            write!(f, " ({} min)", self.duration_minutes)?;
        }
        writeln!(f, " `{}`", self.id)?;

        if !self.address.is_empty() {
            writeln!(f, "  - Address: {}", self.address)?;
        }
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            writeln!(f, "  - Location: {lat:.5}, {lng:.5}")?;
        }
        if !self.link.is_empty() {
            writeln!(f, "  - Link: {}", self.link)?;
        }
        if !self.note.is_empty() {
            writeln!(f, "  - Note: {}", self.note)?;
        }
        Ok(())
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        if !self.region.is_empty() {
            writeln!(f, "- **Region**: {}", self.region)?;
        }
        writeln!(
            f,
            "- **Starts**: {} for {} days, {} people",
            self.start_date, self.days, self.people
        )?;
        writeln!(f, "- **Items**: {}", self.total_items)?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)?; // Add blank line after each trip

        Ok(())
    }
}
