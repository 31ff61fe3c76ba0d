//! Travel style preferences attached to a trip.

use serde::{Deserialize, Serialize};

/// Tags describing how the travellers like to move, eat and spend time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    /// Overall pace, e.g. `relaxed` or `packed`
    pub pace: String,

    /// Interest types such as `museum` or `food`
    pub types: Vec<String>,

    /// Preferred transport modes
    pub transport: Vec<String>,

    /// Preferred dining modes
    pub dining: Vec<String>,
}

impl Preferences {
    /// Returns true when no preference has been recorded.
    pub fn is_empty(&self) -> bool {
        self.pace.is_empty()
            && self.types.is_empty()
            && self.transport.is_empty()
            && self.dining.is_empty()
    }
}
