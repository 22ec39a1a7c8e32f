//! Aggregation level: the categorical key groups are formed on.

use podium_data::AthleteRecord;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// The categorical column used as the unit of aggregation.
///
/// `FromStr` accepts the column name case-insensitively, with or without a
/// plural `s` (`Sport`, `sport`, `sports`, ...). Anything else is an
/// [`AnalysisError::InvalidParameter`]; an unknown level must never turn
/// into a silent empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationLevel {
    Sport,
    Event,
}

impl AggregationLevel {
    /// The dataset column name (`Sport` or `Event`), also used as the group
    /// key field in output records.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            AggregationLevel::Sport => "Sport",
            AggregationLevel::Event => "Event",
        }
    }

    /// The group key of a record at this level.
    #[must_use]
    pub fn key_of(self, record: &AthleteRecord) -> &str {
        match self {
            AggregationLevel::Sport => &record.sport,
            AggregationLevel::Event => &record.event,
        }
    }
}

impl std::fmt::Display for AggregationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

impl std::str::FromStr for AggregationLevel {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.strip_suffix('s').unwrap_or(&normalized) {
            "sport" => Ok(AggregationLevel::Sport),
            "event" => Ok(AggregationLevel::Event),
            _ => Err(AnalysisError::invalid(format!(
                "unknown aggregation level '{s}', expected 'Sport' or 'Event'"
            ))),
        }
    }
}
