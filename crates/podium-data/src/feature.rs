//! Numeric athlete features used in comparisons.

use serde::{Deserialize, Serialize};

use crate::record::AthleteRecord;

/// A numeric athlete attribute used for aggregation and distance scoring.
///
/// `Display`, `FromStr` and the serde representation all round-trip through
/// the dataset column names (`Height`, `BMI`, `Age`, `GDP`, `Weight`), so a
/// JSON request spells features exactly like the CSV headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    Height,
    #[serde(rename = "BMI")]
    Bmi,
    Age,
    #[serde(rename = "GDP")]
    Gdp,
    Weight,
}

/// Error returned when a feature name does not match a dataset column.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown feature '{name}', expected one of Height, BMI, Age, GDP, Weight")]
pub struct ParseFeatureError {
    pub name: String,
}

impl Feature {
    /// All features, in the canonical column order of the dataset.
    pub const ALL: [Feature; 5] = [
        Feature::Height,
        Feature::Bmi,
        Feature::Age,
        Feature::Gdp,
        Feature::Weight,
    ];

    /// The dataset column name for this feature.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Feature::Height => "Height",
            Feature::Bmi => "BMI",
            Feature::Age => "Age",
            Feature::Gdp => "GDP",
            Feature::Weight => "Weight",
        }
    }

    /// Reads this feature's value from a record, `None` when the column is
    /// blank for that row.
    #[must_use]
    pub fn value_of(self, record: &AthleteRecord) -> Option<f64> {
        match self {
            Feature::Height => record.height,
            Feature::Bmi => record.bmi,
            Feature::Age => record.age,
            Feature::Gdp => record.gdp,
            Feature::Weight => record.weight,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

impl std::str::FromStr for Feature {
    type Err = ParseFeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| s.eq_ignore_ascii_case(feature.column_name()))
            .ok_or_else(|| ParseFeatureError { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(feature.column_name().parse::<Feature>().unwrap(), feature);
        }
    }

    #[test]
    fn test_case_insensitive_parse() {
        assert_eq!("bmi".parse::<Feature>().unwrap(), Feature::Bmi);
        assert_eq!("gdp".parse::<Feature>().unwrap(), Feature::Gdp);
    }

    #[test]
    fn test_unknown_feature_is_rejected() {
        assert!("Stamina".parse::<Feature>().is_err());
    }
}
