//! Athlete participation records.
//!
//! One [`AthleteRecord`] corresponds to one athlete-event participation row
//! in the source dataset. Records are immutable once loaded; transforms that
//! need to rewrite a column clone the rows first.

use serde::{Deserialize, Serialize};

/// Medal column value meaning "did not win a medal".
pub const NO_MEDAL: &str = "No medal";

/// Athlete sex as recorded in the dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::FromStr,
)]
pub enum Sex {
    M,
    F,
}

/// Sex predicate for table filtering: either the wildcard or one sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SexFilter {
    /// Wildcard: keep every row.
    #[default]
    All,
    /// Keep only rows of the given sex.
    Only(Sex),
}

/// Error returned when a sex filter string is not `all`, `M` or `F`.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown sex code '{code}', expected 'M', 'F' or 'all'")]
pub struct ParseSexFilterError {
    pub code: String,
}

impl std::str::FromStr for SexFilter {
    type Err = ParseSexFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") || s == "*" {
            return Ok(SexFilter::All);
        }
        s.parse::<Sex>().map(SexFilter::Only).map_err(|_| ParseSexFilterError {
            code: s.to_owned(),
        })
    }
}

impl std::fmt::Display for SexFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SexFilter::All => f.write_str("all"),
            SexFilter::Only(sex) => sex.fmt(f),
        }
    }
}

impl SexFilter {
    /// Whether a row of the given sex passes the filter.
    #[must_use]
    pub fn matches(self, sex: Sex) -> bool {
        match self {
            SexFilter::All => true,
            SexFilter::Only(wanted) => sex == wanted,
        }
    }
}

/// One athlete-event participation row.
///
/// Numeric fields are optional because the source dataset leaves them blank
/// for some rows; aggregation excludes a row from a feature's mean when that
/// feature is missing, rather than dropping the whole row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteRecord {
    pub name: String,
    pub team: String,
    /// National Olympic Committee country code.
    pub noc: String,
    pub sex: Sex,
    pub age: Option<f64>,
    /// Height in centimeters.
    pub height: Option<f64>,
    /// Weight in kilograms.
    pub weight: Option<f64>,
    /// Body mass index, precomputed in the polished dataset.
    pub bmi: Option<f64>,
    /// GDP of the athlete's country, attached by the dataset join.
    pub gdp: Option<f64>,
    pub sport: String,
    pub event: String,
    pub year: Option<i32>,
    /// Medal outcome string, `None` when the column was blank.
    pub medal: Option<String>,
}

impl AthleteRecord {
    /// Whether this participation won a medal.
    ///
    /// Derived from the medal column: present and not the "no medal"
    /// sentinel value.
    #[must_use]
    pub fn won_medal(&self) -> bool {
        self.medal.as_deref().is_some_and(|m| m != NO_MEDAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_medal(medal: Option<&str>) -> AthleteRecord {
        AthleteRecord {
            name: "A".to_owned(),
            team: "Team".to_owned(),
            noc: "BRA".to_owned(),
            sex: Sex::M,
            age: Some(25.0),
            height: Some(180.0),
            weight: Some(80.0),
            bmi: Some(24.7),
            gdp: None,
            sport: "Judo".to_owned(),
            event: "Judo Men's Heavyweight".to_owned(),
            year: Some(2016),
            medal: medal.map(str::to_owned),
        }
    }

    #[test]
    fn test_won_medal_derivation() {
        assert!(record_with_medal(Some("Gold")).won_medal());
        assert!(record_with_medal(Some("Bronze")).won_medal());
        assert!(!record_with_medal(Some(NO_MEDAL)).won_medal());
        assert!(!record_with_medal(None).won_medal());
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::M);
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::F);
        assert!("X".parse::<Sex>().is_err());
    }

    #[test]
    fn test_sex_filter_parsing() {
        assert_eq!("all".parse::<SexFilter>().unwrap(), SexFilter::All);
        assert_eq!("M".parse::<SexFilter>().unwrap(), SexFilter::Only(Sex::M));
        assert!("unknown".parse::<SexFilter>().is_err());
    }

    #[test]
    fn test_sex_filter_matching() {
        assert!(SexFilter::All.matches(Sex::F));
        assert!(SexFilter::Only(Sex::F).matches(Sex::F));
        assert!(!SexFilter::Only(Sex::F).matches(Sex::M));
    }
}
