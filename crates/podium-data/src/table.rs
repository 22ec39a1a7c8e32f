//! The athlete table: the read-only base snapshot every analysis reads from.
//!
//! `load` parses the polished athlete CSV once per session. The table is
//! never mutated afterwards; filters and transforms return new tables so
//! concurrent analysis calls can never observe partially-transformed state.

use std::path::Path;

use crate::record::{AthleteRecord, Sex, SexFilter};

/// Error raised when the backing dataset is missing or malformed.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    /// The backing resource could not be read at all.
    #[display("dataset unavailable at {path}: {source}")]
    Unavailable { path: String, source: csv::Error },
    /// The resource exists but lacks a column the pipeline needs.
    #[display("dataset at {path} is malformed: missing required column '{column}'")]
    MissingColumn { path: String, column: &'static str },
}

/// Immutable table of athlete participation rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthleteTable {
    rows: Vec<AthleteRecord>,
}

impl AthleteTable {
    /// Wraps already-built records into a table.
    #[must_use]
    pub fn from_records(rows: Vec<AthleteRecord>) -> Self {
        Self { rows }
    }

    /// Loads the athlete table from a CSV file with headers.
    ///
    /// Numeric columns with blank or `NA` cells become `None` on the record;
    /// rows whose sex code is unreadable are skipped. A missing file or a
    /// missing required column fails the whole load.
    pub fn load<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path_display = path.as_ref().display().to_string();
        let unavailable = |source| LoadError::Unavailable {
            path: path_display.clone(),
            source,
        };

        let mut reader = csv::Reader::from_path(path.as_ref()).map_err(&unavailable)?;
        let headers = reader.headers().map_err(&unavailable)?.clone();
        let column = |name: &'static str| -> Result<usize, LoadError> {
            headers.iter().position(|h| h == name).ok_or(LoadError::MissingColumn {
                path: path_display.clone(),
                column: name,
            })
        };

        let sex_idx = column("Sex")?;
        let age_idx = column("Age")?;
        let height_idx = column("Height")?;
        let weight_idx = column("Weight")?;
        let bmi_idx = column("BMI")?;
        let sport_idx = column("Sport")?;
        let event_idx = column("Event")?;
        let year_idx = column("Year")?;
        let noc_idx = column("NOC")?;
        let medal_idx = column("Medal")?;
        // Identity columns are informative only and may be absent.
        let name_idx = headers.iter().position(|h| h == "Name");
        let team_idx = headers.iter().position(|h| h == "Team");
        let gdp_idx = headers.iter().position(|h| h == "GDP");

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(&unavailable)?;
            let cell = |idx: usize| record.get(idx).unwrap_or("").trim();
            let opt_cell = |idx: Option<usize>| idx.map_or("", &cell);

            let Ok(sex) = cell(sex_idx).parse::<Sex>() else {
                continue;
            };
            rows.push(AthleteRecord {
                name: opt_cell(name_idx).to_owned(),
                team: opt_cell(team_idx).to_owned(),
                noc: cell(noc_idx).to_owned(),
                sex,
                age: parse_numeric(cell(age_idx)),
                height: parse_numeric(cell(height_idx)),
                weight: parse_numeric(cell(weight_idx)),
                bmi: parse_numeric(cell(bmi_idx)),
                gdp: gdp_idx.and_then(|idx| parse_numeric(cell(idx))),
                sport: cell(sport_idx).to_owned(),
                event: cell(event_idx).to_owned(),
                year: parse_year(cell(year_idx)),
                medal: match cell(medal_idx) {
                    "" | "NA" => None,
                    medal => Some(medal.to_owned()),
                },
            });
        }
        Ok(Self { rows })
    }

    /// Borrowed view of all rows.
    #[must_use]
    pub fn rows(&self) -> &[AthleteRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a new table containing the rows matching the sex filter.
    ///
    /// The wildcard filter is the identity transform (modulo the copy).
    #[must_use]
    pub fn filter_by_sex(&self, filter: SexFilter) -> AthleteTable {
        let rows = self
            .rows
            .iter()
            .filter(|row| filter.matches(row.sex))
            .cloned()
            .collect();
        Self { rows }
    }
}

/// Parses a numeric cell, treating blank and `NA` as missing.
fn parse_numeric(cell: &str) -> Option<f64> {
    if cell.is_empty() || cell == "NA" {
        return None;
    }
    cell.parse().ok()
}

/// Parses a year cell, accepting both integer and float renderings.
#[expect(clippy::cast_possible_truncation)]
fn parse_year(cell: &str) -> Option<i32> {
    if cell.is_empty() || cell == "NA" {
        return None;
    }
    cell.parse::<i32>()
        .ok()
        .or_else(|| cell.parse::<f64>().ok().map(|year| year as i32))
}
