//! Per-year trend lines of a dataset column, split by sport or event.
//!
//! Output rows use the `{date, lines}` shape the original line charts
//! consume: one record per Olympic year, with one entry per category that
//! has data that year.

use std::collections::BTreeMap;

use podium_data::{AthleteRecord, AthleteTable, Feature, SexFilter};
use serde::Serialize;

use crate::{error::AnalysisError, level::AggregationLevel};

/// A value on a trend line: a mean for numeric columns, the most frequent
/// value for categorical ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrendValue {
    Number(f64),
    Text(String),
}

/// One year of the trend: `lines` maps each category (sport or event name)
/// to its aggregated value that year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub lines: BTreeMap<String, TrendValue>,
}

/// How a column is aggregated within a (year, category) cell.
enum ColumnKind {
    Numeric(Feature),
    Categorical(fn(&AthleteRecord) -> Option<String>),
}

fn column_kind(column: &str) -> Result<ColumnKind, AnalysisError> {
    if let Ok(feature) = column.parse::<Feature>() {
        return Ok(ColumnKind::Numeric(feature));
    }
    let accessor: Option<fn(&AthleteRecord) -> Option<String>> = match column {
        "Medal" => Some(|r| r.medal.clone()),
        "Team" => Some(|r| Some(r.team.clone())),
        "NOC" => Some(|r| Some(r.noc.clone())),
        "Sex" => Some(|r| Some(r.sex.to_string())),
        "Name" => Some(|r| Some(r.name.clone())),
        _ => None,
    };
    accessor.map(ColumnKind::Categorical).ok_or_else(|| {
        AnalysisError::invalid(format!("unknown dataset column '{column}'"))
    })
}

/// Most frequent value; the first value to reach the winning count takes
/// ties, so the result is stable for a fixed row order.
fn mode(values: &[String]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    // `counts` is in first-encounter order; only a strictly greater count
    // may displace the current winner.
    let mut winner: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if winner.is_none_or(|(_, best)| count > best) {
            winner = Some((value, count));
        }
    }
    winner.map(|(value, _)| value.to_owned())
}

/// Aggregates one column per year and category.
///
/// An empty `categories` list means every distinct value of the level's
/// column. Rows missing the year or the column value are dropped; a year
/// only appears when at least one category has data.
///
/// # Errors
///
/// * [`AnalysisError::InvalidParameter`] - unknown column name
/// * [`AnalysisError::EmptyResult`] - nothing left after filtering
#[expect(clippy::cast_precision_loss)]
pub fn aggregate_over_time(
    table: &AthleteTable,
    level: AggregationLevel,
    column: &str,
    categories: &[String],
    sex: SexFilter,
) -> Result<Vec<TrendPoint>, AnalysisError> {
    let kind = column_kind(column)?;
    let filtered = table.filter_by_sex(sex);

    let wanted = |category: &str| {
        categories.is_empty() || categories.iter().any(|c| c == category)
    };

    // year -> category -> raw cell values, all ordered for stable output.
    let mut numeric_cells: BTreeMap<i32, BTreeMap<String, Vec<f64>>> = BTreeMap::new();
    let mut text_cells: BTreeMap<i32, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    for record in filtered.rows() {
        let Some(year) = record.year else {
            continue;
        };
        let category = level.key_of(record);
        if !wanted(category) {
            continue;
        }
        match &kind {
            ColumnKind::Numeric(feature) => {
                if let Some(value) = feature.value_of(record) {
                    numeric_cells
                        .entry(year)
                        .or_default()
                        .entry(category.to_owned())
                        .or_default()
                        .push(value);
                }
            }
            ColumnKind::Categorical(accessor) => {
                if let Some(value) = accessor(record) {
                    text_cells
                        .entry(year)
                        .or_default()
                        .entry(category.to_owned())
                        .or_default()
                        .push(value);
                }
            }
        }
    }

    let mut points: Vec<TrendPoint> = Vec::new();
    match kind {
        ColumnKind::Numeric(_) => {
            for (year, cells) in numeric_cells {
                let lines = cells
                    .into_iter()
                    .map(|(category, values)| {
                        let mean = values.iter().sum::<f64>() / values.len() as f64;
                        (category, TrendValue::Number(mean))
                    })
                    .collect();
                points.push(TrendPoint {
                    date: year.to_string(),
                    lines,
                });
            }
        }
        ColumnKind::Categorical(_) => {
            for (year, cells) in text_cells {
                let lines = cells
                    .into_iter()
                    .filter_map(|(category, values)| {
                        mode(&values).map(|value| (category, TrendValue::Text(value)))
                    })
                    .collect();
                points.push(TrendPoint {
                    date: year.to_string(),
                    lines,
                });
            }
        }
    }

    if points.is_empty() {
        return Err(AnalysisError::empty(format!(
            "no rows with a year and a '{column}' value matched the request"
        )));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use podium_data::Sex;

    use super::*;

    fn record(
        sport: &str,
        year: Option<i32>,
        height: Option<f64>,
        medal: Option<&str>,
    ) -> AthleteRecord {
        AthleteRecord {
            name: "A".to_owned(),
            team: "Slovenia".to_owned(),
            noc: "SLO".to_owned(),
            sex: Sex::M,
            age: None,
            height,
            weight: None,
            bmi: None,
            gdp: None,
            sport: sport.to_owned(),
            event: format!("{sport} Men's Singles"),
            year,
            medal: medal.map(str::to_owned),
        }
    }

    #[test]
    fn test_two_year_numeric_trend() {
        let table = AthleteTable::from_records(vec![
            record("Judo", Some(2012), Some(170.0), None),
            record("Judo", Some(2012), Some(180.0), None),
            record("Rowing", Some(2012), Some(190.0), None),
            record("Judo", Some(2016), Some(176.0), None),
            // Dropped: no year / no height.
            record("Judo", None, Some(199.0), None),
            record("Rowing", Some(2016), None, None),
        ]);
        let points = aggregate_over_time(
            &table,
            AggregationLevel::Sport,
            "Height",
            &[],
            SexFilter::All,
        )
        .unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "2012");
        assert_eq!(
            points[0].lines,
            BTreeMap::from([
                ("Judo".to_owned(), TrendValue::Number(175.0)),
                ("Rowing".to_owned(), TrendValue::Number(190.0)),
            ])
        );
        // Rowing has no usable height in 2016, so its line skips the year.
        assert_eq!(points[1].date, "2016");
        assert_eq!(
            points[1].lines,
            BTreeMap::from([("Judo".to_owned(), TrendValue::Number(176.0))])
        );
    }

    #[test]
    fn test_mode_prefers_first_encountered_on_ties() {
        let values: Vec<String> = ["a", "b", "b", "a"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(mode(&values), Some("a".to_owned()));

        let values: Vec<String> = ["a", "b", "b"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(mode(&values), Some("b".to_owned()));

        assert_eq!(mode(&[]), None);
    }

    #[test]
    fn test_categorical_mode_with_first_encounter_tie_break() {
        let table = AthleteTable::from_records(vec![
            record("Judo", Some(2016), None, Some("Silver")),
            record("Judo", Some(2016), None, Some("Gold")),
            record("Judo", Some(2016), None, Some("Gold")),
            record("Judo", Some(2016), None, Some("Silver")),
        ]);
        let points = aggregate_over_time(
            &table,
            AggregationLevel::Sport,
            "Medal",
            &[],
            SexFilter::All,
        )
        .unwrap();
        // Silver and Gold both occur twice; Silver was seen first.
        assert_eq!(
            points[0].lines["Judo"],
            TrendValue::Text("Silver".to_owned())
        );
    }

    #[test]
    fn test_category_selection() {
        let table = AthleteTable::from_records(vec![
            record("Judo", Some(2016), Some(175.0), None),
            record("Rowing", Some(2016), Some(190.0), None),
        ]);
        let points = aggregate_over_time(
            &table,
            AggregationLevel::Sport,
            "Height",
            &["Rowing".to_owned()],
            SexFilter::All,
        )
        .unwrap();
        assert_eq!(points[0].lines.len(), 1);
        assert!(points[0].lines.contains_key("Rowing"));
    }

    #[test]
    fn test_unknown_column_is_invalid_parameter() {
        let table = AthleteTable::from_records(vec![record("Judo", Some(2016), None, None)]);
        let err = aggregate_over_time(
            &table,
            AggregationLevel::Sport,
            "Stamina",
            &[],
            SexFilter::All,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
    }

    #[test]
    fn test_no_matching_rows_is_empty_result() {
        let table = AthleteTable::from_records(vec![record("Judo", None, Some(175.0), None)]);
        let err = aggregate_over_time(
            &table,
            AggregationLevel::Sport,
            "Height",
            &[],
            SexFilter::All,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyResult { .. }));
    }
}
