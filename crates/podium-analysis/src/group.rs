//! Aggregation of athlete rows into per-group feature vectors.

use std::collections::BTreeMap;

use podium_data::{AthleteTable, Feature, SexFilter};
use serde::Serialize;

use crate::{error::AnalysisError, level::AggregationLevel};

/// Mean feature values for one group, in the owning table's feature order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupVector {
    pub name: String,
    pub values: Vec<f64>,
}

/// One feature vector per distinct group key.
///
/// Every vector holds one value per entry of `features`, in that order; the
/// groups are sorted by name so downstream output is stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTable {
    pub level: AggregationLevel,
    pub sex: SexFilter,
    pub features: Vec<Feature>,
    pub groups: Vec<GroupVector>,
}

impl GroupTable {
    /// The group vectors as a row-major matrix.
    #[must_use]
    pub fn matrix(&self) -> Vec<Vec<f64>> {
        self.groups.iter().map(|g| g.values.clone()).collect()
    }
}

/// Collapses a table into per-group means of the requested features.
///
/// Rows missing a feature value are excluded from that feature's mean only;
/// a group with zero observations for any requested feature is dropped
/// entirely, so every emitted vector is complete.
///
/// # Errors
///
/// * [`AnalysisError::InvalidParameter`] - when `features` is empty
/// * [`AnalysisError::EmptyResult`] - when no group survives
#[expect(clippy::cast_precision_loss)]
pub fn aggregate(
    table: &AthleteTable,
    level: AggregationLevel,
    features: &[Feature],
    sex: SexFilter,
) -> Result<GroupTable, AnalysisError> {
    if features.is_empty() {
        return Err(AnalysisError::invalid(
            "at least one feature is required for aggregation",
        ));
    }

    let filtered = table.filter_by_sex(sex);

    // (sum, count) per feature, keyed by group name. BTreeMap keeps the
    // output order deterministic.
    let mut accumulators: BTreeMap<String, Vec<(f64, usize)>> = BTreeMap::new();
    for record in filtered.rows() {
        let entry = accumulators
            .entry(level.key_of(record).to_owned())
            .or_insert_with(|| vec![(0.0, 0); features.len()]);
        for (slot, &feature) in entry.iter_mut().zip(features) {
            if let Some(value) = feature.value_of(record) {
                slot.0 += value;
                slot.1 += 1;
            }
        }
    }

    let groups: Vec<GroupVector> = accumulators
        .into_iter()
        .filter_map(|(name, slots)| {
            let values: Option<Vec<f64>> = slots
                .iter()
                .map(|&(sum, count)| (count > 0).then(|| sum / count as f64))
                .collect();
            values.map(|values| GroupVector { name, values })
        })
        .collect();

    if groups.is_empty() {
        return Err(AnalysisError::empty(format!(
            "no {} group has observations for all requested features",
            level.column_name().to_ascii_lowercase()
        )));
    }

    Ok(GroupTable {
        level,
        sex,
        features: features.to_vec(),
        groups,
    })
}

#[cfg(test)]
mod tests {
    use podium_data::{AthleteRecord, Sex};

    use super::*;
    use crate::medals::adjust_for_medals;

    fn record(
        sport: &str,
        sex: Sex,
        height: Option<f64>,
        age: Option<f64>,
        medal: Option<&str>,
    ) -> AthleteRecord {
        AthleteRecord {
            name: "A".to_owned(),
            team: "Slovenia".to_owned(),
            noc: "SLO".to_owned(),
            sex,
            age,
            height,
            weight: None,
            bmi: None,
            gdp: None,
            sport: sport.to_owned(),
            event: format!("{sport} Men's Singles"),
            year: Some(2016),
            medal: medal.map(str::to_owned),
        }
    }

    #[test]
    fn test_means_exclude_missing_values_per_feature() {
        let table = AthleteTable::from_records(vec![
            record("Judo", Sex::M, Some(170.0), Some(20.0), None),
            record("Judo", Sex::M, Some(180.0), None, None),
            record("Judo", Sex::M, None, Some(30.0), None),
        ]);
        let grouped = aggregate(
            &table,
            AggregationLevel::Sport,
            &[Feature::Height, Feature::Age],
            SexFilter::All,
        )
        .unwrap();

        assert_eq!(grouped.groups.len(), 1);
        let judo = &grouped.groups[0];
        assert_eq!(judo.name, "Judo");
        assert_eq!(judo.values, vec![175.0, 25.0]);
    }

    #[test]
    fn test_groups_sorted_and_incomplete_groups_dropped() {
        let table = AthleteTable::from_records(vec![
            record("Rowing", Sex::M, Some(190.0), Some(24.0), None),
            record("Judo", Sex::M, Some(170.0), Some(28.0), None),
            // Shooting never reports a height, so it cannot be compared.
            record("Shooting", Sex::M, None, Some(35.0), None),
        ]);
        let grouped = aggregate(
            &table,
            AggregationLevel::Sport,
            &[Feature::Height, Feature::Age],
            SexFilter::All,
        )
        .unwrap();

        let names: Vec<&str> = grouped.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Judo", "Rowing"]);
    }

    #[test]
    fn test_sex_filter_restricts_rows() {
        let table = AthleteTable::from_records(vec![
            record("Judo", Sex::M, Some(180.0), None, None),
            record("Judo", Sex::F, Some(160.0), None, None),
        ]);
        let grouped = aggregate(
            &table,
            AggregationLevel::Sport,
            &[Feature::Height],
            SexFilter::Only(Sex::F),
        )
        .unwrap();
        assert_eq!(grouped.groups[0].values, vec![160.0]);
    }

    #[test]
    fn test_medal_adjustment_tilts_the_mean() {
        let table = AthleteTable::from_records(vec![
            record("Judo", Sex::M, Some(170.0), None, None),
            record("Judo", Sex::M, Some(180.0), None, Some("Gold")),
        ]);
        // Multiplier 3 appends one extra copy of the medalist: the mean over
        // [170, 180, 180] is 176.67.
        let adjusted = adjust_for_medals(&table, 3).unwrap();
        let grouped = aggregate(
            &adjusted,
            AggregationLevel::Sport,
            &[Feature::Height],
            SexFilter::All,
        )
        .unwrap();
        assert!((grouped.groups[0].values[0] - 176.666_666_666_666_67).abs() < 1e-10);
    }

    #[test]
    fn test_event_level_uses_event_key() {
        let table = AthleteTable::from_records(vec![
            record("Judo", Sex::M, Some(175.0), None, None),
        ]);
        let grouped = aggregate(
            &table,
            AggregationLevel::Event,
            &[Feature::Height],
            SexFilter::All,
        )
        .unwrap();
        assert_eq!(grouped.groups[0].name, "Judo Men's Singles");
    }

    #[test]
    fn test_no_features_is_invalid_and_no_groups_is_empty() {
        let table = AthleteTable::from_records(vec![record(
            "Judo",
            Sex::M,
            None,
            None,
            None,
        )]);
        let err = aggregate(&table, AggregationLevel::Sport, &[], SexFilter::All).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));

        let err = aggregate(
            &table,
            AggregationLevel::Sport,
            &[Feature::Height],
            SexFilter::All,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyResult { .. }));
    }
}
