//! Fairness scoring: how close each group's athletes are to the general
//! population.
//!
//! For every group the raw (unstandardized) sample of each feature is
//! compared against the reference sample of the matching sex with the
//! two-sample Kolmogorov-Smirnov statistic. The raw distances are min-max
//! normalized per feature across the groups and inverted, so a score of 1
//! marks the group whose athletes look most like the reference population.

use std::collections::BTreeMap;

use podium_data::{AthleteTable, Feature, Sex, SexFilter, reference::ReferenceDistribution};
use podium_stats::ks::ks_statistic;
use serde::Serialize;

use crate::{error::AnalysisError, level::AggregationLevel};

/// Similarity scores for one group, one per requested feature, plus the
/// Euclidean norm of the score vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredGroup {
    pub name: String,
    pub scores: Vec<f64>,
    pub total: f64,
}

/// Scores every group against the reference population of the given sex.
///
/// The result is sorted by descending `total`: the fairest group (the one
/// most open to average physiques) comes first. Groups without observations
/// for some requested feature are dropped.
///
/// # Errors
///
/// * [`AnalysisError::InvalidParameter`] - when `features` is empty or a
///   feature has no reference baseline (only age, height and BMI do)
/// * [`AnalysisError::EmptyResult`] - when no group can be scored
pub fn score_groups(
    table: &AthleteTable,
    reference: &ReferenceDistribution,
    level: AggregationLevel,
    features: &[Feature],
    sex: Sex,
) -> Result<Vec<ScoredGroup>, AnalysisError> {
    if features.is_empty() {
        return Err(AnalysisError::invalid(
            "at least one feature is required for fairness scoring",
        ));
    }
    let baselines: Vec<&[f64]> = features
        .iter()
        .map(|&feature| {
            reference.sample(feature, sex).ok_or_else(|| {
                AnalysisError::invalid(format!(
                    "no reference baseline for feature '{feature}'"
                ))
            })
        })
        .collect::<Result<_, _>>()?;

    let filtered = table.filter_by_sex(SexFilter::Only(sex));

    let mut samples: BTreeMap<String, Vec<Vec<f64>>> = BTreeMap::new();
    for record in filtered.rows() {
        let entry = samples
            .entry(level.key_of(record).to_owned())
            .or_insert_with(|| vec![Vec::new(); features.len()]);
        for (bucket, &feature) in entry.iter_mut().zip(features) {
            if let Some(value) = feature.value_of(record) {
                bucket.push(value);
            }
        }
    }

    // Raw KS distance per feature; a group missing any feature is dropped so
    // the normalization below sees a complete matrix.
    let mut distances: Vec<(String, Vec<f64>)> = Vec::new();
    for (name, buckets) in samples {
        let row: Option<Vec<f64>> = buckets
            .iter()
            .zip(&baselines)
            .map(|(sample, &baseline)| ks_statistic(sample, baseline))
            .collect();
        if let Some(row) = row {
            distances.push((name, row));
        }
    }
    if distances.is_empty() {
        return Err(AnalysisError::empty(format!(
            "no {} group has samples for all requested features",
            level.column_name().to_ascii_lowercase()
        )));
    }

    let mut scored: Vec<ScoredGroup> = distances
        .iter()
        .map(|(name, row)| ScoredGroup {
            name: name.clone(),
            scores: vec![0.0; row.len()],
            total: 0.0,
        })
        .collect();
    for col in 0..features.len() {
        let column: Vec<f64> = distances.iter().map(|(_, row)| row[col]).collect();
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for (group, &raw) in scored.iter_mut().zip(&column) {
            // When every group is equidistant the raw statistic is kept.
            let normalized = if max == min { raw } else { (raw - min) / (max - min) };
            group.scores[col] = 1.0 - normalized;
        }
    }
    for group in &mut scored {
        group.total = group.scores.iter().map(|s| s * s).sum::<f64>().sqrt();
    }

    // Fairest first; name breaks ties so output order is reproducible.
    scored.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use podium_data::{AthleteRecord, reference::ReferenceRow};

    use super::*;

    fn reference_heights(heights: &[f64]) -> ReferenceDistribution {
        let rows: Vec<ReferenceRow> = heights
            .iter()
            .map(|&height| ReferenceRow {
                age: 30.0,
                height,
                bmi: 24.0,
                sex: Sex::M,
            })
            .collect();
        ReferenceDistribution::from_rows(&rows)
    }

    fn record(sport: &str, height: f64) -> AthleteRecord {
        AthleteRecord {
            name: "A".to_owned(),
            team: "Slovenia".to_owned(),
            noc: "SLO".to_owned(),
            sex: Sex::M,
            age: None,
            height: Some(height),
            weight: None,
            bmi: None,
            gdp: None,
            sport: sport.to_owned(),
            event: format!("{sport} Men's Singles"),
            year: Some(2016),
            medal: None,
        }
    }

    #[test]
    fn test_population_like_group_ranks_first() {
        let reference = reference_heights(&[170.0, 172.0, 174.0, 176.0, 178.0]);
        let mut rows = Vec::new();
        // Judo mirrors the reference, Basketball is entirely above it.
        for height in [170.0, 172.0, 174.0, 176.0, 178.0] {
            rows.push(record("Judo", height));
        }
        for height in [200.0, 205.0, 210.0, 215.0, 220.0] {
            rows.push(record("Basketball", height));
        }
        let table = AthleteTable::from_records(rows);

        let scored = score_groups(
            &table,
            &reference,
            AggregationLevel::Sport,
            &[Feature::Height],
            Sex::M,
        )
        .unwrap();

        assert_eq!(scored[0].name, "Judo");
        assert_eq!(scored[0].scores, vec![1.0]);
        assert_eq!(scored[1].name, "Basketball");
        assert_eq!(scored[1].scores, vec![0.0]);
    }

    #[test]
    fn test_total_is_euclidean_norm_of_scores() {
        let reference = reference_heights(&[170.0, 175.0, 180.0]);
        let rows = vec![
            record("Judo", 170.0),
            record("Judo", 175.0),
            record("Basketball", 210.0),
        ];
        let table = AthleteTable::from_records(rows);
        let scored = score_groups(
            &table,
            &reference,
            AggregationLevel::Sport,
            &[Feature::Height, Feature::Age],
            Sex::M,
        );
        // Age has a baseline but no group observations, so every group is
        // dropped and the request comes back empty.
        assert!(matches!(scored, Err(AnalysisError::EmptyResult { .. })));

        let scored = score_groups(
            &table,
            &reference,
            AggregationLevel::Sport,
            &[Feature::Height],
            Sex::M,
        )
        .unwrap();
        for group in &scored {
            let norm = group.scores.iter().map(|s| s * s).sum::<f64>().sqrt();
            assert!((group.total - norm).abs() < 1e-12);
        }
    }

    #[test]
    fn test_equidistant_groups_keep_raw_statistic() {
        let reference = reference_heights(&[170.0, 175.0, 180.0]);
        // Both groups match the reference exactly: KS 0 across the board,
        // min == max, so the raw distance is kept and inverted.
        let rows = vec![
            record("Judo", 170.0),
            record("Judo", 175.0),
            record("Judo", 180.0),
            record("Fencing", 170.0),
            record("Fencing", 175.0),
            record("Fencing", 180.0),
        ];
        let table = AthleteTable::from_records(rows);
        let scored = score_groups(
            &table,
            &reference,
            AggregationLevel::Sport,
            &[Feature::Height],
            Sex::M,
        )
        .unwrap();
        assert!(scored.iter().all(|g| g.scores == vec![1.0]));
        // Names break the total tie.
        assert_eq!(scored[0].name, "Fencing");
    }

    #[test]
    fn test_feature_without_baseline_is_invalid() {
        let reference = reference_heights(&[170.0]);
        let table = AthleteTable::from_records(vec![record("Judo", 170.0)]);
        let err = score_groups(
            &table,
            &reference,
            AggregationLevel::Sport,
            &[Feature::Gdp],
            Sex::M,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
    }
}
