//! Distribution shape of a group's athletes along their main axis of
//! variation.
//!
//! Rows are standardized over the whole (medal-adjusted) table, each group
//! is projected to one dimension with PCA, and the projection is summarized
//! by excess kurtosis and the Shannon entropy of a 10-bin histogram. Peaked,
//! low-entropy groups select one narrow physique; flat, high-entropy groups
//! admit many.

use std::collections::BTreeMap;

use podium_data::{AthleteTable, Feature, SexFilter};
use podium_stats::{histogram::Histogram, shape};
use serde::Serialize;

use crate::{
    error::AnalysisError,
    level::AggregationLevel,
    medals::adjust_for_medals,
    normalize::Scaling,
    project::pca_project,
};

const ENTROPY_BINS: usize = 10;

/// Shape summary of one group's principal-axis projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeStats {
    pub name: String,
    pub kurtosis: f64,
    pub entropy: f64,
}

/// Summarizes the physique distribution of each requested group.
///
/// `keys` restricts the output to the named groups; empty means all. Groups
/// whose projection is degenerate (fewer than two rows, or zero variance)
/// are skipped.
///
/// # Errors
///
/// * [`AnalysisError::InvalidParameter`] - empty feature list or a medal
///   multiplier of zero
/// * [`AnalysisError::EmptyResult`] - no group could be summarized
pub fn shape_by_group(
    table: &AthleteTable,
    level: AggregationLevel,
    keys: &[String],
    features: &[Feature],
    sex: SexFilter,
    multiplier: u32,
) -> Result<Vec<ShapeStats>, AnalysisError> {
    if features.is_empty() {
        return Err(AnalysisError::invalid(
            "at least one feature is required for shape statistics",
        ));
    }

    let adjusted = adjust_for_medals(table, multiplier)?;
    let filtered = adjusted.filter_by_sex(sex);

    // Keep only rows with every requested feature, noting each row's group.
    let mut group_of_row = Vec::new();
    let mut matrix = Vec::new();
    for record in filtered.rows() {
        let key = level.key_of(record);
        if !(keys.is_empty() || keys.iter().any(|k| k == key)) {
            continue;
        }
        let row: Option<Vec<f64>> = features
            .iter()
            .map(|&feature| feature.value_of(record))
            .collect();
        if let Some(row) = row {
            group_of_row.push(key.to_owned());
            matrix.push(row);
        }
    }

    let Some((standardized, _)) = Scaling::fit_transform(&matrix) else {
        return Err(AnalysisError::empty(
            "no rows with all requested features matched the request",
        ));
    };

    let mut rows_by_group: BTreeMap<String, Vec<Vec<f64>>> = BTreeMap::new();
    for (key, row) in group_of_row.into_iter().zip(standardized) {
        rows_by_group.entry(key).or_default().push(row);
    }

    let mut stats = Vec::new();
    for (name, rows) in rows_by_group {
        if rows.len() < 2 {
            continue;
        }
        let scores: Vec<f64> = pca_project(&rows, 1).into_iter().map(|r| r[0]).collect();
        let Some(kurtosis) = shape::kurtosis(&scores) else {
            continue;
        };
        let Some(histogram) = Histogram::new(&scores, ENTROPY_BINS) else {
            continue;
        };
        let Some(entropy) = shape::entropy_of_counts(&histogram.counts) else {
            continue;
        };
        stats.push(ShapeStats {
            name,
            kurtosis,
            entropy,
        });
    }

    if stats.is_empty() {
        return Err(AnalysisError::empty(
            "no group had enough variation to summarize",
        ));
    }
    Ok(stats)
}
