//! Distance ranking between groups, and between a user profile and groups.
//!
//! Distances are Euclidean over standardized feature vectors. The
//! standardization is always fitted on the group table itself; an ad hoc
//! user row is projected into that space with the same fit, never refitted.

use podium_data::gdp::GdpTable;
use serde::Serialize;

use crate::{
    error::AnalysisError,
    group::GroupTable,
    normalize::Scaling,
    query::UserQuery,
};

/// An unordered group pair and its distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPair {
    pub first: String,
    pub second: String,
    pub distance: f64,
}

/// One group's distance from the user profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGroup {
    pub name: String,
    pub distance: f64,
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Ranks every unordered pair of groups by distance, closest first.
///
/// Emits exactly `n * (n - 1) / 2` pairs, no self-pairs.
///
/// # Errors
///
/// [`AnalysisError::EmptyResult`] when there are fewer than two groups.
pub fn rank_pairwise(groups: &GroupTable) -> Result<Vec<RankedPair>, AnalysisError> {
    let standardized = standardized_matrix(groups)?;
    if standardized.len() < 2 {
        return Err(AnalysisError::empty(
            "pairwise ranking needs at least two groups",
        ));
    }

    let mut pairs = Vec::with_capacity(standardized.len() * (standardized.len() - 1) / 2);
    for i in 0..standardized.len() {
        for j in (i + 1)..standardized.len() {
            pairs.push(RankedPair {
                first: groups.groups[i].name.clone(),
                second: groups.groups[j].name.clone(),
                distance: euclidean(&standardized[i], &standardized[j]),
            });
        }
    }
    sort_ascending(&mut pairs, |pair| pair.distance);
    Ok(pairs)
}

/// Ranks every group by distance from the user profile, closest first.
///
/// The user's feature vector is built in the group table's feature order
/// (BMI derived, GDP resolved) and standardized with the group table's own
/// fit; the user never appears in the output.
pub fn rank_for_user(
    groups: &GroupTable,
    user: &UserQuery,
    gdp: &GdpTable,
) -> Result<Vec<RankedGroup>, AnalysisError> {
    let scaling = Scaling::fit(&groups.matrix())
        .ok_or_else(|| AnalysisError::empty("no groups to rank against"))?;
    let standardized = scaling.apply(&groups.matrix());
    let user_row = scaling.apply_row(&user.to_feature_values(&groups.features, gdp)?);

    let mut ranked: Vec<RankedGroup> = groups
        .groups
        .iter()
        .zip(&standardized)
        .map(|(group, row)| RankedGroup {
            name: group.name.clone(),
            distance: euclidean(&user_row, row),
        })
        .collect();
    sort_ascending(&mut ranked, |group| group.distance);
    Ok(ranked)
}

fn standardized_matrix(groups: &GroupTable) -> Result<Vec<Vec<f64>>, AnalysisError> {
    let matrix = groups.matrix();
    let Some((standardized, _)) = Scaling::fit_transform(&matrix) else {
        return Err(AnalysisError::empty("no groups to rank"));
    };
    Ok(standardized)
}

fn sort_ascending<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| {
        key(a)
            .partial_cmp(&key(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
