//! Dimensionality reduction of group feature vectors for scatter plots.
//!
//! Feature columns are min-max scaled before reduction so no single unit
//! (GDP in dollars next to height in centimeters) dominates the geometry.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::Serialize;

use crate::{error::AnalysisError, group::GroupTable, normalize::min_max_scale};

/// Fixed seed for the MDS starting configuration. The embedding has no
/// preferred orientation, so a fixed seed is what makes repeated runs
/// comparable.
const MDS_SEED: u64 = 42;
const MDS_MAX_ITER: usize = 300;
const MDS_EPS: f64 = 1e-6;

/// Reduction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Method {
    /// SMACOF multidimensional scaling over Euclidean dissimilarities.
    Mds,
    /// Principal component analysis.
    Pca,
}

impl std::str::FromStr for Method {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mds" => Ok(Method::Mds),
            "pca" => Ok(Method::Pca),
            _ => Err(AnalysisError::invalid(format!(
                "unknown projection method '{s}', expected 'mds' or 'pca'"
            ))),
        }
    }
}

/// One group placed in the reduced space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub name: String,
    pub coords: Vec<f64>,
}

/// The reduced embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub method: Method,
    pub points: Vec<ProjectedPoint>,
    /// Final raw stress of the MDS embedding; `None` for PCA.
    pub stress: Option<f64>,
}

/// Projects the group vectors down to `dims` coordinates.
///
/// # Errors
///
/// [`AnalysisError::InvalidParameter`] when `dims` is not 2 or 3, when PCA
/// is asked for more components than there are features, or when there are
/// fewer than two groups to embed.
pub fn reduce(
    groups: &GroupTable,
    method: Method,
    dims: usize,
) -> Result<Projection, AnalysisError> {
    if !(dims == 2 || dims == 3) {
        return Err(AnalysisError::invalid(format!(
            "projection dimensions must be 2 or 3, got {dims}"
        )));
    }
    if groups.groups.len() < 2 {
        return Err(AnalysisError::invalid(
            "at least two groups are required for a projection",
        ));
    }
    if method == Method::Pca && dims > groups.features.len() {
        return Err(AnalysisError::invalid(format!(
            "cannot extract {dims} principal components from {} features",
            groups.features.len()
        )));
    }

    let scaled = min_max_scale(&groups.matrix());
    let (coords, stress) = match method {
        Method::Mds => {
            let (coords, stress) = smacof(&scaled, dims);
            (coords, Some(stress))
        }
        Method::Pca => (pca_project(&scaled, dims), None),
    };

    let points = groups
        .groups
        .iter()
        .zip(coords)
        .map(|(group, coords)| ProjectedPoint {
            name: group.name.clone(),
            coords,
        })
        .collect();
    Ok(Projection {
        method,
        points,
        stress,
    })
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn pairwise_distances(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = rows.len();
    let mut distances = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(&rows[i], &rows[j]);
            distances[i][j] = d;
            distances[j][i] = d;
        }
    }
    distances
}

/// Raw stress: sum of squared differences between embedded and target
/// distances over unordered pairs.
fn raw_stress(coords: &[Vec<f64>], dissimilarities: &[Vec<f64>]) -> f64 {
    let n = coords.len();
    let mut stress = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(&coords[i], &coords[j]);
            let delta = dissimilarities[i][j];
            stress += (d - delta) * (d - delta);
        }
    }
    stress
}

/// SMACOF stress majorization.
///
/// Starts from a seeded random configuration and repeats the Guttman
/// transform until the stress improvement falls below `MDS_EPS`.
#[expect(clippy::cast_precision_loss)]
fn smacof(rows: &[Vec<f64>], dims: usize) -> (Vec<Vec<f64>>, f64) {
    let n = rows.len();
    let dissimilarities = pairwise_distances(rows);

    let mut rng = Pcg64Mcg::seed_from_u64(MDS_SEED);
    let mut coords: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..dims).map(|_| rng.random::<f64>()).collect())
        .collect();

    let mut stress = raw_stress(&coords, &dissimilarities);
    for _ in 0..MDS_MAX_ITER {
        // Guttman transform: X' = B(X) X / n.
        let mut b = vec![vec![0.0; n]; n];
        for i in 0..n {
            let mut diagonal = 0.0;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = euclidean(&coords[i], &coords[j]);
                let ratio = if d > 0.0 { -dissimilarities[i][j] / d } else { 0.0 };
                b[i][j] = ratio;
                diagonal -= ratio;
            }
            b[i][i] = diagonal;
        }

        let next: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..dims)
                    .map(|k| {
                        (0..n).map(|j| b[i][j] * coords[j][k]).sum::<f64>() / n as f64
                    })
                    .collect()
            })
            .collect();

        let next_stress = raw_stress(&next, &dissimilarities);
        let improved = stress - next_stress;
        coords = next;
        stress = next_stress;
        if improved < MDS_EPS {
            break;
        }
    }
    (coords, stress)
}

/// Projects rows onto their top principal components.
///
/// Columns are centered, the covariance matrix is diagonalized with cyclic
/// Jacobi rotations, and each component's sign is fixed so its largest
/// coefficient is positive.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn pca_project(rows: &[Vec<f64>], dims: usize) -> Vec<Vec<f64>> {
    let n = rows.len();
    let width = rows[0].len();

    let means: Vec<f64> = (0..width)
        .map(|col| rows.iter().map(|row| row[col]).sum::<f64>() / n as f64)
        .collect();
    let centered: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| row.iter().zip(&means).map(|(v, m)| v - m).collect())
        .collect();

    let denominator = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let mut covariance = vec![vec![0.0; width]; width];
    for a in 0..width {
        for b in a..width {
            let sum: f64 = centered.iter().map(|row| row[a] * row[b]).sum();
            covariance[a][b] = sum / denominator;
            covariance[b][a] = covariance[a][b];
        }
    }

    let (eigenvalues, mut eigenvectors) = jacobi_eigen(covariance);

    // Component columns ordered by descending eigenvalue.
    let mut order: Vec<usize> = (0..width).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Deterministic orientation: flip a component when its largest
    // coefficient is negative.
    for &col in &order {
        let dominant = (0..width)
            .map(|row| eigenvectors[row][col])
            .fold(0.0_f64, |acc, v| if v.abs() > acc.abs() { v } else { acc });
        if dominant < 0.0 {
            for row in 0..width {
                eigenvectors[row][col] = -eigenvectors[row][col];
            }
        }
    }

    centered
        .iter()
        .map(|row| {
            order
                .iter()
                .take(dims)
                .map(|&col| (0..width).map(|k| row[k] * eigenvectors[k][col]).sum())
                .collect()
        })
        .collect()
}

/// Cyclic Jacobi diagonalization of a symmetric matrix.
///
/// Returns the eigenvalues and the matrix whose columns are the matching
/// eigenvectors.
fn jacobi_eigen(mut matrix: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
    let width = matrix.len();
    let mut vectors = vec![vec![0.0; width]; width];
    for (i, row) in vectors.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    const MAX_SWEEPS: usize = 100;
    const TOLERANCE: f64 = 1e-12;
    for _ in 0..MAX_SWEEPS {
        let mut off_diagonal = 0.0;
        for p in 0..width {
            for q in (p + 1)..width {
                off_diagonal += matrix[p][q] * matrix[p][q];
            }
        }
        if off_diagonal < TOLERANCE {
            break;
        }

        for p in 0..width {
            for q in (p + 1)..width {
                if matrix[p][q].abs() < f64::EPSILON {
                    continue;
                }
                let theta = (matrix[q][q] - matrix[p][p]) / (2.0 * matrix[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..width {
                    let mkp = matrix[k][p];
                    let mkq = matrix[k][q];
                    matrix[k][p] = c * mkp - s * mkq;
                    matrix[k][q] = s * mkp + c * mkq;
                }
                for k in 0..width {
                    let mpk = matrix[p][k];
                    let mqk = matrix[q][k];
                    matrix[p][k] = c * mpk - s * mqk;
                    matrix[q][k] = s * mpk + c * mqk;
                }
                for k in 0..width {
                    let vkp = vectors[k][p];
                    let vkq = vectors[k][q];
                    vectors[k][p] = c * vkp - s * vkq;
                    vectors[k][q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = (0..width).map(|i| matrix[i][i]).collect();
    (eigenvalues, vectors)
}

#[cfg(test)]
mod tests {
    use podium_data::{Feature, SexFilter};

    use super::*;
    use crate::{group::GroupVector, level::AggregationLevel};

    fn group_table(rows: &[(&str, Vec<f64>)], features: Vec<Feature>) -> GroupTable {
        GroupTable {
            level: AggregationLevel::Sport,
            sex: SexFilter::All,
            features,
            groups: rows
                .iter()
                .map(|(name, values)| GroupVector {
                    name: (*name).to_owned(),
                    values: values.clone(),
                })
                .collect(),
        }
    }

    fn square_table() -> GroupTable {
        group_table(
            &[
                ("A", vec![0.0, 0.0]),
                ("B", vec![10.0, 0.0]),
                ("C", vec![0.0, 10.0]),
                ("D", vec![10.0, 10.0]),
            ],
            vec![Feature::Height, Feature::Age],
        )
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("mds".parse::<Method>().unwrap(), Method::Mds);
        assert_eq!("PCA".parse::<Method>().unwrap(), Method::Pca);
        assert!(matches!(
            "tsne".parse::<Method>(),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_dims_validation() {
        let table = square_table();
        for dims in [0, 1, 4] {
            let err = reduce(&table, Method::Mds, dims).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
        }
        // PCA cannot produce more components than input features.
        let err = reduce(&table, Method::Pca, 3).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
    }

    #[test]
    fn test_mds_is_deterministic() {
        let table = square_table();
        let first = reduce(&table, Method::Mds, 2).unwrap();
        let second = reduce(&table, Method::Mds, 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.points.len(), 4);
        assert!(first.points.iter().all(|p| p.coords.len() == 2));
        let stress = first.stress.unwrap();
        assert!(stress.is_finite() && stress >= 0.0);
    }

    #[test]
    fn test_mds_recovers_distance_between_two_points() {
        let table = group_table(
            &[("A", vec![0.0, 0.0]), ("B", vec![3.0, 4.0])],
            vec![Feature::Height, Feature::Age],
        );
        let projection = reduce(&table, Method::Mds, 2).unwrap();
        // After min-max scaling both columns span [0, 1]: the target
        // distance is sqrt(2).
        let d = euclidean(&projection.points[0].coords, &projection.points[1].coords);
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-3);
        assert!(projection.stress.unwrap() < 1e-6);
    }

    #[test]
    fn test_pca_projects_onto_dominant_axis() {
        let table = group_table(
            &[
                ("A", vec![0.0, 5.0]),
                ("B", vec![1.0, 5.0]),
                ("C", vec![2.0, 5.0]),
                ("D", vec![3.0, 5.0]),
            ],
            vec![Feature::Height, Feature::Age],
        );
        let projection = reduce(&table, Method::Pca, 2).unwrap();
        assert!(projection.stress.is_none());

        // Variance lives entirely in the first column; after min-max scaling
        // it spans [0, 1], centered at 1/2.
        let expected = [-0.5, -1.0 / 6.0, 1.0 / 6.0, 0.5];
        for (point, &want) in projection.points.iter().zip(&expected) {
            assert!((point.coords[0] - want).abs() < 1e-9);
            assert!(point.coords[1].abs() < 1e-9);
        }
    }
}
