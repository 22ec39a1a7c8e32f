//! Column-wise standardization and min-max scaling.
//!
//! The standardization parameters are kept so an ad hoc row (a user query)
//! can later be projected into the same space as the table the parameters
//! were fitted on. Applying a transform twice double-standardizes; callers
//! transform raw data exactly once per analysis.

use podium_stats::descriptive::DescriptiveStats;

/// Fitted standardization parameters: one mean and standard deviation per
/// column.
///
/// # Zero-variance policy
///
/// A column whose standard deviation is zero carries no information after
/// centering. Instead of dividing by zero (and silently propagating NaN the
/// way `sklearn` does), [`Scaling::apply`] maps such a column to all zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaling {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl Scaling {
    /// Fits means and standard deviations column-wise over row-major data.
    ///
    /// # Returns
    ///
    /// * `Some(Scaling)` - if there is at least one row
    /// * `None` - for an empty table
    ///
    /// # Panics
    ///
    /// Panics in debug mode if rows have inconsistent widths.
    #[must_use]
    pub fn fit(rows: &[Vec<f64>]) -> Option<Self> {
        let first = rows.first()?;
        let width = first.len();
        debug_assert!(rows.iter().all(|row| row.len() == width));

        let mut means = Vec::with_capacity(width);
        let mut stds = Vec::with_capacity(width);
        for col in 0..width {
            let column: Vec<f64> = rows.iter().map(|row| row[col]).collect();
            let stats = DescriptiveStats::new(&column)?;
            means.push(stats.mean);
            stds.push(stats.std_dev);
        }
        Some(Self { means, stds })
    }

    /// Standardizes every row with the fitted parameters, returning a new
    /// table. The input is never modified.
    #[must_use]
    pub fn apply(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.apply_row(row)).collect()
    }

    /// Standardizes a single row with the fitted parameters.
    #[must_use]
    pub fn apply_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(&value, (&mean, &std))| {
                if std == 0.0 {
                    0.0
                } else {
                    (value - mean) / std
                }
            })
            .collect()
    }

    /// Fit followed by apply; used when a table is standardized in
    /// isolation and the parameters are not reused.
    #[must_use]
    pub fn fit_transform(rows: &[Vec<f64>]) -> Option<(Vec<Vec<f64>>, Self)> {
        let scaling = Self::fit(rows)?;
        let transformed = scaling.apply(rows);
        Some((transformed, scaling))
    }

    /// Per-column means the parameters were fitted on.
    #[must_use]
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Per-column standard deviations the parameters were fitted on.
    #[must_use]
    pub fn stds(&self) -> &[f64] {
        &self.stds
    }
}

/// Min-max scales every column to `[0, 1]`, returning a new table.
///
/// A column with zero range maps to all zeros. Used to bring features to a
/// common scale before dimensionality reduction.
#[must_use]
pub fn min_max_scale(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let width = first.len();

    let mut mins = vec![f64::INFINITY; width];
    let mut maxs = vec![f64::NEG_INFINITY; width];
    for row in rows {
        for (col, &value) in row.iter().enumerate() {
            mins[col] = mins[col].min(value);
            maxs[col] = maxs[col].max(value);
        }
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(col, &value)| {
                    let range = maxs[col] - mins[col];
                    if range == 0.0 {
                        0.0
                    } else {
                        (value - mins[col]) / range
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(rows: &[Vec<f64>], col: usize) -> Vec<f64> {
        rows.iter().map(|row| row[col]).collect()
    }

    #[test]
    fn test_fit_on_empty_table() {
        assert!(Scaling::fit(&[]).is_none());
    }

    #[test]
    fn test_standardized_columns_have_zero_mean_unit_std() {
        let rows = vec![
            vec![170.0, 21.0],
            vec![180.0, 24.0],
            vec![190.0, 27.0],
            vec![175.0, 22.0],
        ];
        let (transformed, _) = Scaling::fit_transform(&rows).unwrap();

        for col in 0..2 {
            let stats = DescriptiveStats::new(&column(&transformed, col)).unwrap();
            assert!(stats.mean.abs() < 1e-12);
            assert!((stats.std_dev - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_std_column_maps_to_zeros() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let (transformed, _) = Scaling::fit_transform(&rows).unwrap();
        assert!(column(&transformed, 0).iter().all(|&v| v == 0.0));
        // The informative column is still standardized.
        let stats = DescriptiveStats::new(&column(&transformed, 1)).unwrap();
        assert!((stats.std_dev - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_is_not_idempotent() {
        let rows = vec![vec![1.0], vec![2.0], vec![3.0]];
        let scaling = Scaling::fit(&rows).unwrap();
        let once = scaling.apply(&rows);
        let twice = scaling.apply(&once);
        assert_ne!(once, twice);
    }

    #[test]
    fn test_apply_row_projects_into_fitted_space() {
        let rows = vec![vec![0.0], vec![10.0]];
        let scaling = Scaling::fit(&rows).unwrap();
        // Mean 5, population std 5: a raw 15 sits two standard deviations up.
        assert_eq!(scaling.apply_row(&[15.0]), vec![2.0]);
    }

    #[test]
    fn test_min_max_scale_bounds() {
        let rows = vec![vec![10.0, 7.0], vec![20.0, 7.0], vec![15.0, 7.0]];
        let scaled = min_max_scale(&rows);
        assert_eq!(column(&scaled, 0), vec![0.0, 1.0, 0.5]);
        // Zero-range column maps to zeros.
        assert!(column(&scaled, 1).iter().all(|&v| v == 0.0));
    }
}
