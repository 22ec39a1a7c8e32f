//! Two-sample Kolmogorov-Smirnov statistic.
//!
//! The KS statistic is the maximum vertical gap between the empirical
//! cumulative distribution functions of two samples. It is used as the
//! goodness-of-fit distance between a group's feature sample and the global
//! reference sample: 0 means the empirical distributions coincide, 1 means
//! they are fully separated.

/// Computes the two-sample Kolmogorov-Smirnov statistic.
///
/// Both samples are sorted internally; ties across the two samples are
/// handled by advancing both cursors before the gap is measured, so the
/// statistic is evaluated only at points where both step functions have
/// settled.
///
/// # Returns
///
/// * `Some(d)` with `0.0 <= d <= 1.0` - if both samples are non-empty
/// * `None` - if either sample is empty
///
/// # Examples
///
/// ```
/// use podium_stats::ks::ks_statistic;
///
/// // Identical samples are at distance zero.
/// assert_eq!(ks_statistic(&[1.0, 2.0], &[1.0, 2.0]), Some(0.0));
///
/// // Fully separated samples are at distance one.
/// assert_eq!(ks_statistic(&[0.0, 1.0], &[10.0, 11.0]), Some(1.0));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ks_statistic(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let mut i = 0;
    let mut j = 0;
    let mut max_gap = 0.0_f64;

    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        let cdf_a = i as f64 / na;
        let cdf_b = j as f64 / nb;
        max_gap = max_gap.max((cdf_a - cdf_b).abs());
    }

    Some(max_gap)
}
