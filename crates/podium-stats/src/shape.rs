//! Distribution-shape measures: excess kurtosis and Shannon entropy.
//!
//! These summarize how peaked and how spread out a group's projected
//! feature distribution is. Conventions follow the SciPy functions the
//! original analysis scripts used: kurtosis is Fisher's definition with the
//! biased moment estimator, entropy is computed in nats from a count vector
//! normalized to probabilities.

/// Fisher (excess) kurtosis of a sample, biased estimator.
///
/// Returns `None` for samples with fewer than two values or with zero
/// variance, where the measure is undefined.
///
/// # Examples
///
/// ```
/// use podium_stats::shape::kurtosis;
///
/// // A symmetric two-point distribution has kurtosis -2.
/// let k = kurtosis(&[-1.0, 1.0, -1.0, 1.0]).unwrap();
/// assert!((k - -2.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn kurtosis(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if m2 == 0.0 {
        return None;
    }
    let m4 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n;
    Some(m4 / m2.powi(2) - 3.0)
}

/// Shannon entropy (nats) of a count vector.
///
/// Counts are normalized to probabilities; zero counts contribute nothing.
/// Returns `None` when the counts sum to zero.
///
/// # Examples
///
/// ```
/// use podium_stats::shape::entropy_of_counts;
///
/// // A uniform 4-bin histogram has entropy ln(4).
/// let e = entropy_of_counts(&[5, 5, 5, 5]).unwrap();
/// assert!((e - 4.0_f64.ln()).abs() < 1e-12);
///
/// // All mass in one bin has entropy zero.
/// assert_eq!(entropy_of_counts(&[10, 0, 0]), Some(0.0));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn entropy_of_counts(counts: &[usize]) -> Option<f64> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return None;
    }
    let total = total as f64;
    let entropy = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.ln()
        })
        .sum();
    Some(entropy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kurtosis_needs_variance() {
        assert_eq!(kurtosis(&[1.0]), None);
        assert_eq!(kurtosis(&[2.0, 2.0, 2.0]), None);
    }

    #[test]
    fn test_kurtosis_two_point_distribution() {
        let k = kurtosis(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0]).unwrap();
        assert!((k - -2.0).abs() < 1e-12);
    }

    #[test]
    fn test_kurtosis_uniform_sample() {
        // Discrete uniform over n points tends toward -1.2 as n grows.
        let values: Vec<f64> = (0..1000).map(f64::from).collect();
        let k = kurtosis(&values).unwrap();
        assert!((k - -1.2).abs() < 0.01);
    }

    #[test]
    fn test_entropy_empty_counts() {
        assert_eq!(entropy_of_counts(&[]), None);
        assert_eq!(entropy_of_counts(&[0, 0]), None);
    }

    #[test]
    fn test_entropy_uniform_is_maximal() {
        let uniform = entropy_of_counts(&[3, 3, 3]).unwrap();
        let skewed = entropy_of_counts(&[7, 1, 1]).unwrap();
        assert!(uniform > skewed);
        assert!((uniform - 3.0_f64.ln()).abs() < 1e-12);
    }
}
