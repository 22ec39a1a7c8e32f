/// Descriptive statistics summarizing a sample.
///
/// Contains the common measures of central tendency and dispersion for a
/// sample of `f64` values. Variance is the population variance (divide by
/// `n`), matching the convention used by the reference-distribution batch
/// artifacts this crate is compared against.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// The population variance of the sample.
    pub variance: f64,
    /// The population standard deviation of the sample.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from a sample.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the sample contains at least one value
    /// * `None` - if the sample is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use podium_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(&values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        let n = values.len() as f64;
        let mean = sum / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        Some(Self {
            min,
            max,
            mean,
            variance,
            std_dev,
        })
    }
}

/// Arithmetic mean of a sample, or `None` when it is empty.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
