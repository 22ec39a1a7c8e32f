//! Fixed-width histogram construction.
//!
//! Bins span the observed `[min, max]` range of the sample, matching the
//! behavior of `numpy.histogram` with an integer bin count. The counts feed
//! the entropy computation in [`shape`](crate::shape).

/// A fixed-width histogram over the observed range of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Lower edge of the first bin.
    pub start: f64,
    /// Width of each bin.
    pub bin_width: f64,
    /// Number of samples falling in each bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Builds a histogram with `bins` equal-width bins over `[min, max]`.
    ///
    /// The maximum value is counted in the last bin. A degenerate range
    /// (all values equal) puts every sample in the first bin.
    ///
    /// # Returns
    ///
    /// * `Some(Histogram)` - if `bins > 0` and the sample is non-empty
    /// * `None` - otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use podium_stats::histogram::Histogram;
    ///
    /// let values = [0.0, 1.0, 2.0, 3.0];
    /// let hist = Histogram::new(&values, 2).unwrap();
    /// assert_eq!(hist.counts, vec![2, 2]);
    /// ```
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 || values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        let mut counts = vec![0_usize; bins];
        if range == 0.0 {
            counts[0] = values.len();
            return Some(Self {
                start: min,
                bin_width: 0.0,
                counts,
            });
        }

        let bin_width = range / bins as f64;
        for &v in values {
            let idx = (((v - min) / range) * bins as f64) as usize;
            counts[idx.min(bins - 1)] += 1;
        }
        Some(Self {
            start: min,
            bin_width,
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bins_is_none() {
        assert!(Histogram::new(&[1.0], 0).is_none());
    }

    #[test]
    fn test_empty_sample_is_none() {
        assert!(Histogram::new(&[], 10).is_none());
    }

    #[test]
    fn test_counts_sum_to_sample_size() {
        let values: Vec<f64> = (0..37).map(f64::from).collect();
        let hist = Histogram::new(&values, 10).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 37);
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let hist = Histogram::new(&[0.0, 10.0], 5).unwrap();
        assert_eq!(hist.counts[0], 1);
        assert_eq!(hist.counts[4], 1);
    }

    #[test]
    fn test_degenerate_range() {
        let hist = Histogram::new(&[7.0, 7.0, 7.0], 4).unwrap();
        assert_eq!(hist.counts, vec![3, 0, 0, 0]);
        assert_eq!(hist.bin_width, 0.0);
    }
}
