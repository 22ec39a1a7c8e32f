//! Statistical primitives for the Podium analytics pipeline.
//!
//! This crate provides the dependency-free numerical tools the analysis
//! layer is built on:
//!
//! - **Descriptive statistics**: min, max, mean, variance, standard deviation
//! - **Two-sample distance**: the Kolmogorov-Smirnov statistic between two
//!   empirical distributions
//! - **Histogram generation**: fixed-width frequency counts
//! - **Shape measures**: excess kurtosis and Shannon entropy of binned data
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`ks`]: Two-sample Kolmogorov-Smirnov statistic
//! - [`histogram`]: Histogram construction for binned analyses
//! - [`shape`]: Kurtosis and entropy of a sample
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use podium_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(&values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Comparing two samples
//!
//! ```
//! use podium_stats::ks::ks_statistic;
//!
//! let a = [1.0, 2.0, 3.0];
//! let b = [1.0, 2.0, 3.0];
//! assert_eq!(ks_statistic(&a, &b), Some(0.0));
//! ```

pub mod descriptive;
pub mod histogram;
pub mod ks;
pub mod shape;
