//! Analysis pipeline over the Olympic athlete tables.
//!
//! Every operation reads a shared, immutable [`podium_data::AthleteTable`]
//! and returns freshly allocated result records; nothing here mutates the
//! base data. Errors are per request and non-fatal: a bad parameter or a
//! filter that matches nothing comes back as an [`AnalysisError`], never a
//! panic.
//!
//! # Workflows
//!
//! ## Fairness ranking
//!
//! 1. **Group the table** by sport or event ([`level::AggregationLevel`])
//! 2. **Compare raw feature samples** against the general-population
//!    reference with the Kolmogorov-Smirnov statistic
//!    ([`fairness::score_groups`])
//! 3. Normalized, inverted scores: 1 means "athletes look like everyone"
//!
//! ## Group geometry
//!
//! 1. **Aggregate** per-group feature means ([`group::aggregate`]),
//!    optionally tilted toward medalists ([`medals::adjust_for_medals`])
//! 2. **Embed** the group vectors in 2 or 3 dimensions with MDS or PCA
//!    ([`project::reduce`]), or
//! 3. **Rank distances** between groups, or from an ad hoc user profile
//!    ([`distance`])
//!
//! ## Trends and shapes
//!
//! - Per-year trend lines of any dataset column
//!   ([`timeseries::aggregate_over_time`])
//! - Kurtosis/entropy summaries of each group's physique distribution
//!   ([`shape::shape_by_group`])

pub mod distance;
pub mod error;
pub mod fairness;
pub mod group;
pub mod level;
pub mod medals;
pub mod normalize;
pub mod project;
pub mod query;
pub mod shape;
pub mod timeseries;

pub use error::AnalysisError;
pub use group::{GroupTable, GroupVector};
pub use level::AggregationLevel;
pub use query::{AnalysisRequest, UserQuery};
