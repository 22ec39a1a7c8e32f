//! Dataset types and loading for the Podium analytics pipeline.
//!
//! This crate owns the base tables every analysis call reads from:
//!
//! - **Athlete table** ([`table::AthleteTable`]): one row per athlete-event
//!   participation, loaded once from CSV and never mutated in place. Every
//!   transform downstream works on a fresh copy.
//! - **GDP lookup** ([`gdp::GdpTable`]): country code to GDP mapping used to
//!   attach an economic feature to ad hoc user queries.
//! - **Reference distribution** ([`reference::ReferenceDistribution`]): the
//!   synthetic "global population" sample each sport or event is compared
//!   against, loaded from a precomputed CSV artifact or regenerated from the
//!   documented demographic parameters.
//!
//! # Data flow
//!
//! ```text
//! athletes.csv ──> AthleteTable ──┐
//! noc_gdp.csv ──> GdpTable ───────┼──> podium-analysis pipeline
//! reference.csv ─> ReferenceDistribution ┘
//! ```
//!
//! All tables are read-only after loading; concurrent analysis calls can
//! share them freely.

pub mod feature;
pub mod gdp;
pub mod record;
pub mod reference;
pub mod table;

pub use feature::Feature;
pub use record::{AthleteRecord, Sex, SexFilter};
pub use table::AthleteTable;
