//! Training-load aggregation and tier classification.
//!
//! This module scores each athlete's workout table into zone-weighted load
//! minutes and a counted-session total, and maps load onto a fixed ordinal
//! tier scale for the comparison report.

pub mod aggregate;
pub mod tier;
pub mod types;
pub mod utility;
