//! Error taxonomy for the report pipeline.
//!
//! Only table-level and artifact-level failures are errors. Field-level
//! coercion failures never are: they collapse into absent values (or zero,
//! inside additive sums) during normalization.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input table could not be opened or read as CSV.
    #[error("cannot read table {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The input table has no header row to map columns from.
    #[error("table {path} has no header row")]
    MissingHeader { path: PathBuf },

    /// The report artifact could not be written.
    #[error("cannot write report {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
