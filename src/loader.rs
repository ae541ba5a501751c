//! CSV table loading.
//!
//! Rows are deserialized into raw records whose fields are all optional
//! strings, in input order. Anything semantic (dates, numbers, recognized
//! categories) is the job of [`crate::normalize`].

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// One row of a wellness metrics table, as read.
#[derive(Debug, Default, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

/// One row of a workouts table, as read. Only the first three columns are
/// expected to be present in every export.
#[derive(Debug, Default, Deserialize)]
pub struct WorkoutRecord {
    #[serde(rename = "WorkoutDay", default)]
    pub day: Option<String>,
    #[serde(rename = "WorkoutType", default)]
    pub workout_type: Option<String>,
    #[serde(rename = "TimeTotalInHours", default)]
    pub duration_hours: Option<String>,
    #[serde(rename = "HeartRateAverage", default)]
    pub heart_rate_avg: Option<String>,
    #[serde(rename = "HeartRateMax", default)]
    pub heart_rate_max: Option<String>,
    #[serde(rename = "Rpe", default)]
    pub rpe: Option<String>,
    #[serde(rename = "Feeling", default)]
    pub feeling: Option<String>,
    #[serde(rename = "HRZone2Minutes", default)]
    pub zone2_minutes: Option<String>,
    #[serde(rename = "HRZone3Minutes", default)]
    pub zone3_minutes: Option<String>,
}

/// Reads every row of a CSV table, preserving input order.
///
/// Columns missing from the header deserialize as `None` on every row.
/// Failing to open the file or to map the header is a [`Error::Load`]-class
/// failure for this one table only.
pub fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = rdr.headers().map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(Error::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: T = result.map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record);
    }

    debug!(path = %path.display(), rows = rows.len(), "Table loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let result = load_rows::<MetricRecord>(Path::new("/nonexistent/metrics.csv"));
        assert!(matches!(result, Err(Error::Load { .. })));
    }

    #[test]
    fn test_load_empty_file_is_missing_header() {
        let path = temp_csv("training_rater_test_empty.csv", "");
        let result = load_rows::<MetricRecord>(&path);
        assert!(matches!(result, Err(Error::MissingHeader { .. })));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_preserves_row_order() {
        let path = temp_csv(
            "training_rater_test_order.csv",
            "Timestamp,Type,Value\n2024-01-02,HRV,61\n2024-01-01,HRV,55\n",
        );
        let rows = load_rows::<MetricRecord>(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp.as_deref(), Some("2024-01-02"));
        assert_eq!(rows[1].timestamp.as_deref(), Some("2024-01-01"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_optional_columns_deserialize_as_none() {
        let path = temp_csv(
            "training_rater_test_columns.csv",
            "WorkoutDay,WorkoutType,TimeTotalInHours\n2024-01-01,Run,1.5\n",
        );
        let rows = load_rows::<WorkoutRecord>(&path).unwrap();
        assert_eq!(rows[0].workout_type.as_deref(), Some("Run"));
        assert_eq!(rows[0].heart_rate_avg, None);
        assert_eq!(rows[0].zone2_minutes, None);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_cells_deserialize_as_none() {
        let path = temp_csv(
            "training_rater_test_cells.csv",
            "WorkoutDay,WorkoutType,TimeTotalInHours,HRZone2Minutes\n2024-01-01,,1.5,\n",
        );
        let rows = load_rows::<WorkoutRecord>(&path).unwrap();
        assert_eq!(rows[0].workout_type, None);
        assert_eq!(rows[0].zone2_minutes, None);
        fs::remove_file(&path).unwrap();
    }
}
