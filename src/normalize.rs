//! Field coercion and reshaping of raw table records.
//!
//! Dates and numbers that fail to parse become absent rather than errors.
//! Metric rows are reshaped from long format (one row per observation) into
//! one pivot row per calendar day.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::loader::{MetricRecord, WorkoutRecord};

/// Recognized wellness metric columns. Observations whose `Type` label is
/// outside this set are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKind {
    SleepHours,
    DeepSleep,
    LightSleep,
    RemSleep,
    Hrv,
    Pulse,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::SleepHours,
        MetricKind::DeepSleep,
        MetricKind::LightSleep,
        MetricKind::RemSleep,
        MetricKind::Hrv,
        MetricKind::Pulse,
    ];

    /// The `Type` label used in metrics tables, also shown as the report
    /// column header.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::SleepHours => "Sleep Hours",
            MetricKind::DeepSleep => "Time In Deep Sleep",
            MetricKind::LightSleep => "Time In Light Sleep",
            MetricKind::RemSleep => "Time In REM Sleep",
            MetricKind::Hrv => "HRV",
            MetricKind::Pulse => "Pulse",
        }
    }

    pub fn from_label(label: &str) -> Option<MetricKind> {
        let label = label.trim();
        MetricKind::ALL.into_iter().find(|k| k.label() == label)
    }
}

/// One wellness observation with its fields coerced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub day: NaiveDate,
    pub kind: MetricKind,
    pub value: Option<f64>,
}

/// All metric observations for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPivotRow {
    pub day: NaiveDate,
    pub sleep_hours: Option<f64>,
    pub deep_sleep: Option<f64>,
    pub light_sleep: Option<f64>,
    pub rem_sleep: Option<f64>,
    pub hrv: Option<f64>,
    pub pulse: Option<f64>,
}

impl MetricPivotRow {
    fn new(day: NaiveDate) -> Self {
        MetricPivotRow {
            day,
            sleep_hours: None,
            deep_sleep: None,
            light_sleep: None,
            rem_sleep: None,
            hrv: None,
            pulse: None,
        }
    }

    pub fn get(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::SleepHours => self.sleep_hours,
            MetricKind::DeepSleep => self.deep_sleep,
            MetricKind::LightSleep => self.light_sleep,
            MetricKind::RemSleep => self.rem_sleep,
            MetricKind::Hrv => self.hrv,
            MetricKind::Pulse => self.pulse,
        }
    }

    fn set(&mut self, kind: MetricKind, value: Option<f64>) {
        match kind {
            MetricKind::SleepHours => self.sleep_hours = value,
            MetricKind::DeepSleep => self.deep_sleep = value,
            MetricKind::LightSleep => self.light_sleep = value,
            MetricKind::RemSleep => self.rem_sleep = value,
            MetricKind::Hrv => self.hrv = value,
            MetricKind::Pulse => self.pulse = value,
        }
    }
}

/// One training session with its fields coerced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutSession {
    pub day: Option<NaiveDate>,
    pub workout_type: Option<String>,
    pub duration_hours: Option<f64>,
    pub heart_rate_avg: Option<f64>,
    pub heart_rate_max: Option<f64>,
    pub rpe: Option<f64>,
    pub feeling: Option<String>,
    pub zone2_minutes: Option<f64>,
    pub zone3_minutes: Option<f64>,
}

/// Parses a calendar date from the formats seen in exports: ISO date,
/// ISO datetime with `T` or space separator, and `dd.mm.yyyy`.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%d.%m.%Y"] {
        if let Ok(day) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(day);
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Coerces a raw field to a finite number; anything else is absent.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Coerces metric rows into samples. Rows whose timestamp does not parse or
/// whose type is unrecognized are dropped.
pub fn metric_samples(records: &[MetricRecord]) -> Vec<MetricSample> {
    records
        .iter()
        .filter_map(|r| {
            let day = parse_day(r.timestamp.as_deref()?)?;
            let kind = MetricKind::from_label(r.kind.as_deref()?)?;
            Some(MetricSample {
                day,
                kind,
                value: parse_number(r.value.as_deref()),
            })
        })
        .collect()
}

/// Reshapes samples into one row per distinct day, ascending.
///
/// When two samples share a `(day, kind)` pair, the later one in input order
/// wins. The result is fully determined by the sample sequence.
pub fn pivot(samples: &[MetricSample]) -> Vec<MetricPivotRow> {
    let mut by_day: BTreeMap<NaiveDate, MetricPivotRow> = BTreeMap::new();
    for sample in samples {
        by_day
            .entry(sample.day)
            .or_insert_with(|| MetricPivotRow::new(sample.day))
            .set(sample.kind, sample.value);
    }
    by_day.into_values().collect()
}

/// Coerces workout rows into sessions. A row whose day fails to parse is
/// kept; the missing day only excludes it from date-range computation.
pub fn workout_sessions(records: &[WorkoutRecord]) -> Vec<WorkoutSession> {
    records
        .iter()
        .map(|r| WorkoutSession {
            day: r.day.as_deref().and_then(parse_day),
            workout_type: r
                .workout_type
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            duration_hours: parse_number(r.duration_hours.as_deref()),
            heart_rate_avg: parse_number(r.heart_rate_avg.as_deref()),
            heart_rate_max: parse_number(r.heart_rate_max.as_deref()),
            rpe: parse_number(r.rpe.as_deref()),
            feeling: r
                .feeling
                .as_deref()
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
            zone2_minutes: parse_number(r.zone2_minutes.as_deref()),
            zone3_minutes: parse_number(r.zone3_minutes.as_deref()),
        })
        .collect()
}
