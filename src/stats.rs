use std::collections::HashMap;

use crate::analyzers::utility::{max, mean, min};
use crate::normalize::{MetricKind, MetricPivotRow, WorkoutSession};

/// Mean/min/max over the days a metric was present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Headline statistics for the single-subject report.
#[derive(Debug, Default)]
pub struct WellnessStats {
    metrics: HashMap<MetricKind, MetricSummary>,
    pub total_workouts: usize,
    pub total_duration_hours: f64,
    /// Session count per workout type as given (case-sensitive), most
    /// frequent first. Untyped sessions are not listed.
    pub sessions_per_type: Vec<(String, usize)>,
    pub avg_heart_rate: Option<f64>,
    pub max_heart_rate: Option<f64>,
}

impl WellnessStats {
    pub fn from_tables(rows: &[MetricPivotRow], sessions: &[WorkoutSession]) -> Self {
        let mut metrics = HashMap::new();
        for kind in MetricKind::ALL {
            let series: Vec<f64> = rows.iter().filter_map(|r| r.get(kind)).collect();
            let (Some(low), Some(high)) = (min(&series), max(&series)) else {
                continue;
            };
            metrics.insert(
                kind,
                MetricSummary {
                    mean: mean(&series),
                    min: low,
                    max: high,
                    count: series.len(),
                },
            );
        }

        let mut per_type: HashMap<&str, usize> = HashMap::new();
        for session in sessions {
            if let Some(t) = session.workout_type.as_deref() {
                *per_type.entry(t).or_default() += 1;
            }
        }
        let mut sessions_per_type: Vec<(String, usize)> = per_type
            .into_iter()
            .map(|(t, n)| (t.to_string(), n))
            .collect();
        sessions_per_type.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let hr_series: Vec<f64> = sessions.iter().filter_map(|s| s.heart_rate_avg).collect();
        let max_series: Vec<f64> = sessions.iter().filter_map(|s| s.heart_rate_max).collect();

        WellnessStats {
            metrics,
            total_workouts: sessions.len(),
            total_duration_hours: sessions.iter().filter_map(|s| s.duration_hours).sum(),
            sessions_per_type,
            avg_heart_rate: (!hr_series.is_empty()).then(|| mean(&hr_series)),
            max_heart_rate: max(&max_series),
        }
    }

    /// Summary for one metric, if it was observed at all.
    pub fn metric(&self, kind: MetricKind) -> Option<MetricSummary> {
        self.metrics.get(&kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MetricRecord;
    use crate::normalize::{metric_samples, pivot};

    fn metric(day: &str, kind: &str, value: &str) -> MetricRecord {
        MetricRecord {
            timestamp: Some(day.to_string()),
            kind: Some(kind.to_string()),
            value: Some(value.to_string()),
        }
    }

    fn run_session(workout_type: &str, hours: f64) -> WorkoutSession {
        WorkoutSession {
            workout_type: Some(workout_type.to_string()),
            duration_hours: Some(hours),
            ..Default::default()
        }
    }

    #[test]
    fn test_metric_summary_over_present_days() {
        let records = vec![
            metric("2024-01-01", "Sleep Hours", "7.5"),
            metric("2024-01-02", "Sleep Hours", "6.5"),
            metric("2024-01-03", "Sleep Hours", "bad"),
            metric("2024-01-03", "HRV", "55"),
        ];
        let rows = pivot(&metric_samples(&records));
        let stats = WellnessStats::from_tables(&rows, &[]);

        let sleep = stats.metric(MetricKind::SleepHours).unwrap();
        assert_eq!(sleep.count, 2);
        assert_eq!(sleep.mean, 7.0);
        assert_eq!(sleep.min, 6.5);
        assert_eq!(sleep.max, 7.5);

        assert_eq!(stats.metric(MetricKind::Hrv).unwrap().count, 1);
        assert_eq!(stats.metric(MetricKind::Pulse), None);
    }

    #[test]
    fn test_workout_totals_and_type_counts() {
        let sessions = vec![
            run_session("Run", 1.0),
            run_session("Run", 0.5),
            run_session("run", 2.0),
            WorkoutSession::default(),
        ];
        let stats = WellnessStats::from_tables(&[], &sessions);

        assert_eq!(stats.total_workouts, 4);
        assert_eq!(stats.total_duration_hours, 3.5);
        // Type keys are case-sensitive; the untyped session is not listed.
        assert_eq!(
            stats.sessions_per_type,
            vec![("Run".to_string(), 2), ("run".to_string(), 1)]
        );
    }

    #[test]
    fn test_heart_rate_over_present_sessions_only() {
        let sessions = vec![
            WorkoutSession {
                heart_rate_avg: Some(140.0),
                heart_rate_max: Some(171.0),
                ..Default::default()
            },
            WorkoutSession {
                heart_rate_avg: Some(150.0),
                ..Default::default()
            },
            WorkoutSession::default(),
        ];
        let stats = WellnessStats::from_tables(&[], &sessions);

        assert_eq!(stats.avg_heart_rate, Some(145.0));
        assert_eq!(stats.max_heart_rate, Some(171.0));
    }

    #[test]
    fn test_absent_heart_rate_columns_stay_absent() {
        let stats = WellnessStats::from_tables(&[], &[run_session("Run", 1.0)]);
        assert_eq!(stats.avg_heart_rate, None);
        assert_eq!(stats.max_heart_rate, None);
    }
}
