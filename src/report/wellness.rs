//! The single-subject wellness trend report page.

use std::fmt::Write;

use chrono::Local;

use crate::analyzers::types::DateSpan;
use crate::normalize::{MetricKind, MetricPivotRow, WorkoutSession};
use crate::report::{MISSING_CELL, PLOTLY_CDN, chart, chart_div, escape};
use crate::stats::WellnessStats;

const STYLE: &str = r#"        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background-color: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 {
            color: #2c3e50;
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #3498db;
            padding-bottom: 15px;
        }
        h2 {
            color: #34495e;
            margin-top: 30px;
            border-left: 4px solid #3498db;
            padding-left: 15px;
        }
        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 20px;
            margin: 20px 0;
        }
        .stat-card {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 20px;
            border-radius: 8px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
        }
        .stat-card.green {
            background: linear-gradient(135deg, #56ab2f 0%, #a8e063 100%);
        }
        .stat-card.blue {
            background: linear-gradient(135deg, #2193b0 0%, #6dd5ed 100%);
        }
        .stat-card.orange {
            background: linear-gradient(135deg, #f46b45 0%, #eea849 100%);
        }
        .stat-label {
            font-size: 14px;
            opacity: 0.9;
            margin-bottom: 5px;
        }
        .stat-value {
            font-size: 32px;
            font-weight: bold;
        }
        .stat-unit {
            font-size: 16px;
            opacity: 0.8;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin: 20px 0;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        th {
            background-color: #3498db;
            color: white;
            padding: 12px;
            text-align: left;
            font-weight: 600;
        }
        td {
            padding: 10px 12px;
            border-bottom: 1px solid #ecf0f1;
        }
        tr:hover {
            background-color: #f8f9fa;
        }
        .summary-box {
            background-color: #ecf0f1;
            padding: 20px;
            border-radius: 8px;
            margin: 20px 0;
        }
        .chart-container {
            margin: 20px 0;
        }
        .date-range {
            text-align: center;
            color: #7f8c8d;
            font-style: italic;
            margin: 10px 0;
        }"#;

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_CELL.to_string(), |v| v.to_string())
}

fn text_cell(value: Option<&str>) -> String {
    value.map_or_else(|| MISSING_CELL.to_string(), escape)
}

/// Renders the wellness trend report document. Absent metrics fall back to
/// zeroed scorecards and placeholder cells rather than failing.
pub fn render(
    stats: &WellnessStats,
    rows: &[MetricPivotRow],
    sessions: &[WorkoutSession],
    span: Option<DateSpan>,
) -> String {
    let period = match span {
        Some(s) => format!(
            "Report Period: {} to {}",
            s.first.format("%Y-%m-%d"),
            s.last.format("%Y-%m-%d")
        ),
        None => "Report Period: no dated observations".to_string(),
    };

    let sleep = stats.metric(MetricKind::SleepHours);
    let hrv = stats.metric(MetricKind::Hrv);
    let pulse = stats.metric(MetricKind::Pulse);

    let mut metric_rows_html = String::new();
    for row in rows {
        let _ = write!(metric_rows_html, "<tr><td>{}</td>", row.day.format("%Y-%m-%d"));
        for kind in MetricKind::ALL {
            let _ = write!(metric_rows_html, "<td>{}</td>", cell(row.get(kind)));
        }
        metric_rows_html.push_str("</tr>\n");
    }

    let mut session_rows_html = String::new();
    for s in sessions {
        let day = s
            .day
            .map_or_else(|| MISSING_CELL.to_string(), |d| d.format("%Y-%m-%d").to_string());
        let duration = s
            .duration_hours
            .map_or_else(|| MISSING_CELL.to_string(), |h| format!("{h:.2}"));
        let _ = writeln!(
            session_rows_html,
            "<tr><td>{day}</td><td>{}</td><td>{duration}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            text_cell(s.workout_type.as_deref()),
            cell(s.heart_rate_avg),
            cell(s.heart_rate_max),
            cell(s.rpe),
            text_cell(s.feeling.as_deref()),
        );
    }

    let mut type_list_html = String::new();
    for (workout_type, count) in &stats.sessions_per_type {
        let _ = writeln!(
            type_list_html,
            "                <li>{}: {} sessions</li>",
            escape(workout_type),
            count
        );
    }

    let mut charts_html = String::new();
    if let Some(fig) = chart::sleep_trend(rows) {
        charts_html.push_str(&chart_div("sleep_chart", &fig));
    }
    if let Some(fig) = chart::duration_by_type(sessions) {
        charts_html.push_str(&chart_div("workout_chart", &fig));
    }

    let metric_headers: String = MetricKind::ALL
        .iter()
        .map(|k| format!("<th>{}</th>", k.label()))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Training &amp; Wellness Report</title>
    <style>
{style}
    </style>
    <script src="{plotly}"></script>
</head>
<body>
    <div class="container">
        <h1>🏋️ Training &amp; Wellness Report</h1>
        <div class="date-range">{period}</div>

        <h2>📊 Key Metrics Summary</h2>
        <div class="stats-grid">
            <div class="stat-card green">
                <div class="stat-label">Average Sleep</div>
                <div class="stat-value">{avg_sleep:.2} <span class="stat-unit">hours</span></div>
            </div>
            <div class="stat-card blue">
                <div class="stat-label">Average HRV</div>
                <div class="stat-value">{avg_hrv:.1} <span class="stat-unit">ms</span></div>
            </div>
            <div class="stat-card orange">
                <div class="stat-label">Resting Heart Rate</div>
                <div class="stat-value">{avg_pulse:.0} <span class="stat-unit">bpm</span></div>
            </div>
            <div class="stat-card">
                <div class="stat-label">Total Workouts</div>
                <div class="stat-value">{total_workouts}</div>
            </div>
        </div>

        <h2>💤 Sleep Analysis</h2>
        <div class="summary-box">
            <p><strong>Sleep Duration:</strong> Min: {min_sleep:.2}h | Max: {max_sleep:.2}h | Avg: {avg_sleep:.2}h</p>
        </div>

        <table>
            <thead>
                <tr><th>Date</th>{metric_headers}</tr>
            </thead>
            <tbody>
{metric_rows}            </tbody>
        </table>

        <h2>🏃 Workout Summary</h2>
        <div class="summary-box">
            <p><strong>Total Training Duration:</strong> {total_duration:.2} hours</p>
            <p><strong>Workout Types:</strong></p>
            <ul>
{type_list}            </ul>
        </div>

        <table>
            <thead>
                <tr><th>Date</th><th>Type</th><th>Duration (h)</th><th>Avg HR</th><th>Max HR</th><th>RPE</th><th>Feeling</th></tr>
            </thead>
            <tbody>
{session_rows}            </tbody>
        </table>

{charts}
        <h2>📈 HRV Analysis</h2>
        <div class="summary-box">
            <p><strong>HRV Range:</strong> Min: {min_hrv:.0} | Max: {max_hrv:.0} | Avg: {avg_hrv:.1}</p>
            <p><strong>Note:</strong> Higher HRV generally indicates better recovery and readiness to train.</p>
        </div>

        <div class="date-range" style="margin-top: 40px;">
            Generated on {generated}
        </div>
    </div>
</body>
</html>
"#,
        style = STYLE,
        plotly = PLOTLY_CDN,
        period = period,
        avg_sleep = sleep.map_or(0.0, |s| s.mean),
        min_sleep = sleep.map_or(0.0, |s| s.min),
        max_sleep = sleep.map_or(0.0, |s| s.max),
        avg_hrv = hrv.map_or(0.0, |s| s.mean),
        min_hrv = hrv.map_or(0.0, |s| s.min),
        max_hrv = hrv.map_or(0.0, |s| s.max),
        avg_pulse = pulse.map_or(0.0, |s| s.mean),
        total_workouts = stats.total_workouts,
        total_duration = stats.total_duration_hours,
        metric_headers = metric_headers,
        metric_rows = metric_rows_html,
        type_list = type_list_html,
        session_rows = session_rows_html,
        charts = charts_html,
        generated = Local::now().format("%Y-%m-%d %H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MetricRecord;
    use crate::normalize::{metric_samples, pivot};
    use crate::stats::WellnessStats;

    fn metric(day: &str, kind: &str, value: &str) -> MetricRecord {
        MetricRecord {
            timestamp: Some(day.to_string()),
            kind: Some(kind.to_string()),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn test_render_with_full_data() {
        let records = vec![
            metric("2024-01-01", "Sleep Hours", "7.5"),
            metric("2024-01-01", "HRV", "55"),
        ];
        let rows = pivot(&metric_samples(&records));
        let sessions = vec![WorkoutSession {
            day: crate::normalize::parse_day("2024-01-01"),
            workout_type: Some("Run".to_string()),
            duration_hours: Some(1.5),
            ..Default::default()
        }];
        let stats = WellnessStats::from_tables(&rows, &sessions);
        let span = DateSpan::from_days(rows.iter().map(|r| r.day));

        let html = render(&stats, &rows, &sessions, span);

        assert!(html.contains("Training &amp; Wellness Report"));
        assert!(html.contains("Report Period: 2024-01-01 to 2024-01-01"));
        assert!(html.contains("7.50 <span class=\"stat-unit\">hours</span>"));
        assert!(html.contains("Run: 1 sessions"));
        assert!(html.contains("sleep_chart"));
    }

    #[test]
    fn test_render_without_metrics_uses_placeholders() {
        let sessions = vec![WorkoutSession {
            workout_type: Some("Run".to_string()),
            duration_hours: Some(1.0),
            ..Default::default()
        }];
        let stats = WellnessStats::from_tables(&[], &sessions);

        let html = render(&stats, &[], &sessions, None);

        // Scorecards render zeroed rather than failing.
        assert!(html.contains("0.00 <span class=\"stat-unit\">hours</span>"));
        assert!(html.contains("no dated observations"));
        // Session cells with absent fields show the placeholder.
        assert!(html.contains("<td>-</td>"));
        // No sleep observations, no sleep chart.
        assert!(!html.contains("sleep_chart"));
    }

    #[test]
    fn test_render_escapes_free_text() {
        let sessions = vec![WorkoutSession {
            workout_type: Some("Run & Jump".to_string()),
            feeling: Some("<great>".to_string()),
            ..Default::default()
        }];
        let stats = WellnessStats::from_tables(&[], &sessions);

        let html = render(&stats, &[], &sessions, None);
        assert!(html.contains("Run &amp; Jump"));
        assert!(html.contains("&lt;great&gt;"));
    }
}
