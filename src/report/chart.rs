//! Plotly figure construction.
//!
//! Figures are plain JSON values mounted client-side with `Plotly.newPlot`.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::analyzers::tier::{CHART_BANDS, TIER_NAMES};
use crate::analyzers::types::{DateSpan, RankedAthlete};
use crate::analyzers::utility::mean;
use crate::normalize::{MetricPivotRow, WorkoutSession};

/// Sleep-duration trend with a dashed mean reference line. `None` when no
/// sleep observation is present.
pub fn sleep_trend(rows: &[MetricPivotRow]) -> Option<Value> {
    let points: Vec<(String, f64)> = rows
        .iter()
        .filter_map(|r| {
            r.sleep_hours
                .map(|v| (r.day.format("%Y-%m-%d").to_string(), v))
        })
        .collect();
    if points.is_empty() {
        return None;
    }

    let days: Vec<&str> = points.iter().map(|(d, _)| d.as_str()).collect();
    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    let avg = mean(&values);

    Some(json!({
        "data": [{
            "type": "scatter",
            "mode": "lines+markers",
            "name": "Miega stundas",
            "x": days,
            "y": values,
            "line": {"color": "#3498db", "width": 3},
            "marker": {"size": 8},
            "fill": "tozeroy",
            "fillcolor": "rgba(52, 152, 219, 0.2)"
        }],
        "layout": {
            "title": {"text": "Miega Ilgums Laika Gaitā"},
            "xaxis": {"title": {"text": "Datums"}},
            "yaxis": {"title": {"text": "Stundas"}},
            "hovermode": "x unified",
            "plot_bgcolor": "white",
            "height": 400,
            "shapes": [{
                "type": "line",
                "xref": "paper", "yref": "y",
                "x0": 0, "x1": 1, "y0": avg, "y1": avg,
                "line": {"color": "red", "width": 2, "dash": "dash"}
            }],
            "annotations": [{
                "xref": "paper", "yref": "y",
                "x": 1, "y": avg,
                "text": format!("Vidēji: {avg:.2}h"),
                "showarrow": false,
                "yanchor": "bottom",
                "font": {"size": 12, "color": "red"}
            }]
        }
    }))
}

/// Total duration per workout type, alphabetical. `None` when no typed
/// session has a parseable duration.
pub fn duration_by_type(sessions: &[WorkoutSession]) -> Option<Value> {
    let mut hours: BTreeMap<&str, f64> = BTreeMap::new();
    for s in sessions {
        if let (Some(t), Some(h)) = (s.workout_type.as_deref(), s.duration_hours) {
            *hours.entry(t).or_default() += h;
        }
    }
    if hours.is_empty() {
        return None;
    }

    let types: Vec<&str> = hours.keys().copied().collect();
    let totals: Vec<f64> = hours
        .values()
        .map(|h| (h * 100.0).round() / 100.0)
        .collect();

    Some(json!({
        "data": [{
            "type": "bar",
            "x": types,
            "y": totals,
            "marker": {"color": "#e67e22"},
            "text": totals,
            "textposition": "auto"
        }],
        "layout": {
            "title": {"text": "Kopējais Treniņu Ilgums pēc Veida"},
            "xaxis": {"title": {"text": "Treniņa Veids"}},
            "yaxis": {"title": {"text": "Stundas"}},
            "plot_bgcolor": "white",
            "height": 400
        }
    }))
}

/// The multi-athlete comparison: one bar per athlete over shaded tier bands,
/// threshold lines at the band edges, tier names along the left margin, and
/// counted sessions annotated inside each bar.
///
/// Callers pass athletes already sorted ascending by load.
pub fn comparison(ranked: &[RankedAthlete], span: Option<DateSpan>) -> Value {
    let names: Vec<&str> = ranked.iter().map(|r| r.aggregate.name.as_str()).collect();
    let minutes: Vec<i64> = ranked.iter().map(|r| r.aggregate.load_minutes).collect();
    let sessions: Vec<usize> = ranked
        .iter()
        .map(|r| r.aggregate.counted_sessions)
        .collect();

    let peak = minutes.iter().copied().max().unwrap_or(0);
    let max_y = (peak + 50).max(350);

    let mut shapes = Vec::new();
    for band in CHART_BANDS.windows(2) {
        shapes.push(json!({
            "type": "rect",
            "xref": "paper", "yref": "y",
            "x0": 0, "x1": 1, "y0": band[0], "y1": band[1],
            "fillcolor": "rgba(46, 204, 113, 0.12)",
            "line": {"width": 0},
            "layer": "below"
        }));
    }
    for &threshold in &CHART_BANDS[1..CHART_BANDS.len() - 1] {
        shapes.push(json!({
            "type": "line",
            "xref": "paper", "yref": "y",
            "x0": 0, "x1": 1, "y0": threshold, "y1": threshold,
            "line": {"color": "green", "width": 3},
            "layer": "below"
        }));
    }

    let mut annotations = Vec::new();
    // Tier names spread along the axis height, outside the plot area.
    let fractions = [0.03, 0.2, 0.45, 0.7, 0.95];
    for (name, fraction) in TIER_NAMES.iter().zip(fractions) {
        annotations.push(json!({
            "xref": "paper", "yref": "y",
            "x": -0.02, "y": max_y as f64 * fraction,
            "text": name,
            "showarrow": false,
            "font": {"size": 14, "color": "#2d3436"},
            "align": "right",
            "xanchor": "right"
        }));
    }
    let label_gap = ((peak as f64 * 0.02).round() as i64).max(8);
    for ((name, &load), &count) in names.iter().zip(&minutes).zip(&sessions) {
        annotations.push(json!({
            "x": name, "y": (load as f64 * 0.5).max(10.0),
            "text": count.to_string(),
            "showarrow": false,
            "font": {"size": 10, "color": "white"}
        }));
        annotations.push(json!({
            "x": name, "y": load + label_gap,
            "xref": "x", "yref": "y",
            "text": load.to_string(),
            "showarrow": false,
            "font": {"size": 12, "color": "black"}
        }));
    }

    let title = match span {
        Some(span) => format!("Active For Life ({})", span.label()),
        None => "Active For Life".to_string(),
    };

    json!({
        "data": [{
            "type": "bar",
            "x": names,
            "y": minutes,
            "marker": {"color": "black"},
            "name": "Minūtes zonās",
            "hovertemplate": "<b>%{x}</b><br>Minūtes: %{y}<br>Sesijas: %{customdata}",
            "customdata": sessions
        }],
        "layout": {
            "title": {"text": title, "x": 0.02},
            "shapes": shapes,
            "annotations": annotations,
            "height": 600,
            "margin": {"l": 180, "r": 40, "t": 90, "b": 140},
            "yaxis": {"range": [0, max_y], "gridcolor": "rgba(0, 0, 0, 0.06)"},
            "plot_bgcolor": "white",
            "bargap": 0.15
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::rank;
    use crate::analyzers::types::AthleteAggregate;
    use crate::loader::MetricRecord;
    use crate::normalize::{metric_samples, pivot};

    fn ranked_fixture() -> Vec<RankedAthlete> {
        rank(vec![
            AthleteAggregate {
                name: "anna".to_string(),
                counted_sessions: 4,
                load_minutes: 180,
            },
            AthleteAggregate {
                name: "peteris".to_string(),
                counted_sessions: 2,
                load_minutes: 40,
            },
        ])
    }

    #[test]
    fn test_sleep_trend_requires_observations() {
        assert!(sleep_trend(&[]).is_none());

        let records = vec![MetricRecord {
            timestamp: Some("2024-01-01".to_string()),
            kind: Some("Sleep Hours".to_string()),
            value: Some("7.5".to_string()),
        }];
        let rows = pivot(&metric_samples(&records));
        let fig = sleep_trend(&rows).unwrap();

        assert_eq!(fig["data"][0]["x"][0], "2024-01-01");
        assert_eq!(fig["data"][0]["y"][0], 7.5);
    }

    #[test]
    fn test_duration_by_type_skips_untyped() {
        let sessions = vec![
            WorkoutSession {
                workout_type: Some("Run".to_string()),
                duration_hours: Some(1.5),
                ..Default::default()
            },
            WorkoutSession {
                duration_hours: Some(2.0),
                ..Default::default()
            },
        ];
        let fig = duration_by_type(&sessions).unwrap();

        assert_eq!(fig["data"][0]["x"].as_array().unwrap().len(), 1);
        assert_eq!(fig["data"][0]["y"][0], 1.5);
    }

    #[test]
    fn test_comparison_draws_bands_and_thresholds() {
        let fig = comparison(&ranked_fixture(), None);
        let shapes = fig["layout"]["shapes"].as_array().unwrap();

        let rects = shapes.iter().filter(|s| s["type"] == "rect").count();
        let lines = shapes.iter().filter(|s| s["type"] == "line").count();
        assert_eq!(rects, CHART_BANDS.len() - 1);
        assert_eq!(lines, CHART_BANDS.len() - 2);
    }

    #[test]
    fn test_comparison_orders_bars_ascending() {
        let fig = comparison(&ranked_fixture(), None);
        assert_eq!(fig["data"][0]["x"][0], "peteris");
        assert_eq!(fig["data"][0]["x"][1], "anna");
        assert_eq!(fig["data"][0]["customdata"][0], 2);
    }

    #[test]
    fn test_comparison_title_carries_date_range() {
        let span = DateSpan::from_days([
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        ]);
        let fig = comparison(&ranked_fixture(), span);

        assert_eq!(
            fig["layout"]["title"]["text"],
            "Active For Life (01.01.2024 - 31.01.2024)"
        );
    }
}
