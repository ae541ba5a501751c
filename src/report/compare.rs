//! The multi-athlete comparison page: one full-width load chart.

use crate::analyzers::types::{DateSpan, RankedAthlete};
use crate::report::{PLOTLY_CDN, chart, chart_div};

pub fn render(ranked: &[RankedAthlete], span: Option<DateSpan>) -> String {
    let figure = chart::comparison(ranked, span);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Active For Life — Kopsavilkums</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: white;
            color: #2d3436;
        }}
        .chart-container {{
            max-width: 1400px;
            margin: 0 auto;
        }}
    </style>
    <script src="{plotly}"></script>
</head>
<body>
{chart}</body>
</html>
"#,
        plotly = PLOTLY_CDN,
        chart = chart_div("load_chart", &figure),
    )
}
