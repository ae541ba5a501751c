//! Report composition and serialization.
//!
//! Each invocation produces one self-contained HTML document; the only
//! external reference at view time is the Plotly runtime.

pub mod chart;
pub mod compare;
pub mod wellness;

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

pub(crate) const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.24.2.min.js";

/// Placeholder rendered for absent table cells.
pub(crate) const MISSING_CELL: &str = "-";

/// Writes a finished document to `path`.
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html).map_err(|source| Error::Render {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = html.len(), "Report written");
    Ok(())
}

/// Escapes text interpolated into HTML.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// A chart container plus the script that mounts the figure into it.
pub(crate) fn chart_div(id: &str, figure: &serde_json::Value) -> String {
    format!(
        "<div class=\"chart-container\"><div id=\"{id}\"></div></div>\n\
         <script>var fig_{id} = {figure};\n\
         Plotly.newPlot(\"{id}\", fig_{id}.data, fig_{id}.layout, {{responsive: true}});</script>\n"
    )
}
