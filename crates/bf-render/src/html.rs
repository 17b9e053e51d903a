//! Static HTML export of a Sankey diagram.
//!
//! The page loads plotly.js from its CDN and embeds the figure as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::RenderResult;
use crate::hash::compute_diagram_id;
use crate::sankey::SankeyDiagram;

pub const DEFAULT_TITLE: &str = "Dynamic DAG Bottleneck Flow Visualization";

pub const DEFAULT_LEGEND: &str = "<b>Legend</b><br>\
    <span style='color:rgb(0,200,0)'>Green</span>: utilized flow<br>\
    <span style='color:rgb(220,0,0)'>Red</span>: wasted capacity<br>\
    <span style='color:rgb(160,160,160)'>Gray</span>: reservoir level";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOptions {
    pub title: String,
    /// Annotation shown in the top-right corner; `None` hides it.
    pub legend: Option<String>,
    pub font_size: u32,
    pub pad: u32,
    pub thickness: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            legend: Some(DEFAULT_LEGEND.to_string()),
            font_size: 12,
            pad: 20,
            thickness: 20,
        }
    }
}

/// What `write_html` produced.
#[derive(Debug, Clone)]
pub struct RenderReport {
    pub path: PathBuf,
    pub diagram_id: String,
    pub generated_at: String,
    pub bytes: usize,
}

/// Plotly figure (`data` + `layout`) for a diagram.
pub fn figure_json(diagram: &SankeyDiagram, options: &RenderOptions) -> Value {
    let annotations: Vec<Value> = options
        .legend
        .iter()
        .map(|text| {
            json!({
                "text": text,
                "showarrow": false,
                "xref": "paper",
                "yref": "paper",
                "x": 1.0,
                "y": 1.12,
                "xanchor": "right",
                "align": "left",
                "bordercolor": "#999999",
                "borderwidth": 1,
                "bgcolor": "#ffffff",
            })
        })
        .collect();

    json!({
        "data": [{
            "type": "sankey",
            "node": {
                "pad": options.pad,
                "thickness": options.thickness,
                "line": { "color": "black", "width": 0.5 },
                "label": diagram.labels,
                "color": diagram.node_colors,
            },
            "link": {
                "source": diagram.links.iter().map(|l| l.source).collect::<Vec<_>>(),
                "target": diagram.links.iter().map(|l| l.target).collect::<Vec<_>>(),
                "value": diagram.links.iter().map(|l| l.value).collect::<Vec<_>>(),
                "color": diagram.links.iter().map(|l| l.color.as_str()).collect::<Vec<_>>(),
            },
        }],
        "layout": {
            "title": { "text": options.title },
            "font": { "size": options.font_size },
            "annotations": annotations,
        },
    })
}

/// Render a complete HTML document.
///
/// The output depends only on the inputs; `generated_at` is the single
/// field that changes between otherwise identical renders.
pub fn render_html(
    diagram: &SankeyDiagram,
    options: &RenderOptions,
    generated_at: DateTime<Utc>,
) -> RenderResult<String> {
    let figure = serde_json::to_string(&figure_json(diagram, options))?;
    let diagram_id = compute_diagram_id(diagram, options);
    let generated_at = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);

    Ok(format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <meta name="diagram-id" content="{diagram_id}">
  <meta name="generated-at" content="{generated_at}">
  <title>{title}</title>
  <script src="{cdn}" charset="utf-8"></script>
  <style>
    body{{font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial;margin:0}}
    #sankey{{width:100%;height:90vh}}
    footer{{color:#57606a;font-size:12px;margin:8px 24px}}
    code{{background:#f6f8fa;border:1px solid #d0d7de;border-radius:6px;padding:1px 4px}}
  </style>
</head>
<body>
  <div id="sankey"></div>
  <footer>diagram_id: <code>{diagram_id}</code> · generated: <code>{generated_at}</code></footer>
  <script>
    const figure = {figure};
    Plotly.newPlot('sankey', figure.data, figure.layout, {{responsive: true}});
  </script>
</body>
</html>
"#,
        diagram_id = diagram_id,
        generated_at = html_escape(&generated_at),
        title = html_escape(&options.title),
        cdn = PLOTLY_CDN,
        figure = script_safe(&figure),
    ))
}

/// Render the diagram and write it to `path`, replacing any existing file.
pub fn write_html(
    path: &Path,
    diagram: &SankeyDiagram,
    options: &RenderOptions,
) -> RenderResult<RenderReport> {
    let generated_at = Utc::now();
    let html = render_html(diagram, options, generated_at)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &html)?;

    let report = RenderReport {
        path: path.to_path_buf(),
        diagram_id: compute_diagram_id(diagram, options),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        bytes: html.len(),
    };
    info!(path = %path.display(), bytes = report.bytes, "wrote diagram");
    Ok(report)
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// JSON inside <script> must not contain a literal "</"
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
