//! bf-render: Sankey diagram model and static HTML export.

pub mod hash;
pub mod html;
pub mod sankey;

pub use hash::compute_diagram_id;
pub use html::{
    DEFAULT_LEGEND, DEFAULT_TITLE, RenderOptions, RenderReport, figure_json, render_html,
    write_html,
};
pub use sankey::{LinkKind, Palette, SankeyDiagram, SankeyLink};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
