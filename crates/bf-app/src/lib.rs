//! Shared application service layer for bottleflow.
//!
//! This crate gives front ends one entry point for loading projects,
//! compiling networks, propagating flow and writing diagrams.

pub mod compile;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod project_service;
pub mod summary;

// Re-export key types for convenience
pub use compile::{NetworkRuntime, build_capacities, build_reservoirs, compile_network};
pub use error::{AppError, AppResult};
pub use pipeline::{
    DEFAULT_OUTPUT, PipelineInput, PipelineOptions, PipelineOutput, PipelineTiming,
    RenderRequest, RenderResponse, render_network, render_network_with_progress, render_to_file,
    run,
};
pub use progress::{PipelineStage, ProgressEvent};
pub use project_service::{
    NetworkSummary, get_network, list_networks, load_project, save_project, validate_project,
};
pub use summary::{EdgeReport, FlowSummary, ReservoirReport, edge_reports, summarize};
