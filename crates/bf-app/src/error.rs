//! Error types for the bf-app service layer.

use std::path::PathBuf;

use bf_flow::FlowError;
use bf_graph::GraphError;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write diagram: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<bf_project::ProjectError> for AppError {
    fn from(err: bf_project::ProjectError) -> Self {
        match err {
            bf_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<bf_render::RenderError> for AppError {
    fn from(err: bf_render::RenderError) -> Self {
        match err {
            bf_render::RenderError::Io(source) => AppError::Io(source),
            other => AppError::Render(other.to_string()),
        }
    }
}

impl AppError {
    /// True when the failure is a cycle in the edge list.
    pub fn is_cycle(&self) -> bool {
        matches!(
            self,
            AppError::Graph(GraphError::CycleDetected { .. })
                | AppError::Flow(FlowError::Graph(GraphError::CycleDetected { .. }))
        )
    }
}
