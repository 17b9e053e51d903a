//! Error types for flow propagation.

use bf_core::BfError;
use bf_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while propagating flow or accumulating reservoirs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Missing capacity for edge {from} -> {to}")]
    MissingCapacity { from: String, to: String },

    #[error("Invalid capacity for edge {from} -> {to}: {source}")]
    InvalidCapacity {
        from: String,
        to: String,
        source: BfError,
    },

    #[error("Invalid reservoir for node {label}: {source}")]
    InvalidReservoir { label: String, source: BfError },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type FlowResult<T> = Result<T, FlowError>;
