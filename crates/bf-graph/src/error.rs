//! Graph-specific error types.

use bf_core::{BfError, EdgeId, NodeId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction, lookup, and ordering errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge refers to a node that doesn't exist.
    InvalidNodeRef { edge: EdgeId, node: NodeId },

    /// Two nodes were registered under the same label.
    DuplicateLabel { label: String },

    /// Adjacency list is inconsistent (edge listed under a node it doesn't touch).
    InconsistentAdjacency { edge: EdgeId, node: NodeId },

    /// No node carries this label.
    LabelNotFound { label: String },

    /// The edge list contains at least one cycle; `nodes` are the labels
    /// the topological sort could not place.
    CycleDetected { nodes: Vec<String> },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidNodeRef { edge, node } => {
                write!(f, "Edge {} refers to non-existent node {}", edge, node)
            }
            GraphError::DuplicateLabel { label } => {
                write!(f, "Node label '{}' is registered twice", label)
            }
            GraphError::InconsistentAdjacency { edge, node } => {
                write!(
                    f,
                    "Edge {} in node {}'s adjacency list but doesn't touch that node",
                    edge, node
                )
            }
            GraphError::LabelNotFound { label } => {
                write!(f, "Node '{}' not found", label)
            }
            GraphError::CycleDetected { nodes } => {
                write!(f, "Cycle detected; unordered nodes: {}", nodes.join(", "))
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for BfError {
    fn from(err: GraphError) -> Self {
        BfError::Invariant {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_nodes() {
        let err = GraphError::CycleDetected {
            nodes: vec!["B".to_string(), "C".to_string()],
        };
        assert_eq!(err.to_string(), "Cycle detected; unordered nodes: B, C");
    }

    #[test]
    fn converts_to_core_invariant() {
        let err: BfError = GraphError::LabelNotFound {
            label: "Q".to_string(),
        }
        .into();
        assert_eq!(
            err,
            BfError::Invariant {
                what: "Node 'Q' not found".to_string()
            }
        );
    }
}
