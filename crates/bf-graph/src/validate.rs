//! Graph validation logic.

use std::collections::HashSet;

use bf_core::{EdgeId, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Node};

/// Validate the graph structure: ids are contiguous, labels are unique,
/// and every edge endpoint exists.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
    let mut labels = HashSet::new();
    for (i, node) in nodes.iter().enumerate() {
        if node.id.slot() != i {
            return Err(GraphError::InvalidNodeRef {
                edge: EdgeId::from_index(0),
                node: node.id,
            });
        }
        if !labels.insert(node.label.as_str()) {
            return Err(GraphError::DuplicateLabel {
                label: node.label.clone(),
            });
        }
    }

    for (i, edge) in edges.iter().enumerate() {
        if edge.id.slot() != i {
            return Err(GraphError::InconsistentAdjacency {
                edge: edge.id,
                node: edge.from,
            });
        }
        for node in [edge.from, edge.to] {
            if node.slot() >= nodes.len() {
                return Err(GraphError::InvalidNodeRef {
                    edge: edge.id,
                    node,
                });
            }
        }
    }

    Ok(())
}

/// Validate one direction of adjacency lists for consistency.
pub(crate) fn validate_adjacency(
    nodes: &[Node],
    edges: &[Edge],
    offsets: &[usize],
    flat: &[EdgeId],
    endpoint: impl Fn(&Edge) -> NodeId,
) -> GraphResult<()> {
    // Offsets array has one entry per node plus the trailing end
    if offsets.len() != nodes.len() + 1 {
        return Err(GraphError::InconsistentAdjacency {
            edge: EdgeId::from_index(0),
            node: nodes.first().map_or(NodeId::from_index(0), |n| n.id),
        });
    }

    for node in nodes {
        let idx = node.id.slot();
        for &edge_id in &flat[offsets[idx]..offsets[idx + 1]] {
            let edge = edges
                .get(edge_id.slot())
                .ok_or(GraphError::InconsistentAdjacency {
                    edge: edge_id,
                    node: node.id,
                })?;
            if endpoint(edge) != node.id {
                return Err(GraphError::InconsistentAdjacency {
                    edge: edge_id,
                    node: node.id,
                });
            }
        }
    }

    // Every edge appears exactly once
    let mut seen: HashSet<EdgeId> = HashSet::new();
    for &edge_id in flat {
        if !seen.insert(edge_id) {
            return Err(GraphError::InconsistentAdjacency {
                edge: edge_id,
                node: edges.get(edge_id.slot()).map_or(NodeId::from_index(0), &endpoint),
            });
        }
    }
    for edge in edges {
        if !seen.contains(&edge.id) {
            return Err(GraphError::InconsistentAdjacency {
                edge: edge.id,
                node: endpoint(edge),
            });
        }
    }

    Ok(())
}
