//! Topological ordering (Kahn's algorithm).

use std::collections::VecDeque;

use bf_core::NodeId;

use crate::error::{GraphError, GraphResult};
use crate::graph::FlowGraph;

/// Result of a Kahn pass over a graph.
///
/// `order` holds every node the sort could place. Nodes on or downstream
/// of a cycle never reach zero in-degree; they end up in `unresolved`
/// instead of raising an error, so callers pick the strictness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopoOrder {
    pub order: Vec<NodeId>,
    pub unresolved: Vec<NodeId>,
}

impl TopoOrder {
    /// True when every node was placed (the graph is acyclic).
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Return the full order, or `CycleDetected` naming the unplaced nodes.
    pub fn require_complete(self, graph: &FlowGraph) -> GraphResult<Vec<NodeId>> {
        if self.is_complete() {
            return Ok(self.order);
        }
        Err(GraphError::CycleDetected {
            nodes: self
                .unresolved
                .iter()
                .map(|&id| graph.label(id).to_string())
                .collect(),
        })
    }
}

/// Order the graph's nodes so every edge points forward.
///
/// The ready queue is seeded with zero-in-degree nodes in node order and
/// successors are released in edge order, so ties always break by
/// insertion order.
pub fn kahn_order(graph: &FlowGraph) -> TopoOrder {
    let mut remaining: Vec<usize> = graph
        .nodes()
        .iter()
        .map(|n| graph.in_degree(n.id))
        .collect();

    let mut queue: VecDeque<NodeId> = graph
        .nodes()
        .iter()
        .map(|n| n.id)
        .filter(|id| remaining[id.slot()] == 0)
        .collect();

    let mut order = Vec::with_capacity(graph.nodes().len());
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for succ in graph.successors(node) {
            let degree = &mut remaining[succ.slot()];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    let unresolved: Vec<NodeId> = graph
        .nodes()
        .iter()
        .map(|n| n.id)
        .filter(|id| remaining[id.slot()] > 0)
        .collect();

    if !unresolved.is_empty() {
        tracing::debug!(
            placed = order.len(),
            unresolved = unresolved.len(),
            "topological sort left nodes unplaced"
        );
    }

    TopoOrder { order, unresolved }
}

/// True if the graph contains at least one cycle.
pub fn has_cycle(graph: &FlowGraph) -> bool {
    !kahn_order(graph).is_complete()
}
