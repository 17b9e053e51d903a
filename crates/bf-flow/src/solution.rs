//! Propagation results.

use bf_core::{EdgeId, NodeId, Real};
use bf_graph::FlowGraph;

use crate::availability::Availability;

/// Flow computed for one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeFlow {
    pub capacity: Real,
    pub utilized: Real,
}

impl EdgeFlow {
    /// Unused part of the capacity; never negative.
    pub fn wasted(&self) -> Real {
        self.capacity - self.utilized
    }

    /// True when some capacity is left unused.
    pub fn has_slack(&self) -> bool {
        self.capacity > self.utilized
    }
}

/// Flow values for a whole graph.
///
/// Indexed by `NodeId` / `EdgeId` slots of the graph it was computed on.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSolution {
    /// Nodes in the order they were visited.
    pub order: Vec<NodeId>,
    /// Nodes the topological sort could not place (lenient mode only).
    pub unresolved: Vec<NodeId>,
    /// Availability per node; `Unresolved` for nodes in `unresolved`.
    pub available: Vec<Availability>,
    /// Flow per edge; `None` for edges leaving unresolved nodes.
    pub edge_flows: Vec<Option<EdgeFlow>>,
}

impl FlowSolution {
    pub fn edge_flow(&self, id: EdgeId) -> Option<EdgeFlow> {
        self.edge_flows.get(id.slot()).copied().flatten()
    }

    pub fn availability(&self, id: NodeId) -> Availability {
        self.available.get(id.slot()).copied().unwrap_or_default()
    }

    /// True when every edge received a flow.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.edge_flows.iter().all(Option::is_some)
    }

    /// Sum of utilized flow over a node's inbound edges.
    pub fn inflow(&self, graph: &FlowGraph, node: NodeId) -> Real {
        self.sum_utilized(graph.in_edges(node))
    }

    /// Sum of utilized flow over a node's outbound edges.
    pub fn outflow(&self, graph: &FlowGraph, node: NodeId) -> Real {
        self.sum_utilized(graph.out_edges(node))
    }

    pub fn total_capacity(&self) -> Real {
        self.resolved().map(|f| f.capacity).sum()
    }

    pub fn total_utilized(&self) -> Real {
        self.resolved().map(|f| f.utilized).sum()
    }

    pub fn total_wasted(&self) -> Real {
        self.resolved().map(|f| f.wasted()).sum()
    }

    /// Edges running at full capacity.
    pub fn saturated_edges(&self) -> Vec<EdgeId> {
        self.edge_flows
            .iter()
            .enumerate()
            .filter_map(|(i, f)| match f {
                Some(flow) if !flow.has_slack() => Some(EdgeId::from_index(i as u32)),
                _ => None,
            })
            .collect()
    }

    fn resolved(&self) -> impl Iterator<Item = &EdgeFlow> + '_ {
        self.edge_flows.iter().flatten()
    }

    fn sum_utilized(&self, edges: &[EdgeId]) -> Real {
        edges
            .iter()
            .filter_map(|&e| self.edge_flow(e))
            .map(|f| f.utilized)
            .sum()
    }
}
