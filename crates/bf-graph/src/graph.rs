//! Core graph data structures.

use bf_core::{EdgeId, NodeId};

/// A node in the flow graph.
///
/// Nodes carry no data beyond their label; they exist because an edge
/// mentions them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
}

/// A directed edge, one per occurrence in the input edge list.
///
/// Repeated `(from, to)` pairs are kept as separate edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
}

/// The graph: a validated, immutable collection of nodes and edges.
///
/// The graph stores:
/// - All nodes and edges in vectors (indexed by their IDs).
/// - Compact outbound and inbound adjacency per node, in edge insertion order.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,

    /// Node i's outbound edges are `out_edges[out_offsets[i]..out_offsets[i+1]]`.
    pub(crate) out_offsets: Vec<usize>,
    pub(crate) out_edges: Vec<EdgeId>,

    /// Node i's inbound edges are `in_edges[in_offsets[i]..in_offsets[i+1]]`.
    pub(crate) in_offsets: Vec<usize>,
    pub(crate) in_edges: Vec<EdgeId>,
}

impl FlowGraph {
    /// Return all nodes, in first-appearance order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges, in edge-list order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    /// Get an edge by ID (returns None if ID out of bounds).
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.slot())
    }

    /// Label of a node, or `""` for an unknown ID.
    pub fn label(&self, id: NodeId) -> &str {
        self.node(id).map_or("", |n| n.label.as_str())
    }

    /// Outbound edges of a node, in edge-list order.
    pub fn out_edges(&self, node_id: NodeId) -> &[EdgeId] {
        Self::slice(&self.out_offsets, &self.out_edges, node_id)
    }

    /// Inbound edges of a node, in edge-list order.
    pub fn in_edges(&self, node_id: NodeId) -> &[EdgeId] {
        Self::slice(&self.in_offsets, &self.in_edges, node_id)
    }

    /// Successor nodes, one entry per outbound edge (duplicates included).
    pub fn successors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node_id)
            .iter()
            .filter_map(|&e| self.edge(e).map(|edge| edge.to))
    }

    /// Number of inbound edges. Duplicate edges count twice.
    pub fn in_degree(&self, node_id: NodeId) -> usize {
        self.in_edges(node_id).len()
    }

    pub fn out_degree(&self, node_id: NodeId) -> usize {
        self.out_edges(node_id).len()
    }

    /// Nodes with no inbound edges, in node order.
    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .map(|n| n.id)
            .filter(|&id| self.in_degree(id) == 0)
            .collect()
    }

    /// Labels of an edge's endpoints.
    pub fn edge_labels(&self, id: EdgeId) -> Option<(&str, &str)> {
        let edge = self.edge(id)?;
        Some((self.label(edge.from), self.label(edge.to)))
    }

    fn slice<'a>(offsets: &[usize], flat: &'a [EdgeId], node_id: NodeId) -> &'a [EdgeId] {
        let idx = node_id.slot();
        if idx + 1 >= offsets.len() {
            return &[];
        }
        &flat[offsets[idx]..offsets[idx + 1]]
    }
}
