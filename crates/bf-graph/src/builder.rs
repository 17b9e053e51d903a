//! Edge-list graph builder.

use std::collections::HashMap;

use bf_core::{EdgeId, NodeId};

use crate::error::GraphResult;
use crate::graph::{Edge, FlowGraph, Node};
use crate::validate;

/// Builder for constructing a graph from labelled edges.
///
/// Node labels are interned: the first time a label is seen it gets the
/// next `NodeId`, later mentions reuse it. Call `build()` to validate and
/// freeze the result into an immutable `FlowGraph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    by_label: HashMap<String, NodeId>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder holding every `(from, to)` pair, in order.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for (from, to) in edges {
            builder.add_edge(from.as_ref(), to.as_ref());
        }
        builder
    }

    /// Return the ID for `label`, registering a new node if needed.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.by_label.get(label) {
            return id;
        }
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            label: label.to_string(),
        });
        self.by_label.insert(label.to_string(), id);
        id
    }

    /// Append a directed edge. Repeating a pair adds a second edge.
    pub fn add_edge(&mut self, from: &str, to: &str) -> EdgeId {
        let from = self.add_node(from);
        let to = self.add_node(to);
        let id = EdgeId::from_index(self.edges.len() as u32);
        self.edges.push(Edge { id, from, to });
        id
    }

    /// Number of distinct nodes seen so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Build and validate the graph, returning an immutable `FlowGraph`.
    pub fn build(self) -> GraphResult<FlowGraph> {
        validate::validate_structure(&self.nodes, &self.edges)?;

        let (out_offsets, out_edges) = Self::build_adjacency(&self.nodes, &self.edges, |e| e.from);
        let (in_offsets, in_edges) = Self::build_adjacency(&self.nodes, &self.edges, |e| e.to);

        validate::validate_adjacency(&self.nodes, &self.edges, &out_offsets, &out_edges, |e| {
            e.from
        })?;
        validate::validate_adjacency(&self.nodes, &self.edges, &in_offsets, &in_edges, |e| e.to)?;

        Ok(FlowGraph {
            nodes: self.nodes,
            edges: self.edges,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
        })
    }

    /// Build compact adjacency lists: for each node, the edges whose
    /// `endpoint` is that node, in edge order.
    fn build_adjacency(
        nodes: &[Node],
        edges: &[Edge],
        endpoint: impl Fn(&Edge) -> NodeId,
    ) -> (Vec<usize>, Vec<EdgeId>) {
        let mut per_node: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
        for edge in edges {
            if let Some(list) = per_node.get_mut(endpoint(edge).slot()) {
                list.push(edge.id);
            }
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::with_capacity(edges.len());
        offsets.push(0);
        for list in per_node {
            flat.extend(list);
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}
