//! Label lookup for binding external data to graph objects.
//!
//! Capacities and reservoir settings are keyed by node labels; the index
//! resolves those labels to `NodeId`s and label pairs to `EdgeId`s.

use std::collections::HashMap;

use bf_core::{EdgeId, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::FlowGraph;

/// Label → id index built once from a frozen graph.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    nodes: HashMap<String, NodeId>,

    /// `(from, to)` → every edge occurrence for that pair, in edge order.
    pairs: HashMap<(NodeId, NodeId), Vec<EdgeId>>,
}

impl LabelIndex {
    /// Build a label index from a graph.
    pub fn from_graph(graph: &FlowGraph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|n| (n.label.clone(), n.id))
            .collect();

        let mut pairs: HashMap<(NodeId, NodeId), Vec<EdgeId>> = HashMap::new();
        for edge in graph.edges() {
            pairs.entry((edge.from, edge.to)).or_default().push(edge.id);
        }

        Self { nodes, pairs }
    }

    /// Number of labelled nodes in the index.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct `(from, to)` pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Look up a node by label, if present.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.nodes.get(label).copied()
    }

    /// Look up a node by label, failing when absent.
    pub fn node_id(&self, label: &str) -> GraphResult<NodeId> {
        self.find(label).ok_or_else(|| GraphError::LabelNotFound {
            label: label.to_string(),
        })
    }

    /// All edges from `from` to `to` (empty when the pair is absent).
    pub fn edges_between(&self, from: &str, to: &str) -> &[EdgeId] {
        match (self.find(from), self.find(to)) {
            (Some(f), Some(t)) => self.pairs.get(&(f, t)).map(Vec::as_slice).unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn contains_pair(&self, from: &str, to: &str) -> bool {
        !self.edges_between(from, to).is_empty()
    }
}
