//! Sankey node/link model built from a flow solution.
//!
//! Node order is the sorted list of graph labels followed by one synthetic
//! node per shown reservoir. Every edge contributes a utilized link, plus a
//! wasted link when it has spare capacity. Reservoirs add one gray link
//! whose direction follows the sign of the level.

use std::collections::HashMap;

use bf_core::Real;
use bf_flow::{FlowSolution, ReservoirLevel};
use bf_graph::FlowGraph;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Utilized,
    Wasted,
    Reservoir,
}

/// Colors used for nodes and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub utilized: String,
    pub wasted: String,
    pub reservoir: String,
    pub node: String,
    pub reservoir_node: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            utilized: "rgba(0, 200, 0, 0.6)".to_string(),
            wasted: "rgba(220, 0, 0, 0.3)".to_string(),
            reservoir: "rgba(160, 160, 160, 0.5)".to_string(),
            node: "#cce5cc".to_string(),
            reservoir_node: "#d9d9d9".to_string(),
        }
    }
}

impl Palette {
    fn link_color(&self, kind: LinkKind) -> &str {
        match kind {
            LinkKind::Utilized => &self.utilized,
            LinkKind::Wasted => &self.wasted,
            LinkKind::Reservoir => &self.reservoir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    /// Index into `SankeyDiagram::labels`.
    pub source: usize,
    pub target: usize,
    pub value: Real,
    pub color: String,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SankeyDiagram {
    pub labels: Vec<String>,
    pub node_colors: Vec<String>,
    pub links: Vec<SankeyLink>,
}

impl SankeyDiagram {
    /// Build a diagram with the default palette.
    pub fn build(graph: &FlowGraph, solution: &FlowSolution, levels: &[ReservoirLevel]) -> Self {
        Self::build_with_palette(graph, solution, levels, &Palette::default())
    }

    pub fn build_with_palette(
        graph: &FlowGraph,
        solution: &FlowSolution,
        levels: &[ReservoirLevel],
        palette: &Palette,
    ) -> Self {
        let mut labels: Vec<String> = graph.nodes().iter().map(|n| n.label.clone()).collect();
        labels.sort();

        let positions: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();
        let slot_of: Vec<usize> = graph
            .nodes()
            .iter()
            .map(|n| positions[n.label.as_str()])
            .collect();

        let mut links = Vec::new();
        let mut push = |source: usize, target: usize, value: Real, kind: LinkKind| {
            links.push(SankeyLink {
                source,
                target,
                value,
                color: palette.link_color(kind).to_string(),
                kind,
            });
        };

        for edge in graph.edges() {
            let Some(flow) = solution.edge_flow(edge.id) else {
                warn!(
                    from = graph.label(edge.from),
                    to = graph.label(edge.to),
                    "edge has no computed flow, leaving it out of the diagram"
                );
                continue;
            };
            let (source, target) = (slot_of[edge.from.slot()], slot_of[edge.to.slot()]);
            push(source, target, flow.utilized, LinkKind::Utilized);
            if flow.has_slack() {
                push(source, target, flow.wasted(), LinkKind::Wasted);
            }
        }

        let mut node_colors = vec![palette.node.clone(); labels.len()];
        for level in levels {
            let reservoir = labels.len();
            labels.push(format!("{} reservoir", level.label));
            node_colors.push(palette.reservoir_node.clone());

            let Some(node) = level.node else {
                warn!(label = %level.label, "reservoir node has no graph counterpart to link to");
                continue;
            };
            let node = slot_of[node.slot()];
            if level.is_deficit() {
                push(reservoir, node, level.level.abs(), LinkKind::Reservoir);
            } else {
                push(node, reservoir, level.level.abs(), LinkKind::Reservoir);
            }
        }

        Self {
            labels,
            node_colors,
            links,
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn count_of(&self, kind: LinkKind) -> usize {
        self.links.iter().filter(|l| l.kind == kind).count()
    }

    pub fn node_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Links between two labelled nodes, in emission order.
    pub fn links_between(&self, from: &str, to: &str) -> Vec<&SankeyLink> {
        match (self.node_index(from), self.node_index(to)) {
            (Some(s), Some(t)) => self
                .links
                .iter()
                .filter(|l| l.source == s && l.target == t)
                .collect(),
            _ => Vec::new(),
        }
    }
}
