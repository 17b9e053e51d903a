//! Flow summary reported after a run.

use bf_core::Real;
use bf_flow::{FlowSolution, ReservoirLevel};
use bf_graph::FlowGraph;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeReport {
    pub from: String,
    pub to: String,
    pub capacity: Real,
    pub utilized: Real,
    pub wasted: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservoirReport {
    pub label: String,
    pub initial: Real,
    pub inflow: Real,
    pub outflow: Real,
    pub level: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_capacity: Real,
    pub total_utilized: Real,
    pub total_wasted: Real,
    pub saturated_edges: usize,
    /// Labels a lenient run could not order.
    pub unresolved: Vec<String>,
    pub edges: Vec<EdgeReport>,
    pub reservoirs: Vec<ReservoirReport>,
}

/// One row per edge that received a flow, in edge order.
pub fn edge_reports(graph: &FlowGraph, solution: &FlowSolution) -> Vec<EdgeReport> {
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let flow = solution.edge_flow(edge.id)?;
            Some(EdgeReport {
                from: graph.label(edge.from).to_string(),
                to: graph.label(edge.to).to_string(),
                capacity: flow.capacity,
                utilized: flow.utilized,
                wasted: flow.wasted(),
            })
        })
        .collect()
}

pub fn summarize(
    graph: &FlowGraph,
    solution: &FlowSolution,
    levels: &[ReservoirLevel],
) -> FlowSummary {
    FlowSummary {
        node_count: graph.nodes().len(),
        edge_count: graph.edges().len(),
        total_capacity: solution.total_capacity(),
        total_utilized: solution.total_utilized(),
        total_wasted: solution.total_wasted(),
        saturated_edges: solution.saturated_edges().len(),
        unresolved: solution
            .unresolved
            .iter()
            .map(|&id| graph.label(id).to_string())
            .collect(),
        edges: edge_reports(graph, solution),
        reservoirs: levels
            .iter()
            .map(|l| ReservoirReport {
                label: l.label.clone(),
                initial: l.initial,
                inflow: l.inflow,
                outflow: l.outflow,
                level: l.level,
            })
            .collect(),
    }
}
