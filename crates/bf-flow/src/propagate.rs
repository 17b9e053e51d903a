//! Bottleneck propagation in topological order.

use bf_graph::{GraphError, kahn_order};
use tracing::{debug, warn};

use crate::availability::Availability;
use crate::error::FlowResult;
use crate::problem::{CycleMode, FlowProblem};
use crate::solution::{EdgeFlow, FlowSolution};

/// Compute utilized flow for every edge and availability for every node.
///
/// For each node `u` in topological order and each outbound edge `(u, v)`:
/// `utilized = min(available[u], capacity[(u, v)])`, then
/// `available[v] = min(available[v], utilized)`. Sources keep
/// `Availability::Unbounded`.
///
/// In `CycleMode::Strict` a cycle is an error. In `CycleMode::Lenient` the
/// unplaced nodes are reported in `FlowSolution::unresolved`, their
/// availability is `Availability::Unresolved` and their outbound edges keep
/// no flow.
pub fn propagate(problem: &FlowProblem) -> FlowResult<FlowSolution> {
    let graph = problem.graph;
    let topo = kahn_order(graph);

    let (order, unresolved) = match problem.cycle_mode {
        CycleMode::Strict => (topo.require_complete(graph)?, Vec::new()),
        CycleMode::Lenient => {
            if !topo.is_complete() {
                let labels: Vec<&str> = topo.unresolved.iter().map(|&n| graph.label(n)).collect();
                warn!(
                    nodes = %labels.join(", "),
                    "graph contains a cycle; flow left unset for unordered nodes"
                );
            }
            (topo.order, topo.unresolved)
        }
    };

    let mut available = vec![Availability::Unbounded; graph.nodes().len()];
    for &n in &unresolved {
        available[n.slot()] = Availability::Unresolved;
    }
    let mut edge_flows: Vec<Option<EdgeFlow>> = vec![None; graph.edges().len()];

    for &u in &order {
        let upstream = available[u.slot()];
        for &edge_id in graph.out_edges(u) {
            let edge = graph
                .edge(edge_id)
                .ok_or(GraphError::InconsistentAdjacency {
                    edge: edge_id,
                    node: u,
                })?;
            let from = graph.label(edge.from);
            let to = graph.label(edge.to);

            let capacity = problem.capacities.require(from, to)?;
            let utilized = upstream.limit(capacity);
            edge_flows[edge_id.slot()] = Some(EdgeFlow { capacity, utilized });

            let downstream = &mut available[edge.to.slot()];
            *downstream = downstream.constrain(utilized);

            debug!(from, to, capacity, utilized, "propagated edge");
        }
    }

    Ok(FlowSolution {
        order,
        unresolved,
        available,
        edge_flows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::CapacityMap;
    use crate::error::FlowError;
    use bf_graph::{FlowGraph, GraphBuilder, LabelIndex};

    fn pipeline() -> (FlowGraph, CapacityMap) {
        let graph = GraphBuilder::from_edges([
            ("A", "B"),
            ("A", "C"),
            ("C", "D"),
            ("D", "E1"),
            ("D", "E2"),
        ])
        .build()
        .unwrap();
        let caps = CapacityMap::from_entries([
            ("A", "B", 100.0),
            ("A", "C", 150.0),
            ("B", "D", 30.0),
            ("C", "D", 30.0),
            ("D", "E1", 60.0),
            ("D", "E2", 60.0),
        ])
        .unwrap();
        (graph, caps)
    }

    fn utilized(graph: &FlowGraph, solution: &FlowSolution, from: &str, to: &str) -> f64 {
        let index = LabelIndex::from_graph(graph);
        let edge = index.edges_between(from, to)[0];
        solution.edge_flow(edge).unwrap().utilized
    }

    #[test]
    fn pipeline_bottleneck() {
        let (graph, caps) = pipeline();
        let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();

        assert_eq!(utilized(&graph, &solution, "A", "B"), 100.0);
        assert_eq!(utilized(&graph, &solution, "A", "C"), 150.0);
        assert_eq!(utilized(&graph, &solution, "C", "D"), 30.0);
        assert_eq!(utilized(&graph, &solution, "D", "E1"), 30.0);
        assert_eq!(utilized(&graph, &solution, "D", "E2"), 30.0);
        assert!(solution.is_complete());
    }

    #[test]
    fn sources_stay_unbounded() {
        let (graph, caps) = pipeline();
        let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
        let index = LabelIndex::from_graph(&graph);

        assert!(solution.availability(index.node_id("A").unwrap()).is_unbounded());
        assert_eq!(
            solution.availability(index.node_id("D").unwrap()),
            Availability::Bounded(30.0)
        );
    }

    #[test]
    fn merge_takes_smallest_inflow() {
        let graph = GraphBuilder::from_edges([("A", "M"), ("B", "M"), ("M", "Z")])
            .build()
            .unwrap();
        let caps =
            CapacityMap::from_entries([("A", "M", 40.0), ("B", "M", 15.0), ("M", "Z", 100.0)])
                .unwrap();
        let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();

        assert_eq!(utilized(&graph, &solution, "M", "Z"), 15.0);
    }

    #[test]
    fn missing_capacity_fails() {
        let graph = GraphBuilder::from_edges([("A", "B"), ("B", "C")])
            .build()
            .unwrap();
        let caps = CapacityMap::from_entries([("A", "B", 1.0)]).unwrap();

        let err = propagate(&FlowProblem::new(&graph, &caps)).unwrap_err();
        assert_eq!(
            err,
            FlowError::MissingCapacity {
                from: "B".to_string(),
                to: "C".to_string()
            }
        );
    }

    #[test]
    fn strict_mode_rejects_cycles() {
        let graph = GraphBuilder::from_edges([("A", "B"), ("B", "C"), ("C", "B")])
            .build()
            .unwrap();
        let caps =
            CapacityMap::from_entries([("A", "B", 5.0), ("B", "C", 5.0), ("C", "B", 5.0)]).unwrap();

        let err = propagate(&FlowProblem::new(&graph, &caps)).unwrap_err();
        assert!(matches!(
            err,
            FlowError::Graph(GraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn lenient_mode_keeps_partial_result() {
        let graph = GraphBuilder::from_edges([("A", "B"), ("B", "C"), ("C", "B")])
            .build()
            .unwrap();
        let caps =
            CapacityMap::from_entries([("A", "B", 5.0), ("B", "C", 7.0), ("C", "B", 9.0)]).unwrap();
        let problem = FlowProblem::new(&graph, &caps).with_cycle_mode(CycleMode::Lenient);

        let solution = propagate(&problem).unwrap();
        assert_eq!(solution.unresolved.len(), 2);
        assert_eq!(utilized(&graph, &solution, "A", "B"), 5.0);

        let index = LabelIndex::from_graph(&graph);
        assert!(
            solution
                .edge_flow(index.edges_between("B", "C")[0])
                .is_none()
        );
        assert!(!solution.is_complete());
    }

    #[test]
    fn lenient_mode_marks_nodes_past_a_cycle_unresolved() {
        let graph = GraphBuilder::from_edges([("A", "B"), ("B", "C"), ("C", "B"), ("C", "D")])
            .build()
            .unwrap();
        let caps = CapacityMap::from_entries([
            ("A", "B", 5.0),
            ("B", "C", 7.0),
            ("C", "B", 9.0),
            ("C", "D", 3.0),
        ])
        .unwrap();
        let problem = FlowProblem::new(&graph, &caps).with_cycle_mode(CycleMode::Lenient);
        let solution = propagate(&problem).unwrap();
        let index = LabelIndex::from_graph(&graph);

        let d = index.node_id("D").unwrap();
        assert_eq!(graph.in_edges(d).len(), 1);
        assert!(solution.unresolved.contains(&d));
        assert_eq!(solution.availability(d), Availability::Unresolved);
        for label in ["B", "C"] {
            assert!(solution.availability(index.node_id(label).unwrap()).is_unresolved());
        }
        assert!(solution.availability(index.node_id("A").unwrap()).is_unbounded());
    }

    #[test]
    fn zero_capacity_blocks_downstream() {
        let graph = GraphBuilder::from_edges([("A", "B"), ("B", "C")])
            .build()
            .unwrap();
        let caps = CapacityMap::from_entries([("A", "B", 0.0), ("B", "C", 10.0)]).unwrap();
        let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();

        assert_eq!(utilized(&graph, &solution, "B", "C"), 0.0);
    }
}
