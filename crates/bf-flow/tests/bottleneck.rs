//! Integration tests for bottleneck propagation and reservoirs.

use bf_flow::{
    Availability, CapacityMap, FlowProblem, ReservoirConfig, ReservoirSet, accumulate, propagate,
};
use bf_core::{Tolerances, nearly_equal};
use bf_graph::{FlowGraph, GraphBuilder, LabelIndex};
use proptest::prelude::*;

const PIPELINE: [(&str, &str); 5] = [
    ("A", "B"),
    ("A", "C"),
    ("C", "D"),
    ("D", "E1"),
    ("D", "E2"),
];

fn pipeline_caps() -> CapacityMap {
    CapacityMap::from_entries([
        ("A", "B", 100.0),
        ("A", "C", 150.0),
        ("B", "D", 30.0),
        ("C", "D", 30.0),
        ("D", "E1", 60.0),
        ("D", "E2", 60.0),
    ])
    .unwrap()
}

#[test]
fn pipeline_scenario() {
    let graph = GraphBuilder::from_edges(PIPELINE).build().unwrap();
    let caps = pipeline_caps();
    let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();

    let expected = [100.0, 150.0, 30.0, 30.0, 30.0];
    for (edge, want) in graph.edges().iter().zip(expected) {
        assert_eq!(solution.edge_flow(edge.id).unwrap().utilized, want);
    }

    // (B, D) has a capacity but is not an edge
    let index = LabelIndex::from_graph(&graph);
    assert_eq!(caps.unused(&index), vec![("B", "D")]);
}

#[test]
fn pipeline_reservoir_at_source() {
    let graph = GraphBuilder::from_edges(PIPELINE).build().unwrap();
    let caps = pipeline_caps();
    let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
    let index = LabelIndex::from_graph(&graph);

    let mut reservoirs = ReservoirSet::new();
    reservoirs
        .insert("A", ReservoirConfig::shown(50.0))
        .unwrap();
    reservoirs
        .insert("D", ReservoirConfig::shown(0.0))
        .unwrap();

    let levels = accumulate(&graph, &index, &solution, &reservoirs);
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].label, "A");
    assert_eq!(levels[0].level, 50.0 - (100.0 + 150.0));
    assert_eq!(levels[1].label, "D");
    assert_eq!(levels[1].level, 30.0 - 60.0);
}

#[test]
fn repeated_runs_are_identical() {
    let graph = GraphBuilder::from_edges(PIPELINE).build().unwrap();
    let caps = pipeline_caps();
    let first = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
    let second = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn duplicate_edges_each_carry_flow() {
    let graph = GraphBuilder::from_edges([("A", "B"), ("A", "B"), ("B", "C")])
        .build()
        .unwrap();
    let caps = CapacityMap::from_entries([("A", "B", 10.0), ("B", "C", 50.0)]).unwrap();
    let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
    let index = LabelIndex::from_graph(&graph);

    for &e in index.edges_between("A", "B") {
        assert_eq!(solution.edge_flow(e).unwrap().utilized, 10.0);
    }
    assert_eq!(solution.inflow(&graph, index.node_id("B").unwrap()), 20.0);
    assert_eq!(
        solution.availability(index.node_id("B").unwrap()),
        Availability::Bounded(10.0)
    );
}

/// Random DAG (edges go from lower to higher node number) with capacities.
fn dag_with_caps() -> impl Strategy<Value = (FlowGraph, CapacityMap)> {
    prop::collection::vec((0_u8..10, 1_u8..10, 0.0_f64..500.0), 1..30).prop_map(|raw| {
        let mut caps = CapacityMap::new();
        let mut pairs = Vec::new();
        for (a, step, cap) in raw {
            let from = format!("N{a}");
            let to = format!("N{}", a + step);
            caps.insert(from.clone(), to.clone(), cap).unwrap();
            pairs.push((from, to));
        }
        let graph = GraphBuilder::from_edges(pairs.iter().map(|(f, t)| (f.as_str(), t.as_str())))
            .build()
            .unwrap();
        (graph, caps)
    })
}

proptest! {
    #[test]
    fn utilized_never_exceeds_capacity((graph, caps) in dag_with_caps()) {
        let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
        for edge in graph.edges() {
            let flow = solution.edge_flow(edge.id).unwrap();
            prop_assert!(flow.utilized <= flow.capacity);
            prop_assert!(flow.wasted() >= 0.0);
        }
    }

    #[test]
    fn availability_is_min_of_inbound((graph, caps) in dag_with_caps()) {
        let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
        for node in graph.nodes() {
            let inbound = graph.in_edges(node.id);
            let availability = solution.availability(node.id);
            if inbound.is_empty() {
                prop_assert!(availability.is_unbounded());
            } else {
                let min = inbound
                    .iter()
                    .map(|&e| solution.edge_flow(e).unwrap().utilized)
                    .fold(f64::INFINITY, f64::min);
                prop_assert_eq!(availability, Availability::Bounded(min));
            }
        }
    }

    #[test]
    fn utilized_is_min_of_upstream_and_capacity((graph, caps) in dag_with_caps()) {
        let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
        for edge in graph.edges() {
            let flow = solution.edge_flow(edge.id).unwrap();
            let upstream = solution.availability(edge.from);
            prop_assert_eq!(flow.utilized, upstream.limit(flow.capacity));
        }
    }

    #[test]
    fn reservoir_level_balances_flows((graph, caps) in dag_with_caps(), initial in -100.0_f64..100.0) {
        let solution = propagate(&FlowProblem::new(&graph, &caps)).unwrap();
        let index = LabelIndex::from_graph(&graph);
        let mut set = ReservoirSet::new();
        for node in graph.nodes() {
            set.insert(node.label.clone(), ReservoirConfig::shown(initial)).unwrap();
        }

        let levels = accumulate(&graph, &index, &solution, &set);
        prop_assert_eq!(levels.len(), graph.nodes().len());
        for level in &levels {
            let node = level.node.unwrap();
            let sum = |edges: &[bf_core::EdgeId]| -> f64 {
                edges.iter().rev().map(|&e| solution.edge_flow(e).unwrap().utilized).sum()
            };
            let expected = initial + sum(graph.in_edges(node)) - sum(graph.out_edges(node));
            prop_assert!(
                nearly_equal(level.level, expected, Tolerances { abs: 1e-9, rel: 1e-9 }),
                "{} != {}", level.level, expected
            );
        }
    }
}
