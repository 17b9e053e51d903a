//! Problem definition for flow propagation.

use bf_graph::FlowGraph;

use crate::capacity::CapacityMap;

/// What to do when the edge list contains a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleMode {
    /// Fail with `CycleDetected` before any flow is computed.
    #[default]
    Strict,
    /// Propagate over the nodes that could be ordered; edges leaving
    /// unordered nodes get no flow.
    Lenient,
}

/// A graph plus the capacities of its edges.
#[derive(Debug, Clone, Copy)]
pub struct FlowProblem<'a> {
    /// Network topology
    pub graph: &'a FlowGraph,

    /// Capacity per `(from, to)` label pair
    pub capacities: &'a CapacityMap,

    pub cycle_mode: CycleMode,
}

impl<'a> FlowProblem<'a> {
    /// Create a problem in strict cycle mode.
    pub fn new(graph: &'a FlowGraph, capacities: &'a CapacityMap) -> Self {
        Self {
            graph,
            capacities,
            cycle_mode: CycleMode::Strict,
        }
    }

    pub fn with_cycle_mode(mut self, cycle_mode: CycleMode) -> Self {
        self.cycle_mode = cycle_mode;
        self
    }
}
