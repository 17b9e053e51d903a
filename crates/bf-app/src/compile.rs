//! Compilation of a `NetworkDef` into runtime structures.

use std::collections::BTreeMap;

use bf_flow::{CapacityMap, ReservoirConfig, ReservoirSet};
use bf_graph::{FlowGraph, GraphBuilder, LabelIndex};
use bf_project::schema::{CapacityDef, NetworkDef, RenderDef, ReservoirDef};
use tracing::debug;

use crate::error::AppResult;

/// Runtime representation of a compiled network.
#[derive(Debug, Clone)]
pub struct NetworkRuntime {
    pub graph: FlowGraph,
    pub index: LabelIndex,
    pub capacities: CapacityMap,
    pub reservoirs: ReservoirSet,
    pub render: RenderDef,
}

/// Compile a network definition into runtime structures.
pub fn compile_network(network: &NetworkDef) -> AppResult<NetworkRuntime> {
    let graph = GraphBuilder::from_edges(
        network
            .edges
            .iter()
            .map(|edge| (edge.source(), edge.target())),
    )
    .build()?;
    let index = LabelIndex::from_graph(&graph);

    let capacities = build_capacities(&network.capacities)?;
    for (from, to) in capacities.unused(&index) {
        debug!(network = %network.id, from, to, "capacity has no matching edge");
    }

    let reservoirs = build_reservoirs(&network.reservoirs)?;
    for (label, _) in reservoirs.shown() {
        if index.find(label).is_none() {
            debug!(network = %network.id, label, "reservoir names a node outside the graph");
        }
    }

    Ok(NetworkRuntime {
        graph,
        index,
        capacities,
        reservoirs,
        render: network.render.clone(),
    })
}

/// Build a capacity map from project capacity entries.
pub fn build_capacities(defs: &[CapacityDef]) -> AppResult<CapacityMap> {
    let map = CapacityMap::from_entries(
        defs.iter()
            .map(|c| (c.from.as_str(), c.to.as_str(), c.capacity)),
    )?;
    Ok(map)
}

/// Build the reservoir set from project reservoir entries.
pub fn build_reservoirs(defs: &BTreeMap<String, ReservoirDef>) -> AppResult<ReservoirSet> {
    let mut set = ReservoirSet::new();
    for (label, def) in defs {
        set.insert(
            label.as_str(),
            ReservoirConfig {
                initial: def.initial,
                show: def.show,
            },
        )?;
    }
    Ok(set)
}
