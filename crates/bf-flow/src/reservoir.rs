//! Reservoir accumulation: stock level from net inflow at selected nodes.

use std::collections::BTreeMap;

use bf_core::{NodeId, Real, ensure_finite};
use bf_graph::{FlowGraph, LabelIndex};
use tracing::debug;

use crate::error::{FlowError, FlowResult};
use crate::solution::FlowSolution;

/// Reservoir settings for one node.
///
/// Defaults: `initial = 0`, `show = false`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReservoirConfig {
    /// Stock held before any flow is applied.
    pub initial: Real,
    /// Only shown reservoirs are accumulated and drawn.
    pub show: bool,
}

impl ReservoirConfig {
    /// A visible reservoir starting at `initial`.
    pub fn shown(initial: Real) -> Self {
        Self {
            initial,
            show: true,
        }
    }
}

/// Reservoir settings keyed by node label, iterated in label order.
///
/// Starts empty; nodes without an entry have no reservoir.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservoirSet {
    configs: BTreeMap<String, ReservoirConfig>,
}

impl ReservoirSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, config: ReservoirConfig) -> FlowResult<()> {
        let label = label.into();
        ensure_finite(config.initial, "reservoir initial").map_err(|source| {
            FlowError::InvalidReservoir {
                label: label.clone(),
                source,
            }
        })?;
        self.configs.insert(label, config);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&ReservoirConfig> {
        self.configs.get(label)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Entries with `show = true`.
    pub fn shown(&self) -> impl Iterator<Item = (&str, &ReservoirConfig)> + '_ {
        self.configs
            .iter()
            .filter(|(_, c)| c.show)
            .map(|(label, c)| (label.as_str(), c))
    }
}

/// Accumulated stock at one node.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirLevel {
    pub label: String,
    /// `None` when the label is not a node of the graph.
    pub node: Option<NodeId>,
    pub initial: Real,
    pub inflow: Real,
    pub outflow: Real,
    /// `initial + inflow - outflow`
    pub level: Real,
}

impl ReservoirLevel {
    /// Level below zero: the node sends out more than it holds and receives.
    pub fn is_deficit(&self) -> bool {
        self.level < 0.0
    }
}

/// Compute the level of every shown reservoir.
///
/// Labels that don't name a graph node are tolerated: their inflow and
/// outflow are zero, so the level equals `initial`.
pub fn accumulate(
    graph: &FlowGraph,
    index: &LabelIndex,
    solution: &FlowSolution,
    reservoirs: &ReservoirSet,
) -> Vec<ReservoirLevel> {
    reservoirs
        .shown()
        .map(|(label, config)| {
            let node = index.find(label);
            let (inflow, outflow) = match node {
                Some(id) => (solution.inflow(graph, id), solution.outflow(graph, id)),
                None => {
                    debug!(label, "reservoir configured for unknown node");
                    (0.0, 0.0)
                }
            };
            ReservoirLevel {
                label: label.to_string(),
                node,
                initial: config.initial,
                inflow,
                outflow,
                level: config.initial + inflow - outflow,
            }
        })
        .collect()
}
