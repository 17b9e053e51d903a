//! Edge capacities keyed by endpoint labels.

use std::collections::BTreeMap;

use bf_core::{Real, ensure_non_negative};
use bf_graph::LabelIndex;

use crate::error::{FlowError, FlowResult};

/// Capacity per `(from, to)` label pair.
///
/// Entries may name pairs that are not in the edge list; they are kept
/// and simply never read. Every capacity is finite and `>= 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapacityMap {
    entries: BTreeMap<String, BTreeMap<String, Real>>,
}

impl CapacityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(from, to, capacity)` triples.
    pub fn from_entries<I, S>(entries: I) -> FlowResult<Self>
    where
        I: IntoIterator<Item = (S, S, Real)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (from, to, capacity) in entries {
            map.insert(from, to, capacity)?;
        }
        Ok(map)
    }

    /// Set the capacity of a pair, returning the previous value if any.
    pub fn insert(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        capacity: Real,
    ) -> FlowResult<Option<Real>> {
        let from = from.into();
        let to = to.into();
        let capacity =
            ensure_non_negative(capacity, "capacity").map_err(|source| {
                FlowError::InvalidCapacity {
                    from: from.clone(),
                    to: to.clone(),
                    source,
                }
            })?;
        Ok(self.entries.entry(from).or_default().insert(to, capacity))
    }

    pub fn get(&self, from: &str, to: &str) -> Option<Real> {
        self.entries.get(from)?.get(to).copied()
    }

    /// Capacity of a pair; a missing entry is an error.
    pub fn require(&self, from: &str, to: &str) -> FlowResult<Real> {
        self.get(from, to).ok_or_else(|| FlowError::MissingCapacity {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, sorted by `(from, to)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Real)> + '_ {
        self.entries.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |(to, &cap)| (from.as_str(), to.as_str(), cap))
        })
    }

    /// Entries whose pair never occurs in the graph.
    pub fn unused<'a>(&'a self, index: &LabelIndex) -> Vec<(&'a str, &'a str)> {
        self.iter()
            .filter(|(from, to, _)| !index.contains_pair(from, to))
            .map(|(from, to, _)| (from, to))
            .collect()
    }
}
