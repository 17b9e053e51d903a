//! Project schema definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub networks: Vec<NetworkDef>,
}

/// One flow diagram: an edge list, its capacities and optional reservoirs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
    #[serde(default)]
    pub capacities: Vec<CapacityDef>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reservoirs: BTreeMap<String, ReservoirDef>,
    #[serde(default)]
    pub render: RenderDef,
}

/// Directed edge written as a two-element sequence: `[from, to]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeDef(pub String, pub String);

impl EdgeDef {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self(from.into(), to.into())
    }

    pub fn source(&self) -> &str {
        &self.0
    }

    pub fn target(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityDef {
    pub from: String,
    pub to: String,
    pub capacity: f64,
}

/// Reservoir settings; both fields may be omitted.
///
/// ```yaml
/// reservoirs:
///   A: { initial: 50, show: true }
///   B: { show: true }   # initial defaults to 0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReservoirDef {
    #[serde(default)]
    pub initial: f64,
    #[serde(default)]
    pub show: bool,
}

/// Presentation settings stored with a network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default = "default_true")]
    pub show_reservoirs: bool,
    /// Output path relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Default for RenderDef {
    fn default() -> Self {
        Self {
            title: None,
            legend: None,
            show_legend: default_true(),
            show_reservoirs: default_true(),
            output: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_network() {
        let yaml = r#"
version: 1
name: Demo
networks:
  - id: net
    name: Net
    edges:
      - [A, B]
    capacities:
      - { from: A, to: B, capacity: 10 }
"#;
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        let net = &project.networks[0];
        assert_eq!(net.edges, vec![EdgeDef::new("A", "B")]);
        assert_eq!(net.capacities[0].capacity, 10.0);
        assert!(net.reservoirs.is_empty());
        assert_eq!(net.render, RenderDef::default());
        assert!(net.render.show_reservoirs);
        assert!(net.render.show_legend);
    }

    #[test]
    fn legend_can_be_switched_off() {
        let yaml = r#"
title: Plain
show_legend: false
"#;
        let render: RenderDef = serde_yaml::from_str(yaml).unwrap();
        assert!(!render.show_legend);
        assert!(render.show_reservoirs);
        assert_eq!(render.legend, None);
    }

    #[test]
    fn reservoir_fields_default() {
        let yaml = r#"
A: { show: true }
B: { initial: 5 }
"#;
        let reservoirs: BTreeMap<String, ReservoirDef> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            reservoirs["A"],
            ReservoirDef {
                initial: 0.0,
                show: true
            }
        );
        assert_eq!(
            reservoirs["B"],
            ReservoirDef {
                initial: 5.0,
                show: false
            }
        );
    }

    #[test]
    fn edge_serializes_as_pair() {
        let json = serde_json::to_string(&EdgeDef::new("A", "B")).unwrap();
        assert_eq!(json, r#"["A","B"]"#);
    }
}
