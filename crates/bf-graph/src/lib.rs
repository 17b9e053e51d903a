//! bf-graph: graph layer for bottleflow.
//!
//! Provides:
//! - Core graph data structures (Node, Edge, FlowGraph)
//! - Graph builder that interns node labels from an edge list
//! - Label lookup for capacity and reservoir bindings
//! - Kahn topological ordering with cycle reporting
//!
//! # Example
//!
//! ```
//! use bf_graph::GraphBuilder;
//!
//! let graph = GraphBuilder::from_edges([("A", "B"), ("A", "C"), ("C", "D")])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(graph.nodes().len(), 4);
//! assert_eq!(graph.edges().len(), 3);
//! assert_eq!(graph.sources().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod topo;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, FlowGraph, Node};
pub use indexing::LabelIndex;
pub use topo::{TopoOrder, has_cycle, kahn_order};
