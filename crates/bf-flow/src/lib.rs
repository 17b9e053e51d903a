//! Bottleneck flow propagation over capacity-limited DAGs.
//!
//! Every node starts with unbounded availability. Walking the graph in
//! topological order, each edge carries `min(availability of its source,
//! its capacity)` and each node's availability drops to the smallest flow
//! that reaches it. Reservoir accumulation turns the resulting per-node
//! inflow and outflow into a synthetic stock level.

pub mod availability;
pub mod capacity;
pub mod error;
pub mod problem;
pub mod propagate;
pub mod reservoir;
pub mod solution;

pub use availability::Availability;
pub use capacity::CapacityMap;
pub use error::{FlowError, FlowResult};
pub use problem::{CycleMode, FlowProblem};
pub use propagate::propagate;
pub use reservoir::{ReservoirConfig, ReservoirLevel, ReservoirSet, accumulate};
pub use solution::{EdgeFlow, FlowSolution};
