//! bf-core: stable foundation for bottleflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for graph objects)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{BfError, BfResult};
pub use ids::*;
pub use numeric::*;
