//! Content-based hashing for diagram IDs.

use sha2::{Digest, Sha256};

use crate::html::RenderOptions;
use crate::sankey::SankeyDiagram;

/// SHA-256 over the diagram and the options that shape its page.
///
/// Both are hashed as one JSON document so field boundaries and absent
/// values stay distinct.
pub fn compute_diagram_id(diagram: &SankeyDiagram, options: &RenderOptions) -> String {
    let mut hasher = Sha256::new();

    let content = serde_json::to_string(&(diagram, options)).unwrap_or_default();
    hasher.update(content.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
