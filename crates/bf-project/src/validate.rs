//! Project validation logic.

use crate::schema::{NetworkDef, Project};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Duplicate capacity for edge {from} -> {to} in {context}")]
    DuplicateCapacity {
        from: String,
        to: String,
        context: String,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Network '{id}' has no edges")]
    EmptyNetwork { id: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Check a project before it is compiled.
///
/// Missing capacities are deliberately not checked here: they surface when
/// propagation reads the capacity of the edge.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut network_ids = HashSet::new();
    for network in &project.networks {
        if !network_ids.insert(&network.id) {
            return Err(ValidationError::DuplicateId {
                id: network.id.clone(),
                context: "networks".to_string(),
            });
        }
        validate_network(network)?;
    }

    Ok(())
}

fn validate_network(network: &NetworkDef) -> Result<(), ValidationError> {
    if network.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "network id".to_string(),
            value: network.id.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    if network.edges.is_empty() {
        return Err(ValidationError::EmptyNetwork {
            id: network.id.clone(),
        });
    }

    for edge in &network.edges {
        for label in [edge.source(), edge.target()] {
            if label.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("network '{}' edge node", network.id),
                    value: label.to_string(),
                    reason: "node labels must not be empty".to_string(),
                });
            }
        }
    }

    let mut pairs = HashSet::new();
    for cap in &network.capacities {
        if !pairs.insert((cap.from.as_str(), cap.to.as_str())) {
            return Err(ValidationError::DuplicateCapacity {
                from: cap.from.clone(),
                to: cap.to.clone(),
                context: format!("network '{}'", network.id),
            });
        }
        validate_non_negative_finite(
            &format!("capacity {} -> {}", cap.from, cap.to),
            cap.capacity,
            &network.id,
        )?;
    }

    for (label, reservoir) in &network.reservoirs {
        if !reservoir.initial.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("network '{}' reservoir '{}' initial", network.id, label),
                value: reservoir.initial.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_non_negative_finite(
    field: &str,
    value: f64,
    network_id: &str,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("network '{}' {}", network_id, field),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}
