//! Project loading, saving, validation, and introspection.

use std::collections::BTreeSet;
use std::path::Path;

use bf_project::ProjectError;
use bf_project::schema::{NetworkDef, Project};

use crate::error::{AppError, AppResult};

/// Summary of a network for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
    pub id: String,
    pub name: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub capacity_count: usize,
    pub reservoir_count: usize,
    pub shown_reservoir_count: usize,
}

/// Load and validate a project (`.json` or YAML).
pub fn load_project(path: &Path) -> AppResult<Project> {
    bf_project::load(path).map_err(|e| match e {
        ProjectError::Io(source) => AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Save a project, picking the format from the file extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let result = if is_json {
        bf_project::save_json(path, project)
    } else {
        bf_project::save_yaml(path, project)
    };

    result.map_err(|e| match e {
        ProjectError::Io(source) => AppError::ProjectFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Validate project structure.
pub fn validate_project(project: &Project) -> AppResult<()> {
    bf_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))
}

/// List all networks in the project with summaries.
pub fn list_networks(project: &Project) -> Vec<NetworkSummary> {
    project
        .networks
        .iter()
        .map(|network| {
            let labels: BTreeSet<&str> = network
                .edges
                .iter()
                .flat_map(|e| [e.source(), e.target()])
                .collect();
            NetworkSummary {
                id: network.id.clone(),
                name: network.name.clone(),
                node_count: labels.len(),
                edge_count: network.edges.len(),
                capacity_count: network.capacities.len(),
                reservoir_count: network.reservoirs.len(),
                shown_reservoir_count: network.reservoirs.values().filter(|r| r.show).count(),
            }
        })
        .collect()
}

/// Get a network by ID, or the first network when `network_id` is `None`.
pub fn get_network<'a>(project: &'a Project, network_id: Option<&str>) -> AppResult<&'a NetworkDef> {
    match network_id {
        Some(id) => project
            .networks
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::NetworkNotFound(id.to_string())),
        None => project
            .networks
            .first()
            .ok_or_else(|| AppError::InvalidInput("project has no networks".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_project::schema::{EdgeDef, RenderDef, ReservoirDef};

    fn project() -> Project {
        let mut reservoirs = std::collections::BTreeMap::new();
        reservoirs.insert(
            "A".to_string(),
            ReservoirDef {
                initial: 1.0,
                show: true,
            },
        );
        reservoirs.insert("B".to_string(), ReservoirDef::default());

        Project {
            version: 1,
            name: "Demo".to_string(),
            networks: vec![
                NetworkDef {
                    id: "first".to_string(),
                    name: "First".to_string(),
                    edges: vec![EdgeDef::new("A", "B"), EdgeDef::new("B", "C"), EdgeDef::new("A", "C")],
                    capacities: vec![],
                    reservoirs,
                    render: RenderDef::default(),
                },
                NetworkDef {
                    id: "second".to_string(),
                    name: "Second".to_string(),
                    edges: vec![EdgeDef::new("X", "Y")],
                    capacities: vec![],
                    reservoirs: Default::default(),
                    render: RenderDef::default(),
                },
            ],
        }
    }

    #[test]
    fn summaries_count_distinct_nodes() {
        let summaries = list_networks(&project());
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].node_count, 3);
        assert_eq!(summaries[0].edge_count, 3);
        assert_eq!(summaries[0].reservoir_count, 2);
        assert_eq!(summaries[0].shown_reservoir_count, 1);
        assert_eq!(summaries[1].node_count, 2);
    }

    #[test]
    fn get_network_by_id_or_first() {
        let project = project();
        assert_eq!(get_network(&project, Some("second")).unwrap().id, "second");
        assert_eq!(get_network(&project, None).unwrap().id, "first");
        assert!(matches!(
            get_network(&project, Some("missing")),
            Err(AppError::NetworkNotFound(_))
        ));
    }

    #[test]
    fn empty_project_has_no_default_network() {
        let project = Project {
            version: 1,
            name: "Empty".to_string(),
            networks: vec![],
        };
        assert!(matches!(
            get_network(&project, None),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = load_project(Path::new("/nonexistent/bf_app_missing.yaml"));
        assert!(matches!(result, Err(AppError::ProjectFileRead { .. })));
    }

    #[test]
    fn save_then_load_json() {
        let path = std::env::temp_dir().join("bf_app_project_service.json");
        let project = project();
        save_project(&path, &project).unwrap();
        assert_eq!(load_project(&path).unwrap(), project);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_into_missing_dir_is_write_error() {
        let path = Path::new("/nonexistent/bf_app/out.yaml");
        assert!(matches!(
            save_project(path, &project()),
            Err(AppError::ProjectFileWrite { .. })
        ));
    }
}
