use std::collections::BTreeMap;

use bf_project::schema::*;
use bf_project::{load_json, load_yaml, save_json, save_yaml, validate_project};

fn sample_network() -> NetworkDef {
    let mut reservoirs = BTreeMap::new();
    reservoirs.insert(
        "A".to_string(),
        ReservoirDef {
            initial: 50.0,
            show: true,
        },
    );

    NetworkDef {
        id: "pipeline".to_string(),
        name: "Pipeline".to_string(),
        edges: vec![EdgeDef::new("A", "B"), EdgeDef::new("A", "C")],
        capacities: vec![
            CapacityDef {
                from: "A".to_string(),
                to: "B".to_string(),
                capacity: 100.0,
            },
            CapacityDef {
                from: "A".to_string(),
                to: "C".to_string(),
                capacity: 150.0,
            },
        ],
        reservoirs,
        render: RenderDef {
            title: Some("Pipeline".to_string()),
            legend: None,
            show_legend: false,
            show_reservoirs: true,
            output: Some("out/pipeline.html".to_string()),
        },
    }
}

#[test]
fn roundtrip_yaml_empty_project() {
    let project = Project {
        version: 1,
        name: "Empty Project".to_string(),
        networks: vec![],
    };

    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("bf_project_roundtrip_empty.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_yaml_network() {
    let project = Project {
        version: 1,
        name: "Pipeline".to_string(),
        networks: vec![sample_network()],
    };

    let path = std::env::temp_dir().join("bf_project_roundtrip_network.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_network() {
    let project = Project {
        version: 1,
        name: "Pipeline".to_string(),
        networks: vec![sample_network()],
    };

    let path = std::env::temp_dir().join("bf_project_roundtrip_network.json");
    save_json(&path, &project).unwrap();
    let loaded = bf_project::load(&path).unwrap();

    assert_eq!(project, loaded);
    assert_eq!(load_json(&path).unwrap(), loaded);
}

#[test]
fn save_refuses_invalid_project() {
    let mut network = sample_network();
    network.capacities[0].capacity = f64::NAN;
    let project = Project {
        version: 1,
        name: "Bad".to_string(),
        networks: vec![network],
    };

    let path = std::env::temp_dir().join("bf_project_invalid.yaml");
    assert!(save_yaml(&path, &project).is_err());
}
