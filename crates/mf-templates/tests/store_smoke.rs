use mf_graph::{MissionGraph, NodeKind, NodeProperty, StepDataPatch};
use mf_templates::*;

fn sample_graph() -> MissionGraph {
    let mut graph = MissionGraph::new("disk-full");
    let a = graph.add_node(NodeKind::Action).unwrap();
    let v = graph.add_node(NodeKind::Verification).unwrap();
    let s = graph.add_node(NodeKind::Safehold).unwrap();
    graph.connect(&a, &v).unwrap();
    graph.connect(&v, &s).unwrap();
    graph
        .update_node_property(
            &a,
            NodeProperty::Data(StepDataPatch {
                action: Some("purge_logs".to_string()),
                timeout_seconds: Some(120),
                ..StepDataPatch::default()
            }),
        )
        .unwrap();
    graph
}

#[test]
fn save_and_get_template() {
    let temp_dir = std::env::temp_dir().join("mf_templates_test_save");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let mut store = DirTemplateStore::new(temp_dir.clone()).unwrap();
    let graph = sample_graph();

    let saved = store
        .save(NewTemplate::new("purge", graph.snapshot()).with_description("clear /var/log"))
        .unwrap();

    let loaded = store.get(&saved.id).unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.nodes, graph.snapshot());
    assert_eq!(loaded.description, "clear /var/log");
    assert_eq!(loaded.edge_count(), 2);
}

#[test]
fn list_in_creation_order() {
    let temp_dir = std::env::temp_dir().join("mf_templates_test_list");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let mut store = DirTemplateStore::new(temp_dir.clone()).unwrap();
    let graph = sample_graph();

    let names = ["zeta", "alpha", "mid"];
    for name in names {
        store.save(NewTemplate::new(name, graph.snapshot())).unwrap();
    }

    let listed: Vec<String> = store.list().unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(listed, names);

    // A second handle on the same directory sees the same order.
    let reopened = DirTemplateStore::new(temp_dir).unwrap();
    assert_eq!(reopened.list().unwrap().len(), 3);
}

#[test]
fn delete_and_missing() {
    let temp_dir = std::env::temp_dir().join("mf_templates_test_delete");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let mut store = DirTemplateStore::new(temp_dir).unwrap();
    let saved = store
        .save(NewTemplate::new("gone", sample_graph().snapshot()))
        .unwrap();
    store.delete(&saved.id).unwrap();

    assert!(store.list().unwrap().is_empty());
    assert!(matches!(
        store.get(&saved.id),
        Err(TemplateError::TemplateNotFound { .. })
    ));
}

#[test]
fn deleting_unknown_template_is_not_found() {
    let temp_dir = std::env::temp_dir().join("mf_templates_test_delete_unknown");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let mut store = DirTemplateStore::new(temp_dir).unwrap();
    let kept = store
        .save(NewTemplate::new("kept", sample_graph().snapshot()))
        .unwrap();

    let unknown = mf_core::TemplateId::new();
    assert!(matches!(
        store.delete(&unknown),
        Err(TemplateError::TemplateNotFound { id }) if id == unknown
    ));
    assert_eq!(store.list().unwrap(), vec![kept]);
}

#[test]
fn unreadable_index_leaves_no_template_file() {
    let temp_dir = std::env::temp_dir().join("mf_templates_test_bad_index");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let mut store = DirTemplateStore::new(temp_dir.clone()).unwrap();
    // A directory where the index file belongs cannot be read or written.
    std::fs::create_dir_all(temp_dir.join("index.json")).unwrap();

    assert!(
        store
            .save(NewTemplate::new("orphan", sample_graph().snapshot()))
            .is_err()
    );

    let json_files: Vec<_> = std::fs::read_dir(&temp_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .collect();
    assert!(json_files.is_empty());
}
