use ufscheduler::algorithm::{build_dependency_graph, build_graph_output};
use ufscheduler::catalog::{CatalogSnapshot, SnapshotKey};
use ufscheduler::models::{CourseRecord, GraphEdge, Section};

const CISE: &str = "Computer & Information Science & Engineering";

fn course(code: &str, dept: &str, prereqs: &str) -> CourseRecord {
    CourseRecord {
        code: code.to_string(),
        prerequisites: prereqs.to_string(),
        sections: vec![Section { dept_name: dept.to_string(), ..Default::default() }],
        ..Default::default()
    }
}

fn snapshot(courses: Vec<CourseRecord>) -> CatalogSnapshot {
    CatalogSnapshot::build(SnapshotKey::new("25", "fall"), courses)
}

fn edge_pairs(g: &ufscheduler::algorithm::DependencyGraph) -> Vec<(String, String)> {
    g.to_output()
        .edges
        .into_iter()
        .map(|e| (e.source, e.target))
        .collect()
}

#[test]
fn test_suffix_stripped_on_target_and_prereqs() {
    let snap = snapshot(vec![
        course("COP3503C", CISE, "Prereq: COT 3100, MAC 2311"),
        course("COT3100", CISE, ""),
    ]);
    let g = build_dependency_graph::<&str>(&snap, CISE, &[], "");
    assert_eq!(
        edge_pairs(&g),
        vec![
            ("COT3100".to_string(), "COP3503".to_string()),
            ("MAC2311".to_string(), "COP3503".to_string()),
        ]
    );
    // COT3100 no tiene prerequisitos pero aparece como origen
    assert_eq!(g.node_count(), 3);
}

#[test]
fn test_self_loop_is_never_added() {
    let snap = snapshot(vec![course("ABC1234", "Dept", "Requires ABC 1234")]);
    let g = build_dependency_graph::<&str>(&snap, "Dept", &[], "");
    assert_eq!(g.edge_count(), 0);

    let snap = snapshot(vec![course("EEL3701C", "Dept", "EEL 3701 and EEL 3111C")]);
    let g = build_dependency_graph::<&str>(&snap, "Dept", &[], "");
    assert_eq!(edge_pairs(&g), vec![("EEL3111".to_string(), "EEL3701".to_string())]);
}

#[test]
fn test_taken_courses_seeded_as_completed_nodes() {
    let snap = snapshot(vec![course("COP3530", CISE, "COP 3503C and COT 3100")]);
    let out = build_graph_output(&snap, CISE, &["COP3503C", "MAC2234", " "]);

    let ids: Vec<(&str, bool)> = out.nodes.iter().map(|n| (n.id.as_str(), n.completed)).collect();
    assert_eq!(
        ids,
        vec![
            ("COP\n3503", true),
            ("MAC\n2234", true),
            ("COP\n3530", false),
            ("COT\n3100", false),
        ]
    );
    assert_eq!(out.nodes[0].classes, "selected");
    assert_eq!(out.nodes[2].classes, "not_selected");
    assert_eq!(
        out.edges[0],
        GraphEdge { source: "COP\n3503".to_string(), target: "COP\n3530".to_string() }
    );
}

#[test]
fn test_empty_selector_returns_only_seeded_nodes() {
    let snap = snapshot(vec![course("COP3530", CISE, "COP 3503C")]);
    let out = build_graph_output(&snap, "", &["COP3503C"]);
    assert_eq!(out.nodes.len(), 1);
    assert!(out.nodes[0].completed);
    assert!(out.edges.is_empty());
}

#[test]
fn test_selector_is_case_sensitive_substring() {
    let snap = snapshot(vec![
        course("COP3530", CISE, "COP 3503C"),
        course("MAC2312", "Mathematics", "MAC 2311"),
        course("STA3032", "Statistics", "MAC 2312"),
    ]);

    let g = build_dependency_graph::<&str>(&snap, "Information Science", &[], "");
    assert_eq!(edge_pairs(&g), vec![("COP3503".to_string(), "COP3530".to_string())]);

    let g = build_dependency_graph::<&str>(&snap, "tics", &[], "");
    assert_eq!(g.edge_count(), 2, "'tics' aparece en Mathematics y Statistics");

    let g = build_dependency_graph::<&str>(&snap, "mathematics", &[], "");
    assert_eq!(g.edge_count(), 0);

    let g = build_dependency_graph::<&str>(&snap, "Unknown Dept", &[], "");
    assert_eq!(g.node_count(), 0);
}

#[test]
fn test_courses_without_sections_never_match_a_selector() {
    let snap = snapshot(vec![CourseRecord {
        code: "COP3530".to_string(),
        prerequisites: "COP 3503".to_string(),
        ..Default::default()
    }]);
    assert_eq!(build_dependency_graph::<&str>(&snap, "C", &[], "").edge_count(), 0);
}

#[test]
fn test_build_is_deterministic() {
    let snap = snapshot(vec![
        course("COP3530", CISE, "COP 3503C, COT 3100, MAC 2312"),
        course("CDA3101", CISE, "COP 3503C and (COT 3100 or EEL 3111C)"),
        course("CEN3031", CISE, "COP 3530"),
    ]);
    let first = build_graph_output(&snap, CISE, &["COP3503C"]);
    for _ in 0..5 {
        assert_eq!(build_graph_output(&snap, CISE, &["COP3503C"]), first);
    }
    assert_eq!(first.edges.len(), 7);
}

#[test]
fn test_duplicate_code_uses_first_record_only() {
    let snap = snapshot(vec![
        course("COP3530", CISE, "COP 3503C"),
        course("COP3530", "Mathematics", "MAC 2312"),
        course("MAC2312", "Mathematics", "MAC 2311"),
    ]);
    assert_eq!(snap.dept_name("COP3530"), Some(CISE));

    // el segundo COP3530 no cuenta como curso de Mathematics
    let g = build_dependency_graph::<&str>(&snap, "Mathematics", &[], "");
    assert_eq!(edge_pairs(&g), vec![("MAC2311".to_string(), "MAC2312".to_string())]);

    let g = build_dependency_graph::<&str>(&snap, CISE, &[], "");
    assert_eq!(edge_pairs(&g), vec![("COP3503".to_string(), "COP3530".to_string())]);
}
