use pagelens::core::types::StructureNode;
use pagelens::structure::view::{format_toc, project};
use pagelens::structure::{build_index, ensure_ids, load_structure};

fn node(title: &str, id: Option<&str>, pages: Option<(i64, i64)>) -> StructureNode {
    StructureNode {
        title: title.to_string(),
        node_id: id.map(str::to_string),
        summary: None,
        start_page: pages.map(|(start, _)| start),
        end_page: pages.map(|(_, end)| end),
        children: vec![],
    }
}

fn untagged_tree() -> Vec<StructureNode> {
    let mut intro = node("Introduction", None, Some((1, 3)));
    intro.children = vec![node("Background", None, Some((2, 3)))];
    vec![intro, node("Methods", None, Some((4, 9)))]
}

fn collect_ids(nodes: &[StructureNode], out: &mut Vec<Option<String>>) {
    for item in nodes {
        out.push(item.node_id.clone());
        collect_ids(&item.children, out);
    }
}

#[test]
fn backfill_assigns_unique_ids_depth_first() {
    let mut tree = untagged_tree();
    ensure_ids(&mut tree);

    let mut ids = vec![];
    collect_ids(&tree, &mut ids);
    let ids: Vec<String> = ids.into_iter().map(|id| id.expect("id assigned")).collect();
    assert_eq!(ids, vec!["0000", "0001", "0002"]);
}

#[test]
fn backfill_is_idempotent() {
    let mut tree = untagged_tree();
    ensure_ids(&mut tree);
    let first = serde_json::to_value(&tree).unwrap();

    ensure_ids(&mut tree);
    let second = serde_json::to_value(&tree).unwrap();
    assert_eq!(first, second);
}

#[test]
fn partially_tagged_tree_is_accepted_unchanged() {
    let mut tree = untagged_tree();
    tree[1].node_id = Some("methods".to_string());
    ensure_ids(&mut tree);

    // One pre-existing id means the tree counts as indexed; the untagged
    // siblings are left without ids.
    assert!(tree[0].node_id.is_none());
    assert_eq!(tree[1].node_id.as_deref(), Some("methods"));
}

#[test]
fn index_maps_every_id_to_the_same_node() {
    let mut tree = untagged_tree();
    ensure_ids(&mut tree);
    let index = build_index(&tree);

    assert_eq!(index.len(), 3);
    assert!(std::ptr::eq(index["0000"], &tree[0]));
    assert!(std::ptr::eq(index["0001"], &tree[0].children[0]));
    assert!(std::ptr::eq(index["0002"], &tree[1]));
}

#[test]
fn index_last_write_wins_on_colliding_ids() {
    let tree = vec![
        node("First", Some("dup"), Some((1, 1))),
        node("Second", Some("dup"), Some((2, 2))),
    ];
    let index = build_index(&tree);
    assert!(std::ptr::eq(index["dup"], &tree[1]));
}

#[test]
fn empty_tree_is_a_valid_empty_state() {
    let mut tree: Vec<StructureNode> = vec![];
    ensure_ids(&mut tree);
    assert!(build_index(&tree).is_empty());
    assert!(project(&tree).is_empty());
    assert!(format_toc(&tree).is_empty());
}

#[test]
fn projection_drops_page_ranges_and_empty_children() {
    let mut tree = untagged_tree();
    tree[0].summary = Some("Opening chapter".to_string());
    ensure_ids(&mut tree);

    let reduced = project(&tree);
    let json = serde_json::to_value(&reduced).unwrap();

    assert_eq!(json[0]["title"], "Introduction");
    assert_eq!(json[0]["summary"], "Opening chapter");
    assert_eq!(json[0]["nodes"][0]["title"], "Background");
    // Page ranges never reach the node-selection prompt.
    assert!(json[0].get("start_index").is_none());
    assert!(json[0].get("end_index").is_none());
    // Leaf nodes serialize without an empty child list.
    assert!(json[1].get("nodes").is_none());
}

#[test]
fn projection_leaves_the_input_untouched() {
    let tree = untagged_tree();
    let before = serde_json::to_value(&tree).unwrap();
    let _ = project(&tree);
    assert_eq!(before, serde_json::to_value(&tree).unwrap());
}

#[test]
fn toc_renders_indented_ranges_and_summaries() {
    let mut tree = untagged_tree();
    tree[0].children[0].summary = Some("History of the field".to_string());
    let toc = format_toc(&tree);

    assert!(toc.contains("- Introduction (Pages: 1-3)"));
    assert!(toc.contains("  - Background (Pages: 2-3)"));
    assert!(toc.contains("  Summary: History of the field"));
    assert!(toc.contains("- Methods (Pages: 4-9)"));
}

#[test]
fn toc_renders_question_marks_for_missing_ranges() {
    let tree = vec![node("Appendix", None, None)];
    assert!(format_toc(&tree).contains("- Appendix (Pages: ?-?)"));
}

#[test]
fn loads_persisted_structure_file_contract() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report_structure.json");
    std::fs::write(
        &path,
        r#"{
            "doc_name": "report.pdf",
            "structure": [
                {
                    "title": "Results",
                    "node_id": "0003",
                    "summary": "Key findings",
                    "start_index": 12,
                    "end_index": 18,
                    "nodes": [
                        {"title": "Tables", "node_id": "0004", "start_index": 15, "end_index": 16}
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let file = load_structure(&path).unwrap();
    assert_eq!(file.doc_name, "report.pdf");
    assert_eq!(file.structure[0].start_page, Some(12));
    assert_eq!(file.structure[0].children[0].node_id.as_deref(), Some("0004"));
}

#[test]
fn malformed_structure_file_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_structure.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(load_structure(&path).is_err());
}
