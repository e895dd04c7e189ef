//! Failure surfaces: provider errors, malformed snapshots, hostile trees.

use pagesift::{
    extract_content, extract_interactive, DocumentInfo, DocumentSnapshot, Error, NodeData, NodeId,
    Options, SnapshotBuilder, SnapshotProvider,
};

struct UnreachableProvider;

impl SnapshotProvider for UnreachableProvider {
    fn capture(&self) -> pagesift::Result<DocumentSnapshot> {
        Err(Error::ProviderUnavailable)
    }
}

struct FailingProvider;

impl SnapshotProvider for FailingProvider {
    fn capture(&self) -> pagesift::Result<DocumentSnapshot> {
        Err(Error::SnapshotFailed("restricted execution context".to_string()))
    }
}

#[test]
fn missing_provider_surfaces_immediately() {
    let result = extract_content(&UnreachableProvider);
    match result {
        Err(Error::ProviderUnavailable) => {}
        other => panic!("expected ProviderUnavailable, got {other:?}"),
    }

    let interactive = extract_interactive(&UnreachableProvider);
    assert!(matches!(interactive, Err(Error::ProviderUnavailable)));
}

#[test]
fn capture_failure_carries_the_host_message() {
    let result = extract_content(&FailingProvider);
    match result {
        Err(err) => assert_eq!(
            err.to_string(),
            "snapshot capture failed: restricted execution context"
        ),
        Ok(_) => panic!("expected Err(_)"),
    }
}

#[test]
fn malformed_snapshot_json_is_rejected_up_front() {
    let json = r#"{"nodes": [{"tag": "body", "children": [7]}], "root": 0, "document": {}}"#;
    let result = DocumentSnapshot::from_json(json);
    assert!(matches!(result, Err(Error::MalformedSnapshot(_))));

    let bad_root = r#"{"nodes": [{"tag": "body"}], "root": 5, "document": {}}"#;
    assert!(matches!(
        DocumentSnapshot::from_json(bad_root),
        Err(Error::MalformedSnapshot(_))
    ));
}

#[test]
fn parent_cycle_is_recovered_per_node_not_fatal() {
    // body -> div -> a, but div and a point at each other as parents. The
    // anchor's row-exclusion ancestor walk trips the depth bound; the run
    // records it and keeps going.
    let visible = |tag: &str| NodeData {
        tag: tag.to_string(),
        bounds: pagesift::BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 20.0,
        },
        ..NodeData::default()
    };

    let mut body = visible("body");
    body.children = vec![NodeId(1), NodeId(3)];
    let mut div = visible("div");
    div.parent = Some(NodeId(2));
    div.children = vec![NodeId(2)];
    let mut anchor = visible("a");
    anchor.parent = Some(NodeId(1));
    anchor.attributes.insert("href".to_string(), "https://example.com".to_string());
    anchor.text.push("cycle link".to_string());
    let mut paragraph = visible("p");
    paragraph.parent = Some(NodeId(0));
    paragraph.text.push("healthy paragraph".to_string());

    let snapshot = match DocumentSnapshot::new(
        vec![body, div, anchor, paragraph],
        NodeId(0),
        DocumentInfo::default(),
    ) {
        Ok(snapshot) => snapshot,
        Err(err) => panic!("snapshot should pass index validation: {err}"),
    };

    let result = match extract_content(&snapshot) {
        Ok(result) => result,
        Err(err) => panic!("cycle must not abort the run: {err:?}"),
    };

    assert_eq!(result.extraction_errors.len(), 1);
    assert!(result.extraction_errors[0].contains("<a>"));
    assert!(result.content.contains("healthy paragraph"));
    assert!(result.links.is_empty());
}

#[test]
fn duplicate_child_references_are_processed_once() {
    let mut paragraph = NodeData {
        tag: "p".to_string(),
        parent: Some(NodeId(0)),
        bounds: pagesift::BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 20.0,
        },
        ..NodeData::default()
    };
    paragraph.text.push("repeated reference".to_string());
    let mut body = NodeData {
        tag: "body".to_string(),
        bounds: pagesift::BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 1280.0,
            height: 720.0,
        },
        ..NodeData::default()
    };
    body.children = vec![NodeId(1), NodeId(1)];

    let snapshot =
        match DocumentSnapshot::new(vec![body, paragraph], NodeId(0), DocumentInfo::default()) {
            Ok(snapshot) => snapshot,
            Err(err) => panic!("snapshot should pass index validation: {err}"),
        };

    let result = match extract_content(&snapshot) {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(result.content, "repeated reference");
}

#[test]
fn node_budget_caps_enormous_pages() {
    let mut builder = SnapshotBuilder::new();
    let body = builder.root();
    for i in 0..2000 {
        let p = builder.element(body, "p");
        builder.text(p, &format!("Paragraph number {i} with content"));
    }
    let snapshot = builder.finish();

    // Raise the output cap so the node budget is the only limiter here.
    let options = Options {
        max_output_chars: 100_000,
        ..Options::default()
    };
    let result = match pagesift::extract_content_with_options(&snapshot, &options) {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    // 1500 visits: the body plus the first 1499 paragraphs.
    assert!(result.content.contains("Paragraph number 0"));
    assert!(result.content.contains("Paragraph number 1498"));
    assert!(!result.content.contains("Paragraph number 1499 "));
    assert!(result.extraction_errors.is_empty());
}

#[test]
fn budgets_are_fresh_across_calls() {
    let mut builder = SnapshotBuilder::new();
    let body = builder.root();
    for i in 0..30 {
        let p = builder.element(body, "p");
        builder.text(p, &format!("Stateless paragraph {i}"));
    }
    let snapshot = builder.finish();

    let options = Options {
        max_visited_nodes: 10,
        ..Options::default()
    };
    let first = match pagesift::extract_content_with_options(&snapshot, &options) {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    let second = match pagesift::extract_content_with_options(&snapshot, &options) {
        Ok(result) => result,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    // A second run sees the same budget, not a depleted one.
    assert_eq!(first.content, second.content);
}
