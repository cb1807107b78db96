//! Level 1: Initialization Tests
//!
//! Tests the seed diagram, the default configuration and the bound row models.

mod common;

use common::harness::EditorHarness;
use flow_diagram_editor::{Diagram, EditorConfig, MarkerKind, NodeKind, XYPosition};
use slint::Model;

#[test]
fn test_seed_nodes_reach_row_model() {
    let harness = EditorHarness::new();

    assert_eq!(harness.node_rows.row_count(), 3);
    let first = harness.node_rows.row_data(0).unwrap();
    assert_eq!(first.id.as_str(), "1");
    assert_eq!(first.label.as_str(), "Input Node");
    assert_eq!((first.x, first.y), (250.0, 25.0));
}

#[test]
fn test_seed_edges_reach_row_model() {
    let harness = EditorHarness::new();

    assert_eq!(harness.edge_rows.row_count(), 2);
    let arrow = harness.edge_row("e1-2").unwrap();
    assert_eq!(arrow.marker.as_str(), "arrowclosed");
    assert!(!arrow.animated);

    let animated = harness.edge_row("e2-3").unwrap();
    assert!(animated.animated);
    assert_eq!(animated.marker.as_str(), "");
}

#[test]
fn test_seed_node_kinds_and_style() {
    let harness = EditorHarness::new();

    assert_eq!(harness.node("1").kind, NodeKind::Input);
    assert_eq!(harness.node("2").kind, NodeKind::Default);
    assert_eq!(harness.node("3").kind, NodeKind::Output);
    assert_eq!(harness.node("2").background(), "#D6D5E6");
    assert_eq!(harness.edge("e1-2").unwrap().marker_end, Some(MarkerKind::ArrowClosed));
}

#[test]
fn test_nothing_selected_initially() {
    let harness = EditorHarness::new();

    assert!(harness.editor.node_panel().node_id().is_none());
    assert!(harness.editor.edge_panel().edge_id().is_none());
    assert!(!harness.editor.is_reconnecting());
}

#[test]
fn test_default_config_values() {
    let config = EditorConfig::default();

    assert_eq!(config.added_node_label, "Added node");
    assert_eq!(config.added_node_x, 100.0);
    assert_eq!(config.added_node_y_step, 30.0);
    assert!(!config.reject_self_loops);
}

#[test]
fn test_custom_seed_from_json() {
    let diagram = Diagram::from_json_str(
        r#"{"nodes":[{"id":"only","data":{"label":"Solo"},"position":{"x":5,"y":6}}]}"#,
    )
    .unwrap();
    let harness = EditorHarness::with_diagram(diagram);

    assert_eq!(harness.node_rows.row_count(), 1);
    assert_eq!(harness.edge_rows.row_count(), 0);
    assert_eq!(harness.node("only").position, XYPosition::new(5.0, 6.0));
}

#[test]
fn test_editors_do_not_share_state() {
    let first = EditorHarness::new();
    let second = EditorHarness::new();

    first.editor.on_add();
    assert_eq!(first.node_rows.row_count(), 4);
    assert_eq!(second.node_rows.row_count(), 3);
}
