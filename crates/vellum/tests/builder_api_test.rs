//! Integration tests for the DiagramBuilder API
//!
//! These tests drive complete documents through parse, render and export.

use float_cmp::approx_eq;
use vellum::{
    DiagramBuilder, VellumError,
    config::{AppConfig, RoutingConfig, StyleConfig, TextConfig},
    draw::{Primitive, RenderLayer},
    geometry::Point,
    model::{ConnectorRecord, DiagramDocument, DiagramKind, ElementKind, NodeRecord},
    shape::AnchorMode,
};

const ACTIVITY_SOURCE: &str = r#"
    kind = "activity"

    [[node]]
    id = "start"
    element = "initial-node"
    x = 90.0
    y = 0.0

    [[node]]
    id = "review"
    element = "action"
    x = 0.0
    y = 60.0
    name = "Review the submitted order"

    [[node]]
    id = "ok"
    element = "decision"
    x = 90.0
    y = 160.0

    [[connector]]
    from = "start"
    to = "review"

    [[connector]]
    from = "review"
    to = "ok"
    name = "done"
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_parse_and_render_activity() {
    let builder = DiagramBuilder::default();
    let document = builder.parse(ACTIVITY_SOURCE).expect("Failed to parse");
    let rendered = builder.render(&document).expect("Failed to render");

    let stats = rendered.stats();
    assert_eq!(stats.nodes, 3);
    assert_eq!(stats.connectors_routed, 2);
    assert_eq!(stats.connectors_skipped, 0);

    // start (circle centered at 100,10) to review (box 0,60 200x40)
    let first_line = rendered
        .drawing()
        .iter()
        .find_map(|(layer, p)| match (layer, p) {
            (RenderLayer::Connector, Primitive::Line { start, end, .. }) => Some((*start, *end)),
            _ => None,
        })
        .expect("connector line");
    assert_eq!(first_line, (Point::new(100.0, 20.0), Point::new(100.0, 60.0)));
}

#[test]
fn test_render_svg_output() {
    let builder = DiagramBuilder::default();
    let document = builder.parse(ACTIVITY_SOURCE).expect("Failed to parse");
    let svg = builder.render_svg(&document).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains(r#"data-layer="connector""#));
    assert!(svg.contains("done"));
}

#[test]
fn test_programmatic_document() {
    let document = DiagramDocument::new(DiagramKind::Class)
        .with_node(
            NodeRecord::new("order", ElementKind::Class, 0.0, 0.0)
                .with_name("Order")
                .with_attributes(["id: u64"])
                .with_operations(["submit"]),
        )
        .with_node(NodeRecord::new("line", ElementKind::Class, 300.0, 0.0).with_name("Line"))
        .with_connector(ConnectorRecord::new("order", "line").with_name("1..*"));

    let svg = DiagramBuilder::default()
        .render_svg(&document)
        .expect("Failed to render");
    assert!(svg.contains("submit()"));
    assert!(svg.contains("1..*"));
}

#[test]
fn test_exact_anchor_mode_reaches_diamond_outline() {
    let routing = RoutingConfig::default().with_anchor_mode(AnchorMode::Exact);
    let config = AppConfig::new(StyleConfig::default(), TextConfig::default(), routing);
    let document = DiagramDocument::new(DiagramKind::Activity)
        .with_node(NodeRecord::new("d", ElementKind::Decision, 0.0, 0.0).with_size(40.0, 40.0))
        .with_node(NodeRecord::new("a", ElementKind::Action, 200.0, 200.0).with_size(40.0, 40.0))
        .with_connector(ConnectorRecord::new("d", "a"));

    let rendered = DiagramBuilder::new(config)
        .render(&document)
        .expect("Failed to render");
    let start = rendered
        .drawing()
        .iter()
        .find_map(|(_, p)| match p {
            Primitive::Line { start, .. } => Some(*start),
            _ => None,
        })
        .expect("connector line");

    // Diagonal ray from (20,20) meets the rhombus |dx|/20 + |dy|/20 = 1 at (30,30)
    assert!(approx_eq!(f32, start.x(), 30.0, epsilon = 0.001), "{start:?}");
    assert!(approx_eq!(f32, start.y(), 30.0, epsilon = 0.001), "{start:?}");
}

#[test]
fn test_parse_error_has_span() {
    let source = "kind = \"activity\"\n[[node]]\nid = \"x\"\nelement = \"spaceship\"\nx = 0.0\ny = 0.0\n";
    let err = DiagramBuilder::default().parse(source).unwrap_err();

    match err {
        VellumError::Document { span, src, .. } => {
            let span = span.expect("span");
            assert!(src[span].contains("spaceship"));
        }
        other => panic!("expected document error, got {other:?}"),
    }
}

#[test]
fn test_invalid_config_rejected() {
    let config: AppConfig = toml::from_str("[text]\nfont_size = 0.0\n").expect("config parses");
    let document = DiagramDocument::new(DiagramKind::State);

    let err = DiagramBuilder::new(config).render(&document).unwrap_err();
    assert!(matches!(err, VellumError::Config(_)));
}

#[test]
fn test_element_error_names_node() {
    let document = DiagramDocument::new(DiagramKind::UseCase).with_node(
        NodeRecord::new("uc", ElementKind::UseCase, 0.0, 0.0).with_background("rgb(1, 2"),
    );

    let err = DiagramBuilder::default().render(&document).unwrap_err();
    assert!(err.to_string().starts_with("Invalid element `uc`"), "{err}");
}
