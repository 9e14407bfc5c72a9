//! Rendering pass: adapters, shape registry and connector routing.
//!
//! A pass runs in two phases. The build phase places every node through the
//! adapter of the document's kind and registers its shape. The routing phase
//! resolves each connector against the filled registry. Connectors whose
//! endpoints are unknown are skipped with a warning; everything else that is
//! malformed aborts the pass.

use log::{debug, info, trace, warn};

use vellum_core::{
    color::Color,
    draw::{
        Drawing, FontSpec, Primitive, RenderLayer, StrokeDefinition, StrokeStyle, TextAnchor,
        TextRun,
    },
    geometry::Point,
    registry::ShapeRegistry,
    routing::{ArrowConfig, ConnectorDescriptor, ConnectorRouter, Route},
};

use crate::{
    adapter::{AdapterContext, adapter_for},
    config::AppConfig,
    error::VellumError,
    model::{ConnectorRecord, DiagramDocument},
};

/// Offset of a caption-anchored label from its caption point
const CAPTION_OFFSET: Point = Point::new(30.0, 10.0);
/// Distance between a path label's baseline and its segment midpoint
const PATH_LABEL_LIFT: f32 = 5.0;

/// Counters for one rendering pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub nodes: usize,
    pub connectors_routed: usize,
    pub connectors_skipped: usize,
}

/// Output of a rendering pass
#[derive(Debug)]
pub struct RenderedDiagram {
    drawing: Drawing,
    registry: ShapeRegistry,
    stats: RenderStats,
}

impl RenderedDiagram {
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Shapes registered during the build phase
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }
}

/// Turns diagram documents into drawings.
#[derive(Debug, Clone, Copy)]
pub struct DiagramRenderer<'a> {
    config: &'a AppConfig,
}

impl<'a> DiagramRenderer<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Runs one rendering pass over `document`.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Config`] if the configured stroke color is
    /// invalid, and [`VellumError::Element`] for the first malformed node or
    /// connector.
    pub fn render(&self, document: &DiagramDocument) -> Result<RenderedDiagram, VellumError> {
        let stroke_color = self
            .config
            .style()
            .stroke_color()
            .map_err(VellumError::Config)?;
        let ctx = AdapterContext {
            stroke: StrokeDefinition::solid(stroke_color, 1.0),
            font_family: self.config.style().font_family(),
            text: self.config.text(),
        };

        info!(
            kind = document.kind.name(),
            nodes = document.nodes.len(),
            connectors = document.connectors.len();
            "Rendering diagram"
        );

        let mut drawing = Drawing::new();
        let mut registry = ShapeRegistry::new();
        let mut stats = RenderStats::default();

        let adapter = adapter_for(document.kind);
        for node in &document.nodes {
            let placed = adapter.place(node, &ctx)?;
            debug!(
                id = node.id.as_str(),
                shape = placed.shape.kind().name(),
                primitives = placed.drawing.len();
                "Placed node"
            );
            if let Some(previous) = registry.register(placed.shape) {
                warn!(
                    id = previous.id(),
                    replaced = previous.kind().name();
                    "Duplicate node id, later node replaces earlier one"
                );
            }
            drawing.merge(placed.drawing);
            stats.nodes += 1;
        }

        let router =
            ConnectorRouter::new(&registry).with_anchor_mode(self.config.routing().anchor_mode());
        let default_arrow = self.config.routing().arrow(document.kind);
        for record in &document.connectors {
            let descriptor = connector_descriptor(record)?;
            let stroke = connector_stroke(record, &ctx.stroke)?;
            let arrow = connector_arrow(record, default_arrow)?;

            let route = router.route(&descriptor, &arrow);
            if route.is_empty() {
                stats.connectors_skipped += 1;
                continue;
            }

            emit_connector(&mut drawing, record, &route, &arrow, &stroke, &ctx);
            stats.connectors_routed += 1;
        }

        info!(
            nodes = stats.nodes,
            routed = stats.connectors_routed,
            skipped = stats.connectors_skipped;
            "Diagram rendered"
        );

        Ok(RenderedDiagram {
            drawing,
            registry,
            stats,
        })
    }
}

fn connector_descriptor(record: &ConnectorRecord) -> Result<ConnectorDescriptor, VellumError> {
    let waypoints: Vec<Point> = record.points.iter().copied().map(Point::from).collect();
    let caption = record.caption.map(Point::from);
    if let Some(bad) = waypoints.iter().chain(caption.iter()).find(|p| !p.is_finite()) {
        return Err(VellumError::element(
            record.display_id(),
            format!("non-finite point ({}, {})", bad.x(), bad.y()),
        ));
    }

    let mut descriptor = ConnectorDescriptor::new(record.from.as_str(), record.to.as_str())
        .with_waypoints(waypoints);
    if let Some(name) = record.name.as_deref().filter(|name| !name.is_empty()) {
        descriptor = descriptor.with_label(name);
    }
    Ok(descriptor)
}

fn connector_stroke(
    record: &ConnectorRecord,
    base: &StrokeDefinition,
) -> Result<StrokeDefinition, VellumError> {
    match record.line.as_deref() {
        None => Ok(base.clone()),
        Some(line) => {
            let style: StrokeStyle = line
                .parse()
                .map_err(|err: String| VellumError::element(record.display_id(), err))?;
            Ok(base.clone().with_style(style))
        }
    }
}

fn connector_arrow(
    record: &ConnectorRecord,
    default: ArrowConfig,
) -> Result<ArrowConfig, VellumError> {
    let mut arrow = default;
    if let Some(style) = record.arrowhead {
        arrow = arrow.with_style(style);
    }
    if let Some(length) = record.arrow_length {
        if !(length.is_finite() && length >= 0.0) {
            return Err(VellumError::element(
                record.display_id(),
                format!("arrow_length must be a non-negative number, got {length}"),
            ));
        }
        arrow = arrow.with_length(length);
    }
    Ok(arrow)
}

/// Segments, arrowhead and label of one routed connector.
fn emit_connector(
    drawing: &mut Drawing,
    record: &ConnectorRecord,
    route: &Route,
    arrow: &ArrowConfig,
    stroke: &StrokeDefinition,
    ctx: &AdapterContext<'_>,
) {
    for (start, end) in route.segments() {
        trace!(
            from = record.from.as_str(),
            to = record.to.as_str();
            "Segment ({}, {}) -> ({}, {})",
            start.x(),
            start.y(),
            end.x(),
            end.y()
        );
        drawing.add(
            RenderLayer::Connector,
            Primitive::line(start, end, stroke.clone()),
        );
    }

    if let Some(head) = route.arrowhead() {
        // Arrowheads stay solid even on dashed connectors
        let head_stroke = stroke.clone().with_style(StrokeStyle::Solid);
        drawing.extend(
            RenderLayer::Connector,
            head.primitives(arrow.style(), &head_stroke),
        );
    }

    if let Some(label) = connector_label(record, route, &ctx.font(), stroke.color()) {
        drawing.add(RenderLayer::Text, label);
    }
}

fn connector_label(
    record: &ConnectorRecord,
    route: &Route,
    font: &FontSpec,
    color: Color,
) -> Option<Primitive> {
    let name = record.name.as_deref().filter(|name| !name.is_empty())?;

    let run = match record.caption {
        Some(caption) => TextRun::new(
            name,
            Point::from(caption).add_point(CAPTION_OFFSET),
            font.clone(),
        )
        .with_anchor(TextAnchor::Start),
        None => {
            let anchor = route.label_anchor()?;
            TextRun::new(
                name,
                Point::new(anchor.x(), anchor.y() - PATH_LABEL_LIFT),
                font.clone(),
            )
            .with_anchor(TextAnchor::Middle)
        }
    };
    Some(Primitive::Text(run.with_color(color)))
}

#[cfg(test)]
mod tests {
    use vellum_core::{routing::ArrowheadStyle, shape::ShapeKind};

    use super::*;
    use crate::{
        config::{ArrowOverrides, RoutingConfig, StyleConfig, TextConfig},
        model::{DiagramKind, ElementKind, NodeRecord, PointRecord},
    };

    fn two_boxes(kind: DiagramKind, element: ElementKind) -> DiagramDocument {
        DiagramDocument::new(kind)
            .with_node(NodeRecord::new("a", element, 0.0, 0.0).with_size(100.0, 50.0))
            .with_node(NodeRecord::new("b", element, 300.0, 0.0).with_size(100.0, 50.0))
    }

    fn layer_items(drawing: &Drawing, layer: RenderLayer) -> Vec<&Primitive> {
        drawing
            .iter()
            .filter(|(l, _)| *l == layer)
            .map(|(_, p)| p)
            .collect()
    }

    #[test]
    fn test_straight_connector_with_filled_head() {
        let config = AppConfig::default();
        let document = two_boxes(DiagramKind::State, ElementKind::State)
            .with_connector(ConnectorRecord::new("a", "b"));

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        assert_eq!(
            rendered.stats(),
            RenderStats {
                nodes: 2,
                connectors_routed: 1,
                connectors_skipped: 0,
            }
        );

        let connector = layer_items(rendered.drawing(), RenderLayer::Connector);
        assert_eq!(connector.len(), 2);
        match connector[0] {
            Primitive::Line { start, end, .. } => {
                assert_eq!(*start, Point::new(100.0, 25.0));
                assert_eq!(*end, Point::new(300.0, 25.0));
            }
            other => panic!("expected line, got {}", other.name()),
        }
        match connector[1] {
            Primitive::Polygon { points, paint } => {
                assert_eq!(points[2], Point::new(300.0, 25.0));
                assert!(paint.fill().is_some());
            }
            other => panic!("expected filled head, got {}", other.name()),
        }
    }

    #[test]
    fn test_activity_uses_stroke_heads() {
        let config = AppConfig::default();
        let document = two_boxes(DiagramKind::Activity, ElementKind::Action)
            .with_connector(ConnectorRecord::new("a", "b"));

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        let connector = layer_items(rendered.drawing(), RenderLayer::Connector);
        // One segment plus two wing strokes
        assert_eq!(connector.len(), 3);
        assert!(connector.iter().all(|p| matches!(p, Primitive::Line { .. })));
    }

    #[test]
    fn test_unresolved_connector_is_skipped() {
        let config = AppConfig::default();
        let document = two_boxes(DiagramKind::Class, ElementKind::Class)
            .with_connector(ConnectorRecord::new("a", "ghost").with_name("uses"))
            .with_connector(ConnectorRecord::new("a", "b"));

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        assert_eq!(rendered.stats().connectors_skipped, 1);
        assert_eq!(rendered.stats().connectors_routed, 1);
        // Class connectors have no heads; the routed one is a single line
        assert_eq!(layer_items(rendered.drawing(), RenderLayer::Connector).len(), 1);
        let texts = layer_items(rendered.drawing(), RenderLayer::Text);
        assert!(!texts.iter().any(|p| matches!(p, Primitive::Text(run) if run.content() == "uses")));
    }

    #[test]
    fn test_waypoints_are_used_verbatim() {
        let config = AppConfig::default();
        let points = vec![
            PointRecord::new(50.0, 50.0),
            PointRecord::new(50.0, 100.0),
            PointRecord::new(350.0, 100.0),
            PointRecord::new(350.0, 50.0),
        ];
        let document = two_boxes(DiagramKind::Class, ElementKind::Class)
            .with_connector(ConnectorRecord::new("a", "b").with_points(points).with_name("owns"));

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        let lines = layer_items(rendered.drawing(), RenderLayer::Connector);
        assert_eq!(lines.len(), 3);

        // Middle segment is (50,100)-(350,100)
        let label = layer_items(rendered.drawing(), RenderLayer::Text)
            .into_iter()
            .find_map(|p| match p {
                Primitive::Text(run) if run.content() == "owns" => Some(run.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(label.position(), Point::new(200.0, 95.0));
        assert_eq!(label.anchor(), TextAnchor::Middle);
    }

    #[test]
    fn test_caption_places_label() {
        let config = AppConfig::default();
        let document = two_boxes(DiagramKind::UseCase, ElementKind::UseCase).with_connector(
            ConnectorRecord::new("a", "b")
                .with_name("<<include>>")
                .with_caption(PointRecord::new(150.0, 0.0)),
        );

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        let label = layer_items(rendered.drawing(), RenderLayer::Text)
            .into_iter()
            .find_map(|p| match p {
                Primitive::Text(run) if run.content() == "<<include>>" => Some(run.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(label.position(), Point::new(180.0, 10.0));
        assert_eq!(label.anchor(), TextAnchor::Start);
    }

    #[test]
    fn test_record_overrides_arrowhead() {
        let config = AppConfig::default();
        let document = two_boxes(DiagramKind::Class, ElementKind::Class).with_connector(
            ConnectorRecord::new("a", "b")
                .with_arrowhead(ArrowheadStyle::Filled)
                .with_line("dashed"),
        );

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        let connector = layer_items(rendered.drawing(), RenderLayer::Connector);
        assert_eq!(connector.len(), 2);
        match connector[0] {
            Primitive::Line { stroke, .. } => assert_eq!(*stroke.style(), StrokeStyle::Dashed),
            other => panic!("expected line, got {}", other.name()),
        }
        match connector[1] {
            Primitive::Polygon { paint, .. } => {
                assert_eq!(*paint.stroke().unwrap().style(), StrokeStyle::Solid);
            }
            other => panic!("expected head, got {}", other.name()),
        }
    }

    #[test]
    fn test_config_overrides_kind_default() {
        let routing = RoutingConfig::default().with_overrides(
            DiagramKind::Activity,
            ArrowOverrides::new(Some(ArrowheadStyle::None), None),
        );
        let config = AppConfig::new(StyleConfig::default(), TextConfig::default(), routing);
        let document = two_boxes(DiagramKind::Activity, ElementKind::Action)
            .with_connector(ConnectorRecord::new("a", "b"));

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        assert_eq!(layer_items(rendered.drawing(), RenderLayer::Connector).len(), 1);
    }

    #[test]
    fn test_bad_line_style_names_connector() {
        let config = AppConfig::default();
        let mut record = ConnectorRecord::new("a", "b").with_line("wiggly");
        record.id = Some("flow-1".to_string());
        let document = two_boxes(DiagramKind::State, ElementKind::State).with_connector(record);

        let err = DiagramRenderer::new(&config).render(&document).unwrap_err();
        assert!(matches!(err, VellumError::Element { ref id, .. } if id == "flow-1"));
    }

    #[test]
    fn test_non_finite_waypoint_aborts() {
        let config = AppConfig::default();
        let document = two_boxes(DiagramKind::State, ElementKind::State).with_connector(
            ConnectorRecord::new("a", "b")
                .with_points(vec![PointRecord::new(f32::NAN, 0.0), PointRecord::new(1.0, 1.0)]),
        );

        let err = DiagramRenderer::new(&config).render(&document).unwrap_err();
        assert!(matches!(err, VellumError::Element { ref id, .. } if id == "a->b"));
    }

    #[test]
    fn test_malformed_node_aborts_pass() {
        let config = AppConfig::default();
        let document = DiagramDocument::new(DiagramKind::Class)
            .with_node(NodeRecord::new("ok", ElementKind::Class, 0.0, 0.0))
            .with_node(NodeRecord::new("bad", ElementKind::Class, f32::INFINITY, 0.0));

        let err = DiagramRenderer::new(&config).render(&document).unwrap_err();
        assert!(err.to_string().contains("`bad`"));
    }

    #[test]
    fn test_bad_stroke_color_is_config_error() {
        let style = StyleConfig::default().with_stroke_color("not-a-color");
        let config = AppConfig::new(style, TextConfig::default(), RoutingConfig::default());
        let document = DiagramDocument::new(DiagramKind::Class);

        let err = DiagramRenderer::new(&config).render(&document).unwrap_err();
        assert!(matches!(err, VellumError::Config(_)));
    }

    #[test]
    fn test_registry_is_exposed() {
        let config = AppConfig::default();
        let document = DiagramDocument::new(DiagramKind::Activity)
            .with_node(NodeRecord::new("start", ElementKind::InitialNode, 0.0, 0.0))
            .with_node(NodeRecord::new("pick", ElementKind::Decision, 0.0, 50.0));

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        let registry = rendered.registry();
        assert_eq!(registry.len(), 2);
        assert!(matches!(
            registry.lookup("start").map(|s| s.kind()),
            Some(ShapeKind::Circle { .. })
        ));
        assert!(matches!(
            registry.lookup("pick").map(|s| s.kind()),
            Some(ShapeKind::Diamond(_))
        ));
    }

    #[test]
    fn test_duplicate_node_id_routes_to_later_node() {
        let config = AppConfig::default();
        let document = DiagramDocument::new(DiagramKind::State)
            .with_node(NodeRecord::new("a", ElementKind::State, 0.0, 0.0).with_size(100.0, 50.0))
            .with_node(NodeRecord::new("b", ElementKind::State, 300.0, 0.0).with_size(100.0, 50.0))
            .with_node(NodeRecord::new("b", ElementKind::State, 0.0, 200.0).with_size(100.0, 50.0))
            .with_connector(ConnectorRecord::new("a", "b"));

        let rendered = DiagramRenderer::new(&config).render(&document).unwrap();
        assert_eq!(rendered.registry().len(), 2);
        assert_eq!(
            rendered.registry().lookup("b").unwrap().position(),
            Point::new(0.0, 200.0)
        );
        assert_eq!(rendered.stats().nodes, 3);

        match layer_items(rendered.drawing(), RenderLayer::Connector)[0] {
            Primitive::Line { start, end, .. } => {
                assert_eq!(*start, Point::new(50.0, 50.0));
                assert_eq!(*end, Point::new(50.0, 200.0));
            }
            other => panic!("expected line, got {}", other.name()),
        }
    }
}
