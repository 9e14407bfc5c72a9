//! Activity diagrams: actions, activities, control nodes and signals.

use log::debug;

use vellum_core::{
    draw::{Drawing, Paint, Primitive, RenderLayer, TextAnchor},
    geometry::{Point, Size},
    shape::ShapeDescriptor,
};

use super::{
    AdapterContext, DiagramAdapter, Frame, PlacedNode, builtin_color, centered_lines, final_node,
    initial_node, node_color, stacked_lines, unsupported,
};
use crate::{
    error::VellumError,
    model::{DiagramKind, ElementKind, NodeRecord},
};

const ACTION_FILL: &str = "rgb(122, 207, 245)";
const CORNER_RADIUS: f32 = 10.0;
const LABEL_PADDING: f32 = 5.0;

pub(crate) struct ActivityAdapter;

impl DiagramAdapter for ActivityAdapter {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Activity
    }

    fn place(
        &self,
        node: &NodeRecord,
        ctx: &AdapterContext<'_>,
    ) -> Result<PlacedNode, VellumError> {
        debug!(id = node.id.as_str(), element = node.element.name(); "Placing activity element");
        match node.element {
            ElementKind::InitialNode => initial_node(node, ctx),
            ElementKind::FinalNode => final_node(node, ctx),
            ElementKind::Action => action(node, ctx),
            ElementKind::Activity => activity(node, ctx),
            ElementKind::Decision => decision(node, ctx),
            ElementKind::ObjectNode => object_node(node, ctx),
            ElementKind::AcceptEvent => accept_event(node, ctx),
            ElementKind::SendSignal => send_signal(node, ctx),
            _ => Err(unsupported(node, self.kind())),
        }
    }
}

/// Rounded box with its label wrapped to the box width.
fn action(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(200.0, 40.0));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color(ACTION_FILL))?;
    let text_color = ctx.foreground(node)?;

    let wrapped = ctx
        .text
        .width_policy(frame.width() - 2.0 * LABEL_PADDING)
        .wrap(node.label());

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::rounded_rect(
            frame.bounds(),
            CORNER_RADIUS,
            Paint::new(Some(fill), Some(ctx.stroke.clone())),
        ),
    );
    drawing.extend(
        RenderLayer::Text,
        centered_lines(
            wrapped.lines(),
            frame.center(),
            &ctx.font(),
            ctx.text.line_height(),
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}

/// Activity container: bold title lines from the top. Without an explicit
/// height the box grows with the number of title lines.
fn activity(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let width = node.width.unwrap_or(200.0);
    let wrapped = ctx
        .text
        .width_policy(width - 2.0 * LABEL_PADDING)
        .wrap(node.label());
    let line_height = ctx.text.line_height();
    let natural_height = 20.0 + wrapped.len().saturating_sub(1) as f32 * line_height;

    let frame = Frame::resolve(node, Size::new(width, natural_height));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color(ACTION_FILL))?;
    let text_color = ctx.foreground(node)?;

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::rounded_rect(
            frame.bounds(),
            CORNER_RADIUS,
            Paint::new(Some(fill), Some(ctx.stroke.clone())),
        ),
    );
    drawing.extend(
        RenderLayer::Text,
        stacked_lines(
            wrapped.lines(),
            Point::new(frame.center().x(), frame.y() + 15.0),
            TextAnchor::Middle,
            &ctx.font().bold(),
            line_height,
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}

/// Diamond filling its box; the optional name sits above the top vertex.
fn decision(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(20.0, 40.0));
    let shape = ShapeDescriptor::diamond(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color(ACTION_FILL))?;
    let text_color = ctx.foreground(node)?;

    let center = frame.center();
    let bounds = frame.bounds();
    let points = vec![
        Point::new(center.x(), bounds.min_y()),
        Point::new(bounds.max_x(), center.y()),
        Point::new(center.x(), bounds.max_y()),
        Point::new(bounds.min_x(), center.y()),
    ];

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::Polygon {
            points,
            paint: Paint::new(Some(fill), Some(ctx.stroke.clone())),
        },
    );
    drawing.extend(
        RenderLayer::Text,
        stacked_lines(
            &[node.label().to_string()],
            Point::new(center.x(), bounds.min_y() - 4.0),
            TextAnchor::Middle,
            &ctx.font(),
            0.0,
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}

/// Plain box with a width-wrapped label.
fn object_node(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(85.0, 40.0));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color("white"))?;
    let text_color = ctx.foreground(node)?;

    let wrapped = ctx
        .text
        .width_policy(frame.width() - 2.0 * LABEL_PADDING)
        .wrap(node.label());

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::rect(
            frame.bounds(),
            Paint::new(Some(fill), Some(ctx.stroke.clone())),
        ),
    );
    drawing.extend(
        RenderLayer::Text,
        centered_lines(
            wrapped.lines(),
            frame.center(),
            &ctx.font(),
            ctx.text.line_height(),
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}

/// Box with a V-shaped notch cut into its left side.
fn accept_event(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(120.0, 40.0));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color(ACTION_FILL))?;
    let text_color = ctx.foreground(node)?;

    let bounds = frame.bounds();
    let notch = frame.width() / 10.0;
    let points = vec![
        bounds.min_point(),
        Point::new(bounds.max_x(), bounds.min_y()),
        Point::new(bounds.max_x(), bounds.max_y()),
        Point::new(bounds.min_x(), bounds.max_y()),
        Point::new(bounds.min_x() + notch, frame.center().y()),
    ];

    let wrapped = ctx.text.char_policy().wrap(node.label());
    let label_center = Point::new(frame.center().x() + notch / 2.0, frame.center().y());

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::Polygon {
            points,
            paint: Paint::new(Some(fill), Some(ctx.stroke.clone())),
        },
    );
    drawing.extend(
        RenderLayer::Text,
        centered_lines(
            wrapped.lines(),
            label_center,
            &ctx.font(),
            ctx.text.line_height(),
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}

/// Box whose right side ends in a point. Connectors anchor on the box body.
fn send_signal(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(120.0, 40.0));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color(ACTION_FILL))?;
    let text_color = ctx.foreground(node)?;

    let bounds = frame.bounds();
    let depth = frame.height() / 2.0;
    let points = vec![
        bounds.min_point(),
        Point::new(bounds.max_x(), bounds.min_y()),
        Point::new(bounds.max_x() + depth, frame.center().y()),
        Point::new(bounds.max_x(), bounds.max_y()),
        Point::new(bounds.min_x(), bounds.max_y()),
    ];

    let wrapped = ctx.text.char_policy().wrap(node.label());

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::Polygon {
            points,
            paint: Paint::new(Some(fill), Some(ctx.stroke.clone())),
        },
    );
    drawing.extend(
        RenderLayer::Text,
        centered_lines(
            wrapped.lines(),
            frame.center(),
            &ctx.font(),
            ctx.text.line_height(),
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}
