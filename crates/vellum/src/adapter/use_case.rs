//! Use-case diagrams: stick-figure actors and use-case ellipses.

use vellum_core::{
    draw::{Drawing, Paint, Primitive, RenderLayer, TextAnchor},
    geometry::{Point, Size},
    shape::ShapeDescriptor,
};

use super::{
    AdapterContext, DiagramAdapter, Frame, PlacedNode, builtin_color, centered_lines, node_color,
    stacked_lines, unsupported,
};
use crate::{
    error::VellumError,
    model::{DiagramKind, ElementKind, NodeRecord},
};

pub(crate) struct UseCaseAdapter;

impl DiagramAdapter for UseCaseAdapter {
    fn kind(&self) -> DiagramKind {
        DiagramKind::UseCase
    }

    fn place(
        &self,
        node: &NodeRecord,
        ctx: &AdapterContext<'_>,
    ) -> Result<PlacedNode, VellumError> {
        match node.element {
            ElementKind::Actor => actor(node, ctx),
            ElementKind::UseCase => use_case(node, ctx),
            _ => Err(unsupported(node, self.kind())),
        }
    }
}

/// Stick figure filling its box, name underneath. Connectors attach to the box.
fn actor(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(40.0, 80.0));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let head_fill = node_color(node, node.background.as_deref(), builtin_color("white"))?;
    let text_color = ctx.foreground(node)?;

    let (left, top) = (frame.x(), frame.y());
    let (width, height) = (frame.width(), frame.height());
    let center_x = frame.center().x();
    let head_radius = height / 8.0;
    let neck = top + 2.0 * head_radius;
    let shoulders = top + height * 0.4;
    let hips = top + height * 0.65;
    let feet = top + height;

    let limbs = [
        (Point::new(center_x, neck), Point::new(center_x, hips)),
        (Point::new(left, shoulders), Point::new(left + width, shoulders)),
        (Point::new(center_x, hips), Point::new(left, feet)),
        (Point::new(center_x, hips), Point::new(left + width, feet)),
    ];

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::Circle {
            center: Point::new(center_x, top + head_radius),
            radius: head_radius,
            paint: Paint::new(Some(head_fill), Some(ctx.stroke.clone())),
        },
    );
    drawing.extend(
        RenderLayer::Content,
        limbs
            .into_iter()
            .map(|(start, end)| Primitive::line(start, end, ctx.stroke.clone())),
    );

    let font = ctx.font();
    drawing.extend(
        RenderLayer::Text,
        stacked_lines(
            &[node.label().to_string()],
            Point::new(center_x, feet + font.size() + 4.0),
            TextAnchor::Middle,
            &font,
            0.0,
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}

/// Ellipse inscribed in its box with a char-wrapped label.
fn use_case(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(120.0, 60.0));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color("white"))?;
    let text_color = ctx.foreground(node)?;
    let wrapped = ctx.text.char_policy().wrap(node.label());

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::Ellipse {
            center: frame.center(),
            radius_x: frame.width() / 2.0,
            radius_y: frame.height() / 2.0,
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
