//! State machine diagrams.

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

const STATE_FILL: &str = "#bfefff";
const CORNER_RADIUS: f32 = 10.0;
const CHILD_FONT_SIZE: f32 = 10.0;
const CHILD_ROW_HEIGHT: f32 = 15.0;

pub(crate) struct StateAdapter;

impl DiagramAdapter for StateAdapter {
    fn kind(&self) -> DiagramKind {
        DiagramKind::State
    }

    fn place(
        &self,
        node: &NodeRecord,
        ctx: &AdapterContext<'_>,
    ) -> Result<PlacedNode, VellumError> {
        match node.element {
            ElementKind::InitialNode => initial_node(node, ctx),
            ElementKind::FinalNode => final_node(node, ctx),
            ElementKind::State => state(node, ctx),
            _ => Err(unsupported(node, self.kind())),
        }
    }
}

/// Rounded box. Without children the name is centered; with children it
/// heads the box above a separator and the children are listed below.
fn state(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let natural_height = 70.0 + CHILD_ROW_HEIGHT * node.children.len() as f32;
    let frame = Frame::resolve(node, Size::new(150.0, natural_height));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color(STATE_FILL))?;
    let text_color = ctx.foreground(node)?;
    let font = ctx.font();
    let name = [node.label().to_string()];

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::rounded_rect(
            frame.bounds(),
            CORNER_RADIUS,
            Paint::new(Some(fill), Some(ctx.stroke.clone())),
        ),
    );

    if node.children.is_empty() {
        drawing.extend(
            RenderLayer::Text,
            centered_lines(&name, frame.center(), &font, 0.0, text_color),
        );
        return Ok(PlacedNode { shape, drawing });
    }

    let (left, top) = (frame.x(), frame.y());
    drawing.add(
        RenderLayer::Content,
        Primitive::line(
            Point::new(left, top + 28.0),
            Point::new(left + frame.width(), top + 28.0),
            ctx.stroke.clone(),
        ),
    );
    drawing.extend(
        RenderLayer::Text,
        stacked_lines(
            &name,
            Point::new(frame.center().x(), top + 20.0),
            TextAnchor::Middle,
            &font,
            0.0,
            text_color,
        ),
    );
    drawing.extend(
        RenderLayer::Text,
        stacked_lines(
            &node.children,
            Point::new(left + 10.0, top + 40.0),
            TextAnchor::Start,
            &font.with_size(CHILD_FONT_SIZE),
            CHILD_ROW_HEIGHT,
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}
