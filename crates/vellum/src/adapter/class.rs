//! Class diagrams: three-compartment class boxes.

use log::debug;

use vellum_core::{
    draw::{Drawing, Paint, Primitive, RenderLayer, TextAnchor},
    geometry::{Point, Size},
    shape::ShapeDescriptor,
};

use super::{
    AdapterContext, DiagramAdapter, Frame, PlacedNode, builtin_color, node_color, stacked_lines,
    unsupported,
};
use crate::{
    error::VellumError,
    model::{DiagramKind, ElementKind, NodeRecord},
};

const DEFAULT_WIDTH: f32 = 150.0;
const PADDING: f32 = 4.0;

pub(crate) struct ClassAdapter;

impl DiagramAdapter for ClassAdapter {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Class
    }

    fn place(
        &self,
        node: &NodeRecord,
        ctx: &AdapterContext<'_>,
    ) -> Result<PlacedNode, VellumError> {
        match node.element {
            ElementKind::Class => class_box(node, ctx),
            _ => Err(unsupported(node, self.kind())),
        }
    }
}

/// Vertical layout of a class box, relative to its top edge
#[derive(Debug, Clone, Copy, PartialEq)]
struct Compartments {
    /// Offset of the line below the name
    name_separator: f32,
    /// Offset of the line below the attributes
    attribute_separator: f32,
    /// Height needed to fit every row
    natural_height: f32,
}

impl Compartments {
    fn measure(attributes: usize, operations: usize, line_height: f32) -> Self {
        let name_separator = line_height + 2.0 * PADDING;
        let attribute_separator = name_separator + attributes as f32 * line_height + 2.0 * PADDING;
        let natural_height = attribute_separator + operations as f32 * line_height + 2.0 * PADDING;
        Self {
            name_separator,
            attribute_separator,
            natural_height,
        }
    }
}

/// Operation rows read as calls; bare names get an empty parameter list.
fn operation_label(operation: &str) -> String {
    if operation.contains('(') {
        operation.to_string()
    } else {
        format!("{operation}()")
    }
}

fn class_box(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let line_height = ctx.text.line_height();
    let font = ctx.font();
    let layout = Compartments::measure(node.attributes.len(), node.operations.len(), line_height);
    debug!(
        id = node.id.as_str(),
        attributes = node.attributes.len(),
        operations = node.operations.len();
        "Laying out class box"
    );

    let frame = Frame::resolve(node, Size::new(DEFAULT_WIDTH, layout.natural_height));
    let shape = ShapeDescriptor::rect(&node.id, frame.origin, frame.size)?;
    let fill = node_color(node, node.background.as_deref(), builtin_color("white"))?;
    let text_color = ctx.foreground(node)?;

    let (left, right, top) = (frame.x(), frame.x() + frame.width(), frame.y());
    let separator = |offset: f32| {
        Primitive::line(
            Point::new(left, top + offset),
            Point::new(right, top + offset),
            ctx.stroke.clone(),
        )
    };

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::rect(
            frame.bounds(),
            Paint::new(Some(fill), Some(ctx.stroke.clone())),
        ),
    );
    drawing.add(RenderLayer::Content, separator(layout.name_separator));
    drawing.add(RenderLayer::Content, separator(layout.attribute_separator));

    drawing.extend(
        RenderLayer::Text,
        stacked_lines(
            &[node.label().to_string()],
            Point::new(frame.center().x(), top + PADDING + font.size()),
            TextAnchor::Middle,
            &font.clone().bold(),
            line_height,
            text_color,
        ),
    );
    drawing.extend(
        RenderLayer::Text,
        stacked_lines(
            &node.attributes,
            Point::new(left + PADDING, top + layout.name_separator + PADDING + font.size()),
            TextAnchor::Start,
            &font,
            line_height,
            text_color,
        ),
    );
    let operations: Vec<String> = node.operations.iter().map(|op| operation_label(op)).collect();
    drawing.extend(
        RenderLayer::Text,
        stacked_lines(
            &operations,
            Point::new(
                left + PADDING,
                top + layout.attribute_separator + PADDING + font.size(),
            ),
            TextAnchor::Start,
            &font,
            line_height,
            text_color,
        ),
    );

    Ok(PlacedNode { shape, drawing })
}
