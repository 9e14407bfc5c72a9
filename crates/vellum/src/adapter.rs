//! Diagram-kind adapters.
//!
//! Each adapter maps the node records of one diagram kind to a
//! [`ShapeDescriptor`] (what connectors attach to) and the primitives that
//! draw the node itself. Everything after this point is kind-agnostic.

mod activity;
mod class;
mod state;
mod use_case;

use vellum_core::{
    color::Color,
    draw::{
        Drawing, FontSpec, Paint, Primitive, RenderLayer, StrokeDefinition, TextAnchor, TextRun,
    },
    geometry::{Bounds, Point, Size},
    shape::ShapeDescriptor,
};

use crate::{
    config::TextConfig,
    error::VellumError,
    model::{DiagramKind, NodeRecord},
};

/// Shared rendering settings handed to every adapter
#[derive(Debug, Clone)]
pub(crate) struct AdapterContext<'a> {
    pub stroke: StrokeDefinition,
    pub font_family: &'a str,
    pub text: &'a TextConfig,
}

impl AdapterContext<'_> {
    /// Regular label font
    pub fn font(&self) -> FontSpec {
        FontSpec::new(self.font_family, self.text.font_size())
    }

    /// Text color for `node`, falling back to the stroke color.
    pub fn foreground(&self, node: &NodeRecord) -> Result<Color, VellumError> {
        node_color(node, node.foreground.as_deref(), self.stroke.color())
    }
}

/// A node after adaptation: its anchor geometry and its own drawing
#[derive(Debug)]
pub(crate) struct PlacedNode {
    pub shape: ShapeDescriptor,
    pub drawing: Drawing,
}

pub(crate) trait DiagramAdapter {
    fn kind(&self) -> DiagramKind;

    /// Converts one node record.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Element`] for malformed geometry or colors, or
    /// for elements that do not belong to this diagram kind.
    fn place(
        &self,
        node: &NodeRecord,
        ctx: &AdapterContext<'_>,
    ) -> Result<PlacedNode, VellumError>;
}

/// Returns the adapter for `kind`.
pub(crate) fn adapter_for(kind: DiagramKind) -> &'static dyn DiagramAdapter {
    match kind {
        DiagramKind::Activity => &activity::ActivityAdapter,
        DiagramKind::Class => &class::ClassAdapter,
        DiagramKind::State => &state::StateAdapter,
        DiagramKind::UseCase => &use_case::UseCaseAdapter,
    }
}

fn unsupported(node: &NodeRecord, kind: DiagramKind) -> VellumError {
    VellumError::element(
        &node.id,
        format!("`{}` elements are not part of {kind} diagrams", node.element),
    )
}

/// Parses an optional color attribute of `node`.
fn node_color(node: &NodeRecord, value: Option<&str>, fallback: Color) -> Result<Color, VellumError> {
    Color::parse_or(value, fallback).map_err(|err| VellumError::invalid_color(&node.id, err))
}

/// Parses a color literal used as a built-in default.
fn builtin_color(value: &str) -> Color {
    Color::new(value).unwrap_or_default()
}

/// Top-left corner and size of a node, with defaults for missing dimensions
#[derive(Debug, Clone, Copy)]
struct Frame {
    origin: Point,
    size: Size,
}

impl Frame {
    fn resolve(node: &NodeRecord, default_size: Size) -> Self {
        Self {
            origin: Point::new(node.x, node.y),
            size: Size::new(
                node.width.unwrap_or(default_size.width()),
                node.height.unwrap_or(default_size.height()),
            ),
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_origin(self.origin, self.size)
    }

    fn center(&self) -> Point {
        self.bounds().center()
    }

    fn x(&self) -> f32 {
        self.origin.x()
    }

    fn y(&self) -> f32 {
        self.origin.y()
    }

    fn width(&self) -> f32 {
        self.size.width()
    }

    fn height(&self) -> f32 {
        self.size.height()
    }
}

/// Text runs for `lines`, horizontally centered on `center.x` and
/// vertically centered as a block around `center.y`.
fn centered_lines(
    lines: &[String],
    center: Point,
    font: &FontSpec,
    line_height: f32,
    color: Color,
) -> Vec<Primitive> {
    let block = (lines.len().saturating_sub(1)) as f32 * line_height;
    // Baseline sits roughly a third of the font size below the visual middle
    let first_baseline = center.y() - block / 2.0 + font.size() / 3.0;

    stacked_lines(
        lines,
        Point::new(center.x(), first_baseline),
        TextAnchor::Middle,
        font,
        line_height,
        color,
    )
}

/// Text runs for `lines`, one baseline every `line_height` from `first_baseline`.
fn stacked_lines(
    lines: &[String],
    first_baseline: Point,
    anchor: TextAnchor,
    font: &FontSpec,
    line_height: f32,
    color: Color,
) -> Vec<Primitive> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            let position = Point::new(
                first_baseline.x(),
                first_baseline.y() + i as f32 * line_height,
            );
            Primitive::Text(
                TextRun::new(line.as_str(), position, font.clone())
                    .with_anchor(anchor)
                    .with_color(color),
            )
        })
        .collect()
}

/// Filled disc for initial nodes, shared by activity and state diagrams.
fn initial_node(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(20.0, 20.0));
    let radius = frame.width().min(frame.height()) / 2.0;
    let shape = ShapeDescriptor::circle(&node.id, frame.center(), radius)?;
    let fill = ctx.foreground(node)?;

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::Circle {
            center: shape.center(),
            radius,
            paint: Paint::filled(fill),
        },
    );

    Ok(PlacedNode { shape, drawing })
}

/// Ring around a smaller filled disc, shared by activity and state diagrams.
fn final_node(node: &NodeRecord, ctx: &AdapterContext<'_>) -> Result<PlacedNode, VellumError> {
    let frame = Frame::resolve(node, Size::new(20.0, 20.0));
    let radius = frame.width().min(frame.height()) / 2.0;
    let shape = ShapeDescriptor::circle(&node.id, frame.center(), radius)?;
    let fill = ctx.foreground(node)?;
    let ring_background = node_color(node, node.background.as_deref(), builtin_color("white"))?;

    let mut drawing = Drawing::new();
    drawing.add(
        RenderLayer::Content,
        Primitive::Circle {
            center: shape.center(),
            radius,
            paint: Paint::new(Some(ring_background), Some(ctx.stroke.clone())),
        },
    );
    drawing.add(
        RenderLayer::Content,
        Primitive::Circle {
            center: shape.center(),
            radius: radius * 0.6,
            paint: Paint::filled(fill),
        },
    );

    Ok(PlacedNode { shape, drawing })
}
