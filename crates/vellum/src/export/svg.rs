//! SVG backend.

use log::debug;
use svg::{self, node::element as svg_element};

use vellum_core::{
    color::Color,
    draw::{Drawing, Paint, Primitive, RenderLayer, TextRun},
    geometry::{Bounds, Point},
};

use crate::{config::StyleConfig, error::VellumError};

/// Applies the color, opacity, width and dash pattern of a stroke definition.
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_hex_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

/// Applies fill and stroke of a [`Paint`]; a missing fill renders as `none`.
macro_rules! apply_paint {
    ($element:expr, $paint:expr) => {{
        let elem = match $paint.fill() {
            Some(fill) => $element
                .set("fill", fill.to_hex_string())
                .set("fill-opacity", fill.alpha()),
            None => $element.set("fill", "none"),
        };
        match $paint.stroke() {
            Some(stroke) => apply_stroke!(elem, stroke),
            None => elem,
        }
    }};
}

/// Serializes drawings to SVG documents.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Option<Color>,
    margin: f32,
}

impl SvgExporter {
    /// Creates an exporter for the canvas settings in `style`.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Config`] if the background color does not parse.
    pub fn new(style: &StyleConfig) -> Result<Self, VellumError> {
        Ok(Self {
            background: style.background_color().map_err(VellumError::Config)?,
            margin: style.margin(),
        })
    }

    /// Converts `drawing` to an SVG document.
    ///
    /// The canvas covers the drawing's bounds plus the margin on each side;
    /// layers are emitted bottom to top as `<g data-layer="...">` groups.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Export`] if the drawing extends to non-finite
    /// coordinates.
    pub fn export(&self, drawing: Drawing) -> Result<svg::Document, VellumError> {
        let bounds = drawing.bounds().unwrap_or_default();
        if !(bounds.min_point().is_finite() && bounds.to_size().is_valid()) {
            return Err(VellumError::Export(format!(
                "drawing bounds are not finite: ({}, {}) to ({}, {})",
                bounds.min_x(),
                bounds.min_y(),
                bounds.max_x(),
                bounds.max_y()
            )));
        }

        let width = bounds.width() + 2.0 * self.margin;
        let height = bounds.height() + 2.0 * self.margin;
        debug!(width = width, height = height, margin = self.margin; "Exporting SVG canvas");

        let mut doc = svg::Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background.to_hex_string())
                    .set("fill-opacity", background.alpha()),
            );
        }

        let offset = Point::new(self.margin - bounds.min_x(), self.margin - bounds.min_y());
        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", offset.x(), offset.y()),
        );

        for (layer, primitives) in drawing.into_layers() {
            main_group = main_group.add(render_layer(layer, &primitives));
        }

        Ok(doc.add(main_group))
    }
}

fn render_layer(layer: RenderLayer, primitives: &[Primitive]) -> svg_element::Group {
    primitives.iter().fold(
        svg_element::Group::new().set("data-layer", layer.name()),
        |group, primitive| match primitive {
            Primitive::Rect {
                bounds,
                corner_radius,
                paint,
            } => group.add(render_rect(*bounds, *corner_radius, paint)),
            Primitive::Circle {
                center,
                radius,
                paint,
            } => group.add(apply_paint!(
                svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", *radius),
                paint
            )),
            Primitive::Ellipse {
                center,
                radius_x,
                radius_y,
                paint,
            } => group.add(apply_paint!(
                svg_element::Ellipse::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("rx", *radius_x)
                    .set("ry", *radius_y),
                paint
            )),
            Primitive::Polygon { points, paint } => group.add(apply_paint!(
                svg_element::Polygon::new().set("points", polygon_points(points)),
                paint
            )),
            Primitive::Line { start, end, stroke } => group.add(apply_stroke!(
                svg_element::Line::new()
                    .set("x1", start.x())
                    .set("y1", start.y())
                    .set("x2", end.x())
                    .set("y2", end.y()),
                stroke
            )),
            Primitive::Text(run) => group.add(render_text(run)),
        },
    )
}

fn render_rect(bounds: Bounds, corner_radius: f32, paint: &Paint) -> svg_element::Rectangle {
    let mut rect = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height());
    if corner_radius > 0.0 {
        rect = rect.set("rx", corner_radius).set("ry", corner_radius);
    }
    apply_paint!(rect, paint)
}

fn render_text(run: &TextRun) -> svg_element::Text {
    let mut text = svg_element::Text::new(run.content())
        .set("x", run.position().x())
        .set("y", run.position().y())
        .set("text-anchor", run.anchor().to_svg_value())
        .set("font-family", run.font().family())
        .set("font-size", run.font().size())
        .set("fill", run.color().to_hex_string());
    if run.font().is_bold() {
        text = text.set("font-weight", "bold");
    }
    text
}

fn polygon_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}
