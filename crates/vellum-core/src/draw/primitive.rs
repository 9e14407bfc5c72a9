use crate::{
    color::Color,
    geometry::{Bounds, Point, Size},
    text::approx_text_width,
};

use super::StrokeDefinition;

/// Fill and outline of a closed primitive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paint {
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl Paint {
    pub fn new(fill: Option<Color>, stroke: Option<StrokeDefinition>) -> Self {
        Self { fill, stroke }
    }

    /// Filled, no outline
    pub fn filled(color: Color) -> Self {
        Self::new(Some(color), None)
    }

    /// Outline only
    pub fn outlined(stroke: StrokeDefinition) -> Self {
        Self::new(None, Some(stroke))
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    fn stroke_overhang(&self) -> f32 {
        self.stroke.as_ref().map_or(0.0, |s| s.width() / 2.0)
    }
}

/// Horizontal alignment of a text run relative to its insertion point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG text-anchor value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    family: String,
    size: f32,
    bold: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Arial", 11.0)
    }
}

/// A single line of text placed at an explicit baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    content: String,
    position: Point,
    anchor: TextAnchor,
    font: FontSpec,
    color: Color,
}

impl TextRun {
    pub fn new(content: impl Into<String>, position: Point, font: FontSpec) -> Self {
        Self {
            content: content.into(),
            position,
            anchor: TextAnchor::Start,
            font,
            color: Color::default(),
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Baseline insertion point
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Estimated extent, using the same glyph-width estimate as label wrapping.
    pub fn bounds(&self) -> Bounds {
        let size = self.font.size();
        let width = approx_text_width(&self.content, size);
        let min_x = match self.anchor {
            TextAnchor::Start => self.position.x(),
            TextAnchor::Middle => self.position.x() - width / 2.0,
            TextAnchor::End => self.position.x() - width,
        };
        // Ascent above the baseline, descent below
        Bounds::from_origin(
            Point::new(min_x, self.position.y() - size),
            Size::new(width, size * 1.25),
        )
    }
}

/// One output-format independent drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Axis-aligned rectangle, optionally with rounded corners
    Rect {
        bounds: Bounds,
        corner_radius: f32,
        paint: Paint,
    },
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    Ellipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        paint: Paint,
    },
    /// Closed polygon (arrowheads, diamonds, notched actions)
    Polygon { points: Vec<Point>, paint: Paint },
    Line {
        start: Point,
        end: Point,
        stroke: StrokeDefinition,
    },
    Text(TextRun),
}

impl Primitive {
    pub fn rect(bounds: Bounds, paint: Paint) -> Self {
        Self::Rect {
            bounds,
            corner_radius: 0.0,
            paint,
        }
    }

    pub fn rounded_rect(bounds: Bounds, corner_radius: f32, paint: Paint) -> Self {
        Self::Rect {
            bounds,
            corner_radius,
            paint,
        }
    }

    pub fn line(start: Point, end: Point, stroke: StrokeDefinition) -> Self {
        Self::Line { start, end, stroke }
    }

    /// Returns a human-readable name for this primitive.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Ellipse { .. } => "ellipse",
            Self::Polygon { .. } => "polygon",
            Self::Line { .. } => "line",
            Self::Text(_) => "text",
        }
    }

    /// Axis-aligned extent including half the stroke width.
    ///
    /// Returns `None` for a polygon without points.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Rect { bounds, paint, .. } => Some(bounds.expand(paint.stroke_overhang())),
            Self::Circle {
                center,
                radius,
                paint,
            } => Some(
                center
                    .to_bounds(Size::new(radius * 2.0, radius * 2.0))
                    .expand(paint.stroke_overhang()),
            ),
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
                paint,
            } => Some(
                center
                    .to_bounds(Size::new(radius_x * 2.0, radius_y * 2.0))
                    .expand(paint.stroke_overhang()),
            ),
            Self::Polygon { points, paint } => Bounds::from_points(points.iter().copied())
                .map(|b| b.expand(paint.stroke_overhang())),
            Self::Line { start, end, stroke } => {
                Bounds::from_points([*start, *end]).map(|b| b.expand(stroke.width() / 2.0))
            }
            Self::Text(run) => Some(run.bounds()),
        }
    }
}
