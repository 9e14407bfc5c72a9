//! Stroke and line-style definitions.
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"`, `"10,5,2,5"` |

use std::{fmt, str::FromStr};

use crate::color::Color;

/// Line pattern of a stroke.
///
/// Each variant maps to an SVG `stroke-dasharray` value:
/// - `Solid`: no dasharray
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `DashDot`: "10,5,2,5"
/// - `Custom(pattern)`: the pattern itself
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Comma or space separated dash/gap lengths, e.g. "10,5,2,3"
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "dash-dot" | "dashdot" => Ok(Self::DashDot),
            pattern if is_dash_pattern(pattern) => Ok(Self::Custom(pattern.to_string())),
            other => Err(format!(
                "invalid stroke style `{other}`, valid values: solid, dashed, dotted, dash-dot, or a dash pattern like \"4,2\""
            )),
        }
    }
}

impl fmt::Display for StrokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "solid"),
            Self::Dashed => write!(f, "dashed"),
            Self::Dotted => write!(f, "dotted"),
            Self::DashDot => write!(f, "dash-dot"),
            Self::Custom(pattern) => write!(f, "{pattern}"),
        }
    }
}

fn is_dash_pattern(s: &str) -> bool {
    let mut parts = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .peekable();
    parts.peek().is_some() && parts.all(|part| part.parse::<f32>().is_ok_and(|v| v >= 0.0))
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::DashDot => Some("10,5,2,5".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// ```
/// use vellum_core::color::Color;
/// use vellum_core::draw::{StrokeDefinition, StrokeStyle};
///
/// let stroke = StrokeDefinition::dashed(Color::new("blue").unwrap(), 1.5);
/// assert_eq!(stroke.style(), &StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dashed)
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    /// Black, 1px, solid
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("solid".parse::<StrokeStyle>().unwrap(), StrokeStyle::Solid);
        assert_eq!("dashed".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dashed);
        assert_eq!("dotted".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dotted);
        assert_eq!("dashdot".parse::<StrokeStyle>().unwrap(), StrokeStyle::DashDot);
        assert_eq!(
            "4, 2".parse::<StrokeStyle>().unwrap(),
            StrokeStyle::Custom("4, 2".to_string())
        );
        assert!("wavy".parse::<StrokeStyle>().is_err());
        assert!("".parse::<StrokeStyle>().is_err());
        assert!("4,-2".parse::<StrokeStyle>().is_err());
    }

    #[test]
    fn test_stroke_style_svg_value() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value().as_deref(), Some("5,5"));
        assert_eq!(
            StrokeStyle::Custom("1 1".to_string()).to_svg_value().as_deref(),
            Some("1 1")
        );
    }

    #[test]
    fn test_stroke_style_display_round_trips() {
        for style in [
            StrokeStyle::Solid,
            StrokeStyle::Dashed,
            StrokeStyle::Dotted,
            StrokeStyle::DashDot,
        ] {
            assert_eq!(style.to_string().parse::<StrokeStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_stroke_definition_builders() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.style(), &StrokeStyle::Solid);

        let red = Color::new("red").unwrap();
        let stroke = StrokeDefinition::dashed(red, 2.0).with_width(3.0);
        assert_eq!(stroke.color(), red);
        assert_eq!(stroke.width(), 3.0);
        assert_eq!(stroke.style(), &StrokeStyle::Dashed);
    }
}
