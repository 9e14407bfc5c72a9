//! Arrowhead geometry and its two rendering styles.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{
    draw::{Paint, Primitive, StrokeDefinition},
    geometry::Point,
};

/// Default half-angle between the shaft and each wing, in degrees.
pub const DEFAULT_HALF_ANGLE_DEGREES: f32 = 30.0;

/// How an arrowhead is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowheadStyle {
    /// Closed triangle (wing, wing, tip) filled with the stroke color
    #[default]
    Filled,
    /// Two separate strokes from each wing to the tip
    Strokes,
    /// Plain line end
    None,
}

impl FromStr for ArrowheadStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filled" => Ok(Self::Filled),
            "strokes" => Ok(Self::Strokes),
            "none" => Ok(Self::None),
            _ => Err(format!(
                "invalid arrowhead style `{s}`, valid values: filled, strokes, none"
            )),
        }
    }
}

impl fmt::Display for ArrowheadStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filled => write!(f, "filled"),
            Self::Strokes => write!(f, "strokes"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Arrowhead settings for one connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowConfig {
    style: ArrowheadStyle,
    length: f32,
    half_angle: f32,
}

impl ArrowConfig {
    /// Creates a config with the default 30° half-angle.
    pub fn new(style: ArrowheadStyle, length: f32) -> Self {
        Self {
            style,
            length,
            half_angle: DEFAULT_HALF_ANGLE_DEGREES.to_radians(),
        }
    }

    pub fn with_half_angle_degrees(mut self, degrees: f32) -> Self {
        self.half_angle = degrees.to_radians();
        self
    }

    pub fn with_style(mut self, style: ArrowheadStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    pub fn style(&self) -> ArrowheadStyle {
        self.style
    }

    /// Distance from the tip to each wing
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Half-angle in radians
    pub fn half_angle(&self) -> f32 {
        self.half_angle
    }
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self::new(ArrowheadStyle::Filled, 10.0)
    }
}

/// Tip and wing points of an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowheadGeometry {
    tip: Point,
    wings: [Point; 2],
}

impl ArrowheadGeometry {
    /// Computes the arrowhead at `tip` for a segment arriving from `prev`.
    ///
    /// The wings are `tip - length * (cos(θ ∓ half_angle), sin(θ ∓ half_angle))`
    /// where θ is the segment direction. Returns `None` for a zero-length
    /// segment, whose direction is undefined.
    pub fn from_segment(prev: Point, tip: Point, length: f32, half_angle: f32) -> Option<Self> {
        let direction = tip.sub_point(prev);
        if direction.is_zero() || !direction.is_finite() {
            return None;
        }

        let theta = direction.angle();
        let wing = |angle: f32| tip.sub_point(Point::from_polar(length, angle));

        Some(Self {
            tip,
            wings: [wing(theta - half_angle), wing(theta + half_angle)],
        })
    }

    pub fn tip(&self) -> Point {
        self.tip
    }

    pub fn wings(&self) -> [Point; 2] {
        self.wings
    }

    /// Drawing primitives for this arrowhead in `style`.
    pub fn primitives(&self, style: ArrowheadStyle, stroke: &StrokeDefinition) -> Vec<Primitive> {
        let [left, right] = self.wings;
        match style {
            ArrowheadStyle::Filled => vec![Primitive::Polygon {
                points: vec![left, right, self.tip],
                paint: Paint::new(Some(stroke.color()), Some(stroke.clone())),
            }],
            ArrowheadStyle::Strokes => vec![
                Primitive::line(left, self.tip, stroke.clone()),
                Primitive::line(right, self.tip, stroke.clone()),
            ],
            ArrowheadStyle::None => Vec::new(),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Both wings sit `length` away from the tip and 2α apart.
    fn check_wing_geometry(
        prev: Point,
        tip: Point,
        length: f32,
        half_angle_degrees: f32,
    ) -> Result<(), TestCaseError> {
        prop_assume!(prev.distance(tip) > 0.01);

        let half_angle = half_angle_degrees.to_radians();
        let head = ArrowheadGeometry::from_segment(prev, tip, length, half_angle).unwrap();

        let [left, right] = head.wings().map(|wing| wing.sub_point(head.tip()));
        prop_assert!(approx_eq!(f32, left.hypot(), length, epsilon = 0.01));
        prop_assert!(approx_eq!(f32, right.hypot(), length, epsilon = 0.01));

        let cos_between =
            (left.x() * right.x() + left.y() * right.y()) / (left.hypot() * right.hypot());
        let between = cos_between.clamp(-1.0, 1.0).acos();
        prop_assert!(
            approx_eq!(f32, between, 2.0 * half_angle, epsilon = 0.01),
            "wings are {between} rad apart, expected {}",
            2.0 * half_angle
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn wing_geometry(
            prev in point_strategy(),
            tip in point_strategy(),
            length in 1.0f32..30.0,
            half_angle_degrees in 5.0f32..80.0,
        ) {
            check_wing_geometry(prev, tip, length, half_angle_degrees)?;
        }

        #[test]
        fn default_wing_geometry(prev in point_strategy(), tip in point_strategy(), length in 1.0f32..30.0) {
            check_wing_geometry(prev, tip, length, DEFAULT_HALF_ANGLE_DEGREES)?;
        }
    }
}
