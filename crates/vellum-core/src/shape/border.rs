//! Border anchoring: where a connector attaches to a shape.

use serde::Deserialize;

use super::{ShapeDescriptor, ShapeKind};
use crate::geometry::Point;

/// How rect and diamond anchors are computed.
///
/// Circles always use the true circle intersection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorMode {
    /// Snap to the midpoint of the edge facing the target. Diamonds use
    /// their bounding box.
    #[default]
    EdgeMidpoint,
    /// True ray intersection with the rectangle or rhombus outline.
    Exact,
}

/// Returns the point on `shape`'s border on the ray from its center toward `toward`.
///
/// In [`AnchorMode::EdgeMidpoint`] mode the dominant axis of the direction
/// picks the edge: a horizontal majority anchors to the left or right edge
/// midpoint, anything else (ties included) to the top or bottom one.
///
/// If `toward` coincides with the center the center itself is returned.
///
/// # Examples
///
/// ```
/// use vellum_core::geometry::{Point, Size};
/// use vellum_core::shape::{AnchorMode, ShapeDescriptor, border_point};
///
/// let a = ShapeDescriptor::rect("a", Point::new(0.0, 0.0), Size::new(100.0, 50.0)).unwrap();
/// let anchor = border_point(&a, Point::new(350.0, 25.0), AnchorMode::EdgeMidpoint);
/// assert_eq!(anchor, Point::new(100.0, 25.0));
/// ```
pub fn border_point(shape: &ShapeDescriptor, toward: Point, mode: AnchorMode) -> Point {
    let center = shape.center();
    let delta = toward.sub_point(center);
    if delta.is_zero() || !delta.is_finite() {
        return center;
    }

    match (shape.kind(), mode) {
        (ShapeKind::Circle { radius }, _) => center.add_point(Point::from_polar(radius, delta.angle())),
        (ShapeKind::Rect(size) | ShapeKind::Diamond(size), AnchorMode::EdgeMidpoint) => {
            edge_midpoint(center, size.width() / 2.0, size.height() / 2.0, delta)
        }
        (ShapeKind::Rect(size), AnchorMode::Exact) => {
            let t = rect_ray_scale(size.width() / 2.0, size.height() / 2.0, delta);
            center.add_point(delta.scale(t))
        }
        (ShapeKind::Diamond(size), AnchorMode::Exact) => {
            let t = rhombus_ray_scale(size.width() / 2.0, size.height() / 2.0, delta);
            center.add_point(delta.scale(t))
        }
    }
}

fn edge_midpoint(center: Point, half_width: f32, half_height: f32, delta: Point) -> Point {
    if delta.x().abs() > delta.y().abs() {
        let x = center.x() + half_width.copysign(delta.x());
        Point::new(x, center.y())
    } else {
        let y = center.y() + half_height.copysign(delta.y());
        Point::new(center.x(), y)
    }
}

/// Scale factor `t` such that `delta * t` reaches the rectangle outline.
fn rect_ray_scale(half_width: f32, half_height: f32, delta: Point) -> f32 {
    let t_x = axis_scale(half_width, delta.x());
    let t_y = axis_scale(half_height, delta.y());
    t_x.min(t_y)
}

fn axis_scale(half_extent: f32, component: f32) -> f32 {
    if component == 0.0 {
        f32::INFINITY
    } else {
        half_extent / component.abs()
    }
}

/// Scale factor `t` such that `delta * t` satisfies `|x|/hw + |y|/hh = 1`.
fn rhombus_ray_scale(half_width: f32, half_height: f32, delta: Point) -> f32 {
    let sum = axis_ratio(delta.x(), half_width) + axis_ratio(delta.y(), half_height);
    if sum.is_finite() { 1.0 / sum } else { 0.0 }
}

fn axis_ratio(component: f32, half_extent: f32) -> f32 {
    if component == 0.0 {
        0.0
    } else if half_extent == 0.0 {
        f32::INFINITY
    } else {
        component.abs() / half_extent
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::geometry::Size;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            approx_eq!(f32, actual.x(), expected.x(), epsilon = 0.001)
                && approx_eq!(f32, actual.y(), expected.y(), epsilon = 0.001),
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> ShapeDescriptor {
        ShapeDescriptor::rect("r", Point::new(x, y), Size::new(w, h)).unwrap()
    }

    #[test]
    fn test_rect_picks_edge_by_dominant_axis() {
        let shape = rect(0.0, 0.0, 100.0, 50.0);
        let mode = AnchorMode::EdgeMidpoint;

        assert_point_eq(border_point(&shape, Point::new(350.0, 25.0), mode), Point::new(100.0, 25.0));
        assert_point_eq(border_point(&shape, Point::new(-300.0, 40.0), mode), Point::new(0.0, 25.0));
        assert_point_eq(border_point(&shape, Point::new(60.0, 200.0), mode), Point::new(50.0, 50.0));
        assert_point_eq(border_point(&shape, Point::new(40.0, -200.0), mode), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_rect_tie_goes_to_vertical_branch() {
        let shape = rect(0.0, 0.0, 100.0, 50.0);
        // |dx| == |dy| == 100
        let result = border_point(&shape, Point::new(150.0, 125.0), AnchorMode::EdgeMidpoint);
        assert_point_eq(result, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_target_at_center_returns_center() {
        let shape = rect(0.0, 0.0, 100.0, 50.0);
        for mode in [AnchorMode::EdgeMidpoint, AnchorMode::Exact] {
            let result = border_point(&shape, Point::new(50.0, 25.0), mode);
            assert_eq!(result, Point::new(50.0, 25.0));
        }

        let circle = ShapeDescriptor::circle("c", Point::new(5.0, 5.0), 3.0).unwrap();
        assert_eq!(
            border_point(&circle, Point::new(5.0, 5.0), AnchorMode::default()),
            Point::new(5.0, 5.0)
        );
    }

    #[test]
    fn test_circle_anchor() {
        let circle = ShapeDescriptor::circle("c", Point::new(0.0, 0.0), 10.0).unwrap();

        assert_point_eq(
            border_point(&circle, Point::new(100.0, 0.0), AnchorMode::EdgeMidpoint),
            Point::new(10.0, 0.0),
        );
        assert_point_eq(
            border_point(&circle, Point::new(0.0, -3.0), AnchorMode::Exact),
            Point::new(0.0, -10.0),
        );
        let diagonal = border_point(&circle, Point::new(5.0, 5.0), AnchorMode::EdgeMidpoint);
        let expected = 10.0 / 2.0f32.sqrt();
        assert_point_eq(diagonal, Point::new(expected, expected));
    }

    #[test]
    fn test_diamond_uses_bounding_box_by_default() {
        let diamond =
            ShapeDescriptor::diamond("d", Point::new(0.0, 0.0), Size::new(40.0, 20.0)).unwrap();

        let result = border_point(&diamond, Point::new(100.0, 12.0), AnchorMode::EdgeMidpoint);
        assert_point_eq(result, Point::new(40.0, 10.0));
    }

    #[test]
    fn test_diamond_exact_lies_on_rhombus() {
        let diamond =
            ShapeDescriptor::diamond("d", Point::new(0.0, 0.0), Size::new(40.0, 20.0)).unwrap();

        // Along the diagonal direction (1, 1) from center (20, 10):
        // t/20 + t/10 = 1 => t = 20/3
        let result = border_point(&diamond, Point::new(30.0, 20.0), AnchorMode::Exact);
        assert_point_eq(result, Point::new(20.0 + 20.0 / 3.0, 10.0 + 20.0 / 3.0));

        let axis = border_point(&diamond, Point::new(100.0, 10.0), AnchorMode::Exact);
        assert_point_eq(axis, Point::new(40.0, 10.0));
    }

    #[test]
    fn test_rect_exact_hits_corner_on_diagonal() {
        let shape = rect(80.0, 80.0, 40.0, 40.0);
        let result = border_point(&shape, Point::new(200.0, 200.0), AnchorMode::Exact);
        assert_point_eq(result, Point::new(120.0, 120.0));

        let steep = border_point(&shape, Point::new(110.0, 0.0), AnchorMode::Exact);
        assert_point_eq(steep, Point::new(102.0, 80.0));
    }

    #[test]
    fn test_degenerate_shapes_collapse_to_center() {
        let point_rect = rect(10.0, 10.0, 0.0, 0.0);
        let diamond =
            ShapeDescriptor::diamond("d", Point::new(10.0, 10.0), Size::new(0.0, 0.0)).unwrap();

        for shape in [&point_rect, &diamond] {
            for mode in [AnchorMode::EdgeMidpoint, AnchorMode::Exact] {
                let result = border_point(shape, Point::new(50.0, 30.0), mode);
                assert_point_eq(result, Point::new(10.0, 10.0));
            }
        }
    }
}
