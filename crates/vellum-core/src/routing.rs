//! Connector routing.
//!
//! The [`ConnectorRouter`] turns a [`ConnectorDescriptor`] into a [`Route`]:
//! the ordered path points plus the arrowhead at the final point. Explicit
//! waypoints are used verbatim; otherwise both ends are anchored on their
//! shape's border facing the other shape's center.

mod arrowhead;

pub use arrowhead::{ArrowConfig, ArrowheadGeometry, ArrowheadStyle, DEFAULT_HALF_ANGLE_DEGREES};

use log::{debug, trace, warn};

use crate::{
    geometry::Point,
    registry::ShapeRegistry,
    shape::{AnchorMode, border_point},
};

/// A connection request between two registered shapes
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorDescriptor {
    from: String,
    to: String,
    waypoints: Vec<Point>,
    label: Option<String>,
}

impl ConnectorDescriptor {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            waypoints: Vec::new(),
            label: None,
        }
    }

    /// Explicit path points in document order
    pub fn with_waypoints(mut self, waypoints: Vec<Point>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// The routed path of one connector.
///
/// An empty route (no points, no arrowhead) means the connector was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    path: Vec<Point>,
    arrowhead: Option<ArrowheadGeometry>,
}

impl Route {
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn arrowhead(&self) -> Option<&ArrowheadGeometry> {
        self.arrowhead.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.arrowhead.is_none()
    }

    /// Consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.path.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Midpoint of the middle segment, where an unplaced label goes.
    pub fn label_anchor(&self) -> Option<Point> {
        let segments = self.path.len().checked_sub(1).filter(|n| *n > 0)?;
        let index = segments / 2;
        Some(self.path[index].midpoint(self.path[index + 1]))
    }
}

/// Routes connectors against a filled [`ShapeRegistry`].
///
/// Routing is stateless: the same connector always yields the same route.
#[derive(Debug, Clone, Copy)]
pub struct ConnectorRouter<'a> {
    registry: &'a ShapeRegistry,
    anchor_mode: AnchorMode,
}

impl<'a> ConnectorRouter<'a> {
    pub fn new(registry: &'a ShapeRegistry) -> Self {
        Self {
            registry,
            anchor_mode: AnchorMode::default(),
        }
    }

    pub fn with_anchor_mode(mut self, anchor_mode: AnchorMode) -> Self {
        self.anchor_mode = anchor_mode;
        self
    }

    /// Routes `connector`, returning an empty [`Route`] if either end is not registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_core::geometry::{Point, Size};
    /// use vellum_core::registry::ShapeRegistry;
    /// use vellum_core::routing::{ArrowConfig, ConnectorDescriptor, ConnectorRouter};
    /// use vellum_core::shape::ShapeDescriptor;
    ///
    /// let mut registry = ShapeRegistry::new();
    /// registry.register(ShapeDescriptor::rect("a", Point::new(0.0, 0.0), Size::new(100.0, 50.0)).unwrap());
    /// registry.register(ShapeDescriptor::rect("b", Point::new(300.0, 0.0), Size::new(100.0, 50.0)).unwrap());
    ///
    /// let route = ConnectorRouter::new(&registry)
    ///     .route(&ConnectorDescriptor::new("a", "b"), &ArrowConfig::default());
    /// assert_eq!(route.path(), [Point::new(100.0, 25.0), Point::new(300.0, 25.0)]);
    /// assert_eq!(route.arrowhead().unwrap().tip(), Point::new(300.0, 25.0));
    /// ```
    pub fn route(&self, connector: &ConnectorDescriptor, arrow: &ArrowConfig) -> Route {
        let (Some(from), Some(to)) = (
            self.registry.lookup(connector.from()),
            self.registry.lookup(connector.to()),
        ) else {
            warn!(
                from = connector.from(),
                to = connector.to(),
                from_found = self.registry.contains(connector.from()),
                to_found = self.registry.contains(connector.to());
                "Skipping connector with unresolved endpoint"
            );
            return Route::default();
        };

        let path = match connector.waypoints() {
            waypoints if waypoints.len() >= 2 => waypoints.to_vec(),
            waypoints => {
                if !waypoints.is_empty() {
                    debug!(
                        from = connector.from(),
                        to = connector.to();
                        "Ignoring single waypoint, computing anchors"
                    );
                }
                vec![
                    border_point(from, to.center(), self.anchor_mode),
                    border_point(to, from.center(), self.anchor_mode),
                ]
            }
        };

        let arrowhead = match (arrow.style(), path.as_slice()) {
            (ArrowheadStyle::None, _) => None,
            (_, [.., prev, tip]) => {
                ArrowheadGeometry::from_segment(*prev, *tip, arrow.length(), arrow.half_angle())
            }
            _ => None,
        };

        trace!(
            from = connector.from(),
            to = connector.to(),
            points = path.len(),
            arrowhead = arrowhead.is_some();
            "Routed connector"
        );

        Route { path, arrowhead }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::{geometry::Size, shape::ShapeDescriptor};

    fn registry() -> ShapeRegistry {
        [
            ShapeDescriptor::rect("a", Point::new(0.0, 0.0), Size::new(100.0, 50.0)).unwrap(),
            ShapeDescriptor::rect("b", Point::new(300.0, 0.0), Size::new(100.0, 50.0)).unwrap(),
            ShapeDescriptor::circle("start", Point::new(50.0, -100.0), 10.0).unwrap(),
            ShapeDescriptor::diamond("d", Point::new(40.0, 200.0), Size::new(20.0, 40.0)).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_two_rects_side_by_side() {
        let registry = registry();
        let route = ConnectorRouter::new(&registry)
            .route(&ConnectorDescriptor::new("a", "b"), &ArrowConfig::default());

        assert_eq!(route.path(), [Point::new(100.0, 25.0), Point::new(300.0, 25.0)]);
        assert_eq!(route.arrowhead().unwrap().tip(), Point::new(300.0, 25.0));
        assert_eq!(route.segments().count(), 1);
    }

    #[test]
    fn test_unresolved_endpoint_yields_empty_route() {
        let registry = registry();
        let router = ConnectorRouter::new(&registry);

        for (from, to) in [("a", "missing"), ("missing", "b"), ("x", "y")] {
            let route = router.route(&ConnectorDescriptor::new(from, to), &ArrowConfig::default());
            assert!(route.is_empty());
            assert!(route.path().is_empty());
            assert!(route.arrowhead().is_none());
            assert!(route.label_anchor().is_none());
        }
    }

    #[test]
    fn test_waypoints_are_used_verbatim() {
        let registry = registry();
        let waypoints = vec![
            Point::new(100.0, 10.0),
            Point::new(200.0, 10.0),
            Point::new(200.0, 40.0),
            Point::new(300.0, 40.0),
        ];
        let connector = ConnectorDescriptor::new("a", "b").with_waypoints(waypoints.clone());
        let route = ConnectorRouter::new(&registry).route(&connector, &ArrowConfig::default());

        assert_eq!(route.path(), waypoints.as_slice());
        assert_eq!(route.arrowhead().unwrap().tip(), Point::new(300.0, 40.0));
        assert_eq!(route.segments().count(), 3);
        // Middle of the second segment
        assert_eq!(route.label_anchor(), Some(Point::new(200.0, 25.0)));
    }

    #[test]
    fn test_single_waypoint_falls_back_to_anchors() {
        let registry = registry();
        let connector =
            ConnectorDescriptor::new("a", "b").with_waypoints(vec![Point::new(150.0, 150.0)]);
        let route = ConnectorRouter::new(&registry).route(&connector, &ArrowConfig::default());

        assert_eq!(route.path(), [Point::new(100.0, 25.0), Point::new(300.0, 25.0)]);
    }

    #[test]
    fn test_circle_to_diamond() {
        let registry = registry();
        let route = ConnectorRouter::new(&registry)
            .route(&ConnectorDescriptor::new("start", "d"), &ArrowConfig::default());

        // Straight down: circle bottom, diamond bounding-box top
        let path = route.path();
        assert!(approx_eq!(f32, path[0].x(), 50.0, epsilon = 0.001));
        assert!(approx_eq!(f32, path[0].y(), -90.0, epsilon = 0.001));
        assert_eq!(path[1], Point::new(50.0, 200.0));
    }

    #[test]
    fn test_exact_anchor_mode_is_forwarded() {
        let registry: ShapeRegistry = [
            ShapeDescriptor::rect("a", Point::new(0.0, 0.0), Size::new(100.0, 100.0)).unwrap(),
            ShapeDescriptor::rect("b", Point::new(200.0, 100.0), Size::new(100.0, 100.0)).unwrap(),
        ]
        .into_iter()
        .collect();
        let connector = ConnectorDescriptor::new("a", "b");

        let midpoint = ConnectorRouter::new(&registry).route(&connector, &ArrowConfig::default());
        assert_eq!(midpoint.path()[0], Point::new(100.0, 50.0));

        let exact = ConnectorRouter::new(&registry)
            .with_anchor_mode(AnchorMode::Exact)
            .route(&connector, &ArrowConfig::default());
        // Direction (200, 100) leaves through the right edge at y = 50 + 25
        assert!(approx_eq!(f32, exact.path()[0].x(), 100.0, epsilon = 0.001));
        assert!(approx_eq!(f32, exact.path()[0].y(), 75.0, epsilon = 0.001));
    }

    #[test]
    fn test_arrowhead_style_none_omits_geometry() {
        let registry = registry();
        let arrow = ArrowConfig::new(ArrowheadStyle::None, 10.0);
        let route = ConnectorRouter::new(&registry).route(&ConnectorDescriptor::new("a", "b"), &arrow);

        assert_eq!(route.path().len(), 2);
        assert!(route.arrowhead().is_none());
        assert!(!route.is_empty());
    }

    #[test]
    fn test_routing_is_idempotent() {
        let registry = registry();
        let router = ConnectorRouter::new(&registry);
        let connector = ConnectorDescriptor::new("b", "a").with_label("back");
        let arrow = ArrowConfig::default();

        assert_eq!(router.route(&connector, &arrow), router.route(&connector, &arrow));
        assert_eq!(connector.label(), Some("back"));
    }
}
