//! Shape descriptors.
//!
//! A [`ShapeDescriptor`] is the normalized geometry of one diagram element,
//! independent of what the element means. Connectors only ever see
//! descriptors, so every diagram kind is routed by the same engine.

mod border;

pub use border::{AnchorMode, border_point};

use thiserror::Error;

use crate::geometry::{Bounds, Point, Size};

/// Errors raised while building a [`ShapeDescriptor`]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShapeError {
    #[error("shape `{id}` has an invalid size {width}x{height}")]
    InvalidSize { id: String, width: f32, height: f32 },

    #[error("shape `{id}` has an invalid radius {radius}")]
    InvalidRadius { id: String, radius: f32 },

    #[error("shape `{id}` has a non-finite position ({x}, {y})")]
    InvalidPosition { id: String, x: f32, y: f32 },
}

impl ShapeError {
    /// Id of the offending shape
    pub fn id(&self) -> &str {
        match self {
            Self::InvalidSize { id, .. }
            | Self::InvalidRadius { id, .. }
            | Self::InvalidPosition { id, .. } => id,
        }
    }
}

/// The geometric kind of a shape together with its extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle; position is the top-left corner
    Rect(Size),
    /// Circle; position is the center
    Circle { radius: f32 },
    /// Rhombus inscribed in its bounding box; position is the top-left corner
    Diamond(Size),
}

impl ShapeKind {
    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rect(_) => "rect",
            Self::Circle { .. } => "circle",
            Self::Diamond(_) => "diamond",
        }
    }
}

/// Resolved geometry of a single diagram element.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptor {
    id: String,
    kind: ShapeKind,
    position: Point,
}

impl ShapeDescriptor {
    /// Creates a rectangle from its top-left corner and size.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] for a negative or non-finite size, or a
    /// non-finite position.
    pub fn rect(id: impl Into<String>, origin: Point, size: Size) -> Result<Self, ShapeError> {
        Self::new(id.into(), ShapeKind::Rect(size), origin)
    }

    /// Creates a circle from its center and radius.
    pub fn circle(id: impl Into<String>, center: Point, radius: f32) -> Result<Self, ShapeError> {
        Self::new(id.into(), ShapeKind::Circle { radius }, center)
    }

    /// Creates a diamond from the top-left corner of its bounding box and size.
    pub fn diamond(id: impl Into<String>, origin: Point, size: Size) -> Result<Self, ShapeError> {
        Self::new(id.into(), ShapeKind::Diamond(size), origin)
    }

    fn new(id: String, kind: ShapeKind, position: Point) -> Result<Self, ShapeError> {
        if !position.is_finite() {
            return Err(ShapeError::InvalidPosition {
                id,
                x: position.x(),
                y: position.y(),
            });
        }

        match kind {
            ShapeKind::Rect(size) | ShapeKind::Diamond(size) if !size.is_valid() => {
                Err(ShapeError::InvalidSize {
                    id,
                    width: size.width(),
                    height: size.height(),
                })
            }
            ShapeKind::Circle { radius } if !(radius.is_finite() && radius >= 0.0) => {
                Err(ShapeError::InvalidRadius { id, radius })
            }
            _ => Ok(Self { id, kind, position }),
        }
    }

    /// Element id this shape belongs to
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Reference point as given at construction (top-left or center, see [`ShapeKind`])
    pub fn position(&self) -> Point {
        self.position
    }

    /// Geometric center used as the origin of border rays
    pub fn center(&self) -> Point {
        match self.kind {
            ShapeKind::Rect(size) | ShapeKind::Diamond(size) => {
                Bounds::from_origin(self.position, size).center()
            }
            ShapeKind::Circle { .. } => self.position,
        }
    }

    /// Axis-aligned bounding box
    pub fn bounds(&self) -> Bounds {
        match self.kind {
            ShapeKind::Rect(size) | ShapeKind::Diamond(size) => {
                Bounds::from_origin(self.position, size)
            }
            ShapeKind::Circle { radius } => self
                .position
                .to_bounds(Size::new(radius * 2.0, radius * 2.0)),
        }
    }

    /// Anchor point on this shape's border facing `toward`.
    ///
    /// See [`border_point`].
    pub fn border_point(&self, toward: Point, mode: AnchorMode) -> Point {
        border_point(self, toward, mode)
    }
}
