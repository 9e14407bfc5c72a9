//! Layer-based ordering of drawing primitives.
//!
//! # Example
//!
//! ```
//! use vellum_core::draw::{Drawing, Paint, Primitive, RenderLayer};
//! use vellum_core::geometry::{Bounds, Point, Size};
//!
//! let mut drawing = Drawing::new();
//! let bounds = Bounds::from_origin(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
//! drawing.add(RenderLayer::Content, Primitive::rect(bounds, Paint::default()));
//! drawing.add(RenderLayer::Background, Primitive::rect(bounds, Paint::default()));
//!
//! let layers = drawing.into_layers();
//! assert_eq!(layers[0].0, RenderLayer::Background);
//! ```

use crate::geometry::Bounds;

use super::Primitive;

/// Rendering layers, bottom to top.
///
/// The `Ord` derive uses declaration order, so the first variant renders
/// first (bottom) and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas and element fills
    Background,
    /// Shape bodies and outlines - default layer
    Content,
    /// Connector segments and arrowheads
    Connector,
    /// Labels
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Connector => "connector",
            Self::Text => "text",
        }
    }
}

/// Primitives collected in emission order, each tagged with its layer.
#[derive(Debug, Default, Clone)]
pub struct Drawing {
    items: Vec<(RenderLayer, Primitive)>,
}

impl Drawing {
    /// Creates a new empty `Drawing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primitive to `layer`.
    pub fn add(&mut self, layer: RenderLayer, primitive: Primitive) {
        self.items.push((layer, primitive));
    }

    /// Appends every primitive to `layer`.
    pub fn extend(&mut self, layer: RenderLayer, primitives: impl IntoIterator<Item = Primitive>) {
        self.items
            .extend(primitives.into_iter().map(|primitive| (layer, primitive)));
    }

    /// Appends all items of `other`, keeping their layers.
    pub fn merge(&mut self, other: Drawing) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no primitives in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items in emission order
    pub fn iter(&self) -> impl Iterator<Item = &(RenderLayer, Primitive)> {
        self.items.iter()
    }

    /// Union of all primitive bounds, or `None` if nothing has an extent.
    pub fn bounds(&self) -> Option<Bounds> {
        self.items
            .iter()
            .filter_map(|(_, primitive)| primitive.bounds())
            .reduce(|acc, b| acc.merge(&b))
    }

    /// Groups primitives per layer, bottom layer first, consuming the drawing.
    ///
    /// Within a layer the emission order is preserved. Empty layers are skipped.
    pub fn into_layers(mut self) -> Vec<(RenderLayer, Vec<Primitive>)> {
        // Stable sort keeps emission order within each layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<(RenderLayer, Vec<Primitive>)> = Vec::new();
        for (layer, primitive) in self.items {
            match result.last_mut() {
                Some((current, group)) if *current == layer => group.push(primitive),
                _ => result.push((layer, vec![primitive])),
            }
        }
        result
    }
}
