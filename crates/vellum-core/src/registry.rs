//! Per-pass lookup table of resolved shapes.

use indexmap::IndexMap;
use log::trace;

use crate::{geometry::Bounds, shape::ShapeDescriptor};

/// Shapes of a single rendering pass, keyed by element id.
///
/// The registry is filled while nodes are placed and only read while
/// connectors are routed. Iteration follows first-insertion order.
#[derive(Debug, Default, Clone)]
pub struct ShapeRegistry {
    shapes: IndexMap<String, ShapeDescriptor>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `shape` under its id, returning any descriptor it replaced.
    pub fn register(&mut self, shape: ShapeDescriptor) -> Option<ShapeDescriptor> {
        trace!(id = shape.id(), kind = shape.kind().name(); "Registering shape");
        self.shapes.insert(shape.id().to_string(), shape)
    }

    pub fn lookup(&self, id: &str) -> Option<&ShapeDescriptor> {
        self.shapes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeDescriptor> {
        self.shapes.values()
    }

    /// Union of all shape bounds, or `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        self.iter()
            .map(ShapeDescriptor::bounds)
            .reduce(|acc, b| acc.merge(&b))
    }
}

impl FromIterator<ShapeDescriptor> for ShapeRegistry {
    fn from_iter<T: IntoIterator<Item = ShapeDescriptor>>(iter: T) -> Self {
        let mut registry = Self::new();
        for shape in iter {
            registry.register(shape);
        }
        registry
    }
}
