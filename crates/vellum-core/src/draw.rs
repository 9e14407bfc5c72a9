//! Drawing primitives.
//!
//! The engine never talks to an output format directly. Every stage emits
//! [`Primitive`]s into a [`Drawing`], tagged with the [`RenderLayer`] that
//! controls their z-order. An export sink walks the drawing afterwards.

mod layer;
mod primitive;
mod stroke;

pub use layer::{Drawing, RenderLayer};
pub use primitive::{FontSpec, Paint, Primitive, TextAnchor, TextRun};
pub use stroke::{StrokeDefinition, StrokeStyle};
