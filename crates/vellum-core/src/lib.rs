//! Vellum Core Types and Engine
//!
//! This crate provides the diagram-independent engine behind Vellum:
//!
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Shapes**: Shape descriptors and border anchoring ([`shape`] module)
//! - **Registry**: Per-pass shape lookup table ([`registry::ShapeRegistry`])
//! - **Routing**: Connector paths and arrowheads ([`routing`] module)
//! - **Text**: Label wrapping policies ([`text`] module)
//! - **Draw**: Drawing primitives grouped by layer ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod registry;
pub mod routing;
pub mod shape;
pub mod text;
