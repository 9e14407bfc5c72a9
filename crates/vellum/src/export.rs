//! Export of finished drawings.
//!
//! The drawing produced by a rendering pass is already positioned and
//! layered; exporters only translate it into an output format.
//!
//! # Available Backends
//!
//! - [`svg`]: SVG documents via [`svg::SvgExporter`]

pub mod svg;
