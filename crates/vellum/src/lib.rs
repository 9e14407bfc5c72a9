//! Vellum - layout and connector routing for UML-style diagrams.
//!
//! Vellum takes diagram records whose elements already carry positions
//! (activity, class, state and use-case diagrams), resolves each element to
//! a simple shape, routes connectors between shape borders, wraps labels
//! and emits a layered drawing that exports to SVG.

pub mod config;
pub mod export;
pub mod model;
pub mod render;

mod adapter;
mod error;

pub use vellum_core::{color, draw, geometry, registry, routing, shape, text};

pub use error::VellumError;

use log::{debug, info, trace};

use config::AppConfig;
use export::svg::SvgExporter;
use model::DiagramDocument;
use render::{DiagramRenderer, RenderedDiagram};

/// Builder for parsing and rendering Vellum diagrams.
///
/// # Examples
///
/// ```rust
/// use vellum::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
///     kind = "state"
///
///     [[node]]
///     id = "idle"
///     element = "state"
///     x = 0.0
///     y = 0.0
///     name = "Idle"
///
///     [[node]]
///     id = "busy"
///     element = "state"
///     x = 300.0
///     y = 0.0
///     name = "Busy"
///
///     [[connector]]
///     from = "idle"
///     to = "busy"
///     name = "start"
/// "#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let document = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&document).expect("Failed to render");
/// assert!(svg.contains("Idle"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including style, text and routing settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a TOML scene into a diagram document.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Document`] carrying the source and the span of
    /// the offending value for syntax errors, unknown fields and unknown
    /// element types.
    pub fn parse(&self, source: &str) -> Result<DiagramDocument, VellumError> {
        info!("Parsing diagram document");

        let document: DiagramDocument =
            toml::from_str(source).map_err(|err| VellumError::new_document_error(&err, source))?;

        debug!(
            kind = document.kind.name(),
            nodes = document.nodes.len(),
            connectors = document.connectors.len();
            "Document parsed successfully"
        );
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Run a rendering pass and return the layered drawing with statistics.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Config`] for an invalid configuration and
    /// [`VellumError::Element`] for the first malformed node or connector.
    pub fn render(&self, document: &DiagramDocument) -> Result<RenderedDiagram, VellumError> {
        self.config.validate().map_err(VellumError::Config)?;
        DiagramRenderer::new(&self.config).render(document)
    }

    /// Render a diagram document to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DiagramBuilder::render`], plus
    /// [`VellumError::Export`] if the drawing cannot be serialized.
    pub fn render_svg(&self, document: &DiagramDocument) -> Result<String, VellumError> {
        let rendered = self.render(document)?;
        self.export_svg(rendered)
    }

    /// Serialize the drawing of a finished rendering pass to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`VellumError::Config`] for an invalid background color and
    /// [`VellumError::Export`] if the drawing cannot be serialized.
    pub fn export_svg(&self, rendered: RenderedDiagram) -> Result<String, VellumError> {
        let exporter = SvgExporter::new(self.config.style())?;
        let svg = exporter.export(rendered.into_drawing())?;

        info!("SVG rendered successfully");
        Ok(svg.to_string())
    }
}
