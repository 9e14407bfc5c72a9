//! CLI logic for the Vellum diagram renderer.
//!
//! Reads a TOML scene, renders it with the configuration found by
//! [`config::load_config`] and writes the SVG output.

pub mod config;
pub mod error_adapter;

mod args;

pub use args::Args;

use std::fs;

use log::info;

use vellum::{DiagramBuilder, VellumError};

/// Run the Vellum CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `VellumError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Malformed elements
/// - Export errors
pub fn run(args: &Args) -> Result<(), VellumError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let rendered = builder.render(&document)?;
    let stats = rendered.stats();
    let svg = builder.export_svg(rendered)?;

    fs::write(&args.output, svg)?;

    info!(
        output_file = args.output,
        nodes = stats.nodes,
        connectors_routed = stats.connectors_routed,
        connectors_skipped = stats.connectors_skipped;
        "SVG exported successfully"
    );

    Ok(())
}
