//! Error types for Vellum operations.
//!
//! This module provides the main error type [`VellumError`] which wraps
//! the conditions that abort a rendering pass.

use std::{io, ops::Range};

use thiserror::Error;

use vellum_core::{color::ColorError, shape::ShapeError};

/// The main error type for Vellum operations.
///
/// # Diagnostic Variants
///
/// The `Document` variant keeps the scene source and, when known, the byte
/// span of the problem so callers can point at the offending line.
#[derive(Debug, Error)]
pub enum VellumError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Document {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Invalid element `{id}`: {message}")]
    Element { id: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl VellumError {
    /// Create a new `Document` error from a TOML parse failure and its source.
    pub fn new_document_error(err: &toml::de::Error, src: impl Into<String>) -> Self {
        Self::Document {
            message: err.message().to_string(),
            span: err.span(),
            src: src.into(),
        }
    }

    /// Create a new `Element` error.
    pub fn element(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Element {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Wrap a color parse failure for element `id`.
    pub fn invalid_color(id: impl Into<String>, err: ColorError) -> Self {
        Self::element(id, err.to_string())
    }
}

impl From<ShapeError> for VellumError {
    fn from(err: ShapeError) -> Self {
        Self::element(err.id().to_string(), err.to_string())
    }
}
