//! Configuration types for Vellum diagram rendering.
//!
//! All types implement [`serde::Deserialize`] and every section is
//! optional, so an empty TOML file yields [`AppConfig::default`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`StyleConfig`] - Canvas background, stroke color, font and margin.
//! - [`TextConfig`] - Label wrapping budget and font metrics.
//! - [`RoutingConfig`] - Anchor mode and per-diagram arrowhead settings.
//!
//! # Example
//!
//! ```
//! # use vellum::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [routing.state]
//!     arrowhead = "strokes"
//! "#).unwrap();
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use vellum_core::{
    color::Color,
    routing::{ArrowConfig, ArrowheadStyle},
    shape::AnchorMode,
    text::WrapPolicy,
};

use crate::model::DiagramKind;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Text configuration section.
    #[serde(default)]
    text: TextConfig,

    /// Routing configuration section.
    #[serde(default)]
    routing: RoutingConfig,
}

impl AppConfig {
    pub fn new(style: StyleConfig, text: TextConfig, routing: RoutingConfig) -> Self {
        Self {
            style,
            text,
            routing,
        }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the text configuration.
    pub fn text(&self) -> &TextConfig {
        &self.text
    }

    /// Returns the routing configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Checks every value that is only parsed lazily.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.style.background_color()?;
        self.style.stroke_color()?;
        self.text.validate()?;
        self.routing.validate()
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Canvas background, as a color string. Transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Outline and connector color, as a color string.
    #[serde(default)]
    stroke_color: Option<String>,

    #[serde(default)]
    font_family: Option<String>,

    /// Space around the content, in pixels.
    #[serde(default)]
    margin: Option<f32>,
}

impl StyleConfig {
    pub const DEFAULT_FONT_FAMILY: &'static str = "Arial";
    pub const DEFAULT_MARGIN: f32 = 20.0;

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed stroke [`Color`], black by default.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        Color::parse_or(self.stroke_color.as_deref(), Color::default())
            .map_err(|err| format!("Invalid stroke color in config: {err}"))
    }

    pub fn font_family(&self) -> &str {
        self.font_family
            .as_deref()
            .unwrap_or(Self::DEFAULT_FONT_FAMILY)
    }

    /// Margin in pixels; negative values are treated as zero.
    pub fn margin(&self) -> f32 {
        self.margin.unwrap_or(Self::DEFAULT_MARGIN).max(0.0)
    }
}

/// Label wrapping and font metrics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Budget for labels wrapped by character count
    max_chars: usize,
    font_size: f32,
    /// Baseline distance between wrapped lines
    line_height: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            max_chars: 20,
            font_size: 11.0,
            line_height: 12.0,
        }
    }
}

impl TextConfig {
    pub fn new(max_chars: usize, font_size: f32, line_height: f32) -> Self {
        Self {
            max_chars,
            font_size,
            line_height,
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Character-count policy using `max_chars`
    pub fn char_policy(&self) -> WrapPolicy {
        WrapPolicy::CharCount {
            max_chars: self.max_chars,
        }
    }

    /// Approximate-width policy for a box `max_width` pixels wide
    pub fn width_policy(&self, max_width: f32) -> WrapPolicy {
        WrapPolicy::ApproxWidth {
            max_width,
            font_size: self.font_size,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(format!("text.font_size must be positive, got {}", self.font_size));
        }
        if !(self.line_height.is_finite() && self.line_height >= 0.0) {
            return Err(format!(
                "text.line_height must not be negative, got {}",
                self.line_height
            ));
        }
        Ok(())
    }
}

/// Overrides for one diagram kind's arrowheads; unset fields keep the kind default.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrowOverrides {
    #[serde(default)]
    arrowhead: Option<ArrowheadStyle>,
    #[serde(default)]
    length: Option<f32>,
    /// Degrees between the shaft and each wing
    #[serde(default)]
    half_angle: Option<f32>,
}

impl ArrowOverrides {
    pub fn new(arrowhead: Option<ArrowheadStyle>, length: Option<f32>) -> Self {
        Self {
            arrowhead,
            length,
            half_angle: None,
        }
    }

    fn apply(&self, mut arrow: ArrowConfig) -> ArrowConfig {
        if let Some(style) = self.arrowhead {
            arrow = arrow.with_style(style);
        }
        if let Some(length) = self.length {
            arrow = arrow.with_length(length);
        }
        if let Some(degrees) = self.half_angle {
            arrow = arrow.with_half_angle_degrees(degrees);
        }
        arrow
    }

    fn validate(&self, section: &str) -> Result<(), String> {
        if let Some(length) = self.length.filter(|l| !(l.is_finite() && *l >= 0.0)) {
            return Err(format!("routing.{section}.length must not be negative, got {length}"));
        }
        if let Some(degrees) = self
            .half_angle
            .filter(|d| !(d.is_finite() && *d > 0.0 && *d < 90.0))
        {
            return Err(format!(
                "routing.{section}.half_angle must be between 0 and 90 degrees, got {degrees}"
            ));
        }
        Ok(())
    }
}

/// Connector routing settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    anchor_mode: AnchorMode,
    #[serde(default)]
    activity: ArrowOverrides,
    #[serde(default)]
    class: ArrowOverrides,
    #[serde(default)]
    state: ArrowOverrides,
    #[serde(default, rename = "use-case")]
    use_case: ArrowOverrides,
}

impl RoutingConfig {
    pub fn with_anchor_mode(mut self, anchor_mode: AnchorMode) -> Self {
        self.anchor_mode = anchor_mode;
        self
    }

    pub fn with_overrides(mut self, kind: DiagramKind, overrides: ArrowOverrides) -> Self {
        *self.overrides_mut(kind) = overrides;
        self
    }

    pub fn anchor_mode(&self) -> AnchorMode {
        self.anchor_mode
    }

    /// Arrowhead settings for connectors of `kind`.
    pub fn arrow(&self, kind: DiagramKind) -> ArrowConfig {
        self.overrides(kind).apply(default_arrow(kind))
    }

    fn overrides(&self, kind: DiagramKind) -> &ArrowOverrides {
        match kind {
            DiagramKind::Activity => &self.activity,
            DiagramKind::Class => &self.class,
            DiagramKind::State => &self.state,
            DiagramKind::UseCase => &self.use_case,
        }
    }

    fn overrides_mut(&mut self, kind: DiagramKind) -> &mut ArrowOverrides {
        match kind {
            DiagramKind::Activity => &mut self.activity,
            DiagramKind::Class => &mut self.class,
            DiagramKind::State => &mut self.state,
            DiagramKind::UseCase => &mut self.use_case,
        }
    }

    fn validate(&self) -> Result<(), String> {
        [
            DiagramKind::Activity,
            DiagramKind::Class,
            DiagramKind::State,
            DiagramKind::UseCase,
        ]
        .into_iter()
        .try_for_each(|kind| self.overrides(kind).validate(kind.name()))
    }
}

/// Built-in arrowheads: open strokes for activity flows, filled
/// triangles for state transitions, plain lines elsewhere.
fn default_arrow(kind: DiagramKind) -> ArrowConfig {
    match kind {
        DiagramKind::Activity => ArrowConfig::new(ArrowheadStyle::Strokes, 15.0),
        DiagramKind::Class => ArrowConfig::new(ArrowheadStyle::None, 10.0),
        DiagramKind::State => ArrowConfig::new(ArrowheadStyle::Filled, 10.0),
        DiagramKind::UseCase => ArrowConfig::new(ArrowheadStyle::None, 10.0),
    }
}
