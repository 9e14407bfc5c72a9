//! Typed diagram records.
//!
//! These are the inputs of a rendering pass: one [`DiagramDocument`] with
//! its node and connector records, already extracted from whatever model
//! format produced them. They deserialize from the TOML scene format:
//!
//! ```toml
//! kind = "activity"
//!
//! [[node]]
//! id = "start"
//! element = "initial-node"
//! x = 100.0
//! y = 20.0
//!
//! [[connector]]
//! from = "start"
//! to = "review"
//! ```

use std::fmt;

use serde::Deserialize;

use vellum_core::{geometry::Point, routing::ArrowheadStyle};

/// The diagram family a document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramKind {
    Activity,
    Class,
    State,
    UseCase,
}

impl DiagramKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Class => "class",
            Self::State => "state",
            Self::UseCase => "use-case",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Model element type of a node record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    InitialNode,
    FinalNode,
    Action,
    Activity,
    Decision,
    ObjectNode,
    AcceptEvent,
    SendSignal,
    Class,
    State,
    Actor,
    UseCase,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::InitialNode => "initial-node",
            Self::FinalNode => "final-node",
            Self::Action => "action",
            Self::Activity => "activity",
            Self::Decision => "decision",
            Self::ObjectNode => "object-node",
            Self::AcceptEvent => "accept-event",
            Self::SendSignal => "send-signal",
            Self::Class => "class",
            Self::State => "state",
            Self::Actor => "actor",
            Self::UseCase => "use-case",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A plain coordinate pair as it appears in documents
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
}

impl PointRecord {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Self {
        Point::new(record.x, record.y)
    }
}

/// One diagram element. `x`/`y` is always the top-left corner of its box.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord {
    pub id: String,
    pub element: ElementKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub name: Option<String>,
    /// Body fill as a CSS color string
    #[serde(default)]
    pub background: Option<String>,
    /// Text and solid-mark color as a CSS color string
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub operations: Vec<String>,
    /// Nested entries listed inside a state
    #[serde(default)]
    pub children: Vec<String>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, element: ElementKind, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            element,
            x,
            y,
            width: None,
            height: None,
            name: None,
            background: None,
            foreground: None,
            attributes: Vec::new(),
            operations: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn with_attributes<S: Into<String>>(
        mut self,
        attributes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_operations<S: Into<String>>(
        mut self,
        operations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.operations = operations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children<S: Into<String>>(
        mut self,
        children: impl IntoIterator<Item = S>,
    ) -> Self {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Display name, empty when absent
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// A relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit path, used as-is when it has at least two points
    #[serde(default)]
    pub points: Vec<PointRecord>,
    /// Where the label is placed, if not on the path
    #[serde(default)]
    pub caption: Option<PointRecord>,
    /// Stroke pattern such as `dashed`
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub arrowhead: Option<ArrowheadStyle>,
    #[serde(default)]
    pub arrow_length: Option<f32>,
}

impl ConnectorRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: None,
            from: from.into(),
            to: to.into(),
            name: None,
            points: Vec::new(),
            caption: None,
            line: None,
            arrowhead: None,
            arrow_length: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_points(mut self, points: Vec<PointRecord>) -> Self {
        self.points = points;
        self
    }

    pub fn with_caption(mut self, caption: PointRecord) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    pub fn with_arrowhead(mut self, style: ArrowheadStyle) -> Self {
        self.arrowhead = Some(style);
        self
    }

    /// Identifier used in diagnostics: the explicit id or `from->to`
    pub fn display_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}->{}", self.from, self.to))
    }
}

/// A complete diagram: its kind, nodes and connectors in document order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramDocument {
    pub kind: DiagramKind,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeRecord>,
    #[serde(default, rename = "connector")]
    pub connectors: Vec<ConnectorRecord>,
}

impl DiagramDocument {
    pub fn new(kind: DiagramKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            connectors: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: NodeRecord) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_connector(mut self, connector: ConnectorRecord) -> Self {
        self.connectors.push(connector);
        self
    }
}
