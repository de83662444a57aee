//! Schema data model - the serialized contract shared with the editor UI,
//! the instruction-formatting layer, and the file/export layer.
//!
//! Field names and enumeration values are part of the externally visible
//! contract: `schemaVersion`, `components`, `breakpoints`, `layouts`,
//! `canvasLayout`/`responsiveCanvasLayout`, `positioning.type` and
//! `layout.type`. Maps that appear in the document (`layouts`, `roles`,
//! `responsiveCanvasLayout`) are ordered so a normalized schema serializes
//! deterministically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

/// The schema document version this engine reads and writes.
pub const SCHEMA_VERSION: &str = "1.0";

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Semantic role of a component, mirroring the HTML sectioning vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticRole {
    /// Page or section header.
    Header,
    /// Navigation block.
    Nav,
    /// Primary content area.
    Main,
    /// Complementary sidebar content.
    Aside,
    /// Page or section footer.
    Footer,
    /// Generic document section.
    Section,
    /// Self-contained composition.
    Article,
    /// Neutral block container.
    Div,
    /// Form region.
    Form,
}

impl std::fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Nav => "nav",
            Self::Main => "main",
            Self::Aside => "aside",
            Self::Footer => "footer",
            Self::Section => "section",
            Self::Article => "article",
            Self::Div => "div",
            Self::Form => "form",
        };
        write!(f, "{name}")
    }
}

/// A component's rectangle on a breakpoint's canvas grid.
///
/// Coordinates are 0-based grid cells with the origin at the top-left.
/// Values are `f64` so that fractional input can be represented and
/// diagnosed by the validator instead of being rejected at parse time;
/// well-formed placements are non-negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasLayout {
    /// Column of the left edge.
    pub x: f64,
    /// Row of the top edge.
    pub y: f64,
    /// Width in columns.
    pub width: f64,
    /// Height in rows.
    pub height: f64,
}

impl CanvasLayout {
    /// Create a placement from its four cell coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Column one past the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Row one past the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether every coordinate is a whole number of cells.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.fract() == 0.0)
    }
}

/// Offsets and stacking order shared by the positioned variants.
///
/// Serde cannot flatten a struct into an internally tagged enum variant,
/// so [`Positioning`] carries this as an explicit `offsets` field in the
/// document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionOffsets {
    /// Offset from the top edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Offset from the right edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    /// Offset from the bottom edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    /// Offset from the left edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    /// Stacking order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

/// CSS positioning descriptor, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Positioning {
    /// Normal document flow.
    Static,
    /// Offset relative to the component's flow position.
    Relative {
        /// Edge offsets and stacking order.
        #[serde(default)]
        offsets: PositionOffsets,
    },
    /// Fixed to the viewport.
    Fixed {
        /// Edge offsets and stacking order.
        #[serde(default)]
        offsets: PositionOffsets,
    },
    /// Sticks within the nearest scrolling ancestor.
    Sticky {
        /// Edge offsets and stacking order.
        #[serde(default)]
        offsets: PositionOffsets,
    },
    /// Positioned against the nearest positioned ancestor.
    Absolute {
        /// Edge offsets and stacking order.
        #[serde(default)]
        offsets: PositionOffsets,
    },
}

impl Default for Positioning {
    fn default() -> Self {
        Self::Static
    }
}

/// Main axis direction for flex layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    /// Children laid out left to right.
    #[default]
    Row,
    /// Children laid out top to bottom.
    Column,
}

/// Internal layout descriptor for a component's children, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutStyle {
    /// No internal layout.
    None,
    /// Flexbox layout.
    Flex {
        /// Main axis direction.
        #[serde(default)]
        direction: FlexDirection,
        /// Gap between children in pixels.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gap: Option<f64>,
        /// Whether children wrap onto new lines.
        #[serde(default)]
        wrap: bool,
        /// Main axis distribution keyword.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        justify: Option<String>,
        /// Cross axis alignment keyword.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        align: Option<String>,
    },
    /// CSS grid layout.
    Grid {
        /// Number of columns.
        columns: u32,
        /// Number of rows, if fixed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
        /// Gap between cells in pixels.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gap: Option<f64>,
    },
    /// Width-constrained centered container.
    Container {
        /// Maximum content width in pixels.
        #[serde(rename = "maxWidth", default, skip_serializing_if = "Option::is_none")]
        max_width: Option<f64>,
        /// Inner padding in pixels.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        padding: Option<f64>,
    },
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self::None
    }
}

/// A placeable UI block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique, stable identifier.
    pub id: String,
    /// PascalCase display name, matching `^[A-Z][a-zA-Z0-9]*$`.
    pub name: String,
    /// Semantic role tag.
    pub role: SemanticRole,
    /// CSS positioning descriptor.
    #[serde(default)]
    pub positioning: Positioning,
    /// Internal layout descriptor.
    #[serde(default)]
    pub layout: LayoutStyle,
    /// Default canvas placement, used by any breakpoint without an
    /// explicit override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_layout: Option<CanvasLayout>,
    /// Per-breakpoint placement overrides, keyed by breakpoint name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responsive_canvas_layout: BTreeMap<String, CanvasLayout>,
}

impl Component {
    /// Create a component with default positioning and no layout.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: SemanticRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            positioning: Positioning::default(),
            layout: LayoutStyle::default(),
            canvas_layout: None,
            responsive_canvas_layout: BTreeMap::new(),
        }
    }

    /// Set the default canvas placement.
    #[must_use]
    pub fn with_canvas_layout(mut self, layout: CanvasLayout) -> Self {
        self.canvas_layout = Some(layout);
        self
    }

    /// Set a placement override for one breakpoint.
    #[must_use]
    pub fn with_responsive_layout(
        mut self,
        breakpoint: impl Into<String>,
        layout: CanvasLayout,
    ) -> Self {
        self.responsive_canvas_layout
            .insert(breakpoint.into(), layout);
        self
    }

    /// Set the internal layout descriptor.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutStyle) -> Self {
        self.layout = layout;
        self
    }

    /// Set the positioning descriptor.
    #[must_use]
    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }
}

/// A named viewport tier with its own grid dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Unique breakpoint name, the key into `Schema::layouts`.
    pub name: String,
    /// Minimum viewport width in pixels. Validated non-negative.
    pub min_width: i64,
    /// Number of grid columns on this breakpoint's canvas.
    pub grid_cols: u32,
    /// Number of grid rows on this breakpoint's canvas.
    pub grid_rows: u32,
}

impl Breakpoint {
    /// Create a breakpoint tier.
    #[must_use]
    pub fn new(name: impl Into<String>, min_width: i64, grid_cols: u32, grid_rows: u32) -> Self {
        Self {
            name: name.into(),
            min_width,
            grid_cols,
            grid_rows,
        }
    }
}

/// Overall arrangement of a breakpoint's document flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStructure {
    /// Components stack top to bottom.
    #[default]
    Vertical,
    /// Components flow left to right.
    Horizontal,
    /// Components sit on an explicit grid.
    Grid,
}

/// Per-breakpoint document order and role assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Overall arrangement.
    #[serde(default)]
    pub structure: LayoutStructure,
    /// Component ids in declared document order.
    #[serde(default)]
    pub components: Vec<String>,
    /// Semantic role assignments; every referenced id must also appear in
    /// `components`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub roles: BTreeMap<SemanticRole, String>,
}

impl LayoutConfig {
    /// Create an empty vertical layout.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            structure: LayoutStructure::Vertical,
            components: Vec::new(),
            roles: BTreeMap::new(),
        }
    }
}

/// The complete layout schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Document format version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// All placeable components.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Viewport tiers, canonically ordered by `(minWidth, name)`.
    #[serde(default)]
    pub breakpoints: Vec<Breakpoint>,
    /// Per-breakpoint layout configuration, keyed by breakpoint name.
    #[serde(default)]
    pub layouts: BTreeMap<String, LayoutConfig>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    /// Create an empty schema at the current version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            components: Vec::new(),
            breakpoints: Vec::new(),
            layouts: BTreeMap::new(),
        }
    }

    /// Look up a component by id.
    #[must_use]
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Look up a breakpoint by name.
    #[must_use]
    pub fn breakpoint(&self, name: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|b| b.name == name)
    }

    /// Ids of all declared components, in declaration order.
    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.id.as_str())
    }

    /// Parse a schema document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Serialization`] if the JSON is malformed or
    /// does not match the document shape.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        serde_json::from_str(json).map_err(SchemaError::Serialization)
    }

    /// Serialize the schema to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> SchemaResult<String> {
        serde_json::to_string(self).map_err(SchemaError::Serialization)
    }

    /// Serialize the schema to pretty-printed JSON for export.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Serialization`] if serialization fails.
    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        serde_json::to_string_pretty(self).map_err(SchemaError::Serialization)
    }
}
