//! # Gridframe Core
//!
//! Layout schema engine for multi-breakpoint visual UI building.
//! Compiles to WASM so the editor can normalize and validate per drag-frame.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              gridframe-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Schema Model    │  Normalizer              │
//! │  - Components    │  - Breakpoint order      │
//! │  - Breakpoints   │  - Layout backfill       │
//! │  - Placements    │  - Document-order sync   │
//! ├─────────────────────────────────────────────┤
//! │  Validator       │  Grid / Links            │
//! │  - Geometry      │  - CSS grid conversion   │
//! │  - References    │  - Complexity classifier │
//! │  - Diagnostics   │  - Union-find groups     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every operation is a pure function over an immutable snapshot: callers
//! normalize a raw schema, validate the result, and independently ask for
//! grid positions or cross-breakpoint link groups. Nothing here performs
//! I/O or holds state between calls.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod links;
pub mod model;
pub mod normalize;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use defaults::{default_breakpoints, template_for, ComponentTemplate};
pub use error::{SchemaError, SchemaResult};
pub use grid::{
    analyze_complexity, to_grid_positions, ComplexityReport, GridConversion, GridPosition,
    Recommendation,
};
pub use links::{
    are_linked, compute_groups, get_group, validate_links, ComponentLink, LinkDiagnostic,
    LinkErrorCode, LinkGraph, LinkReport,
};
pub use model::{
    Breakpoint, CanvasLayout, Component, FlexDirection, LayoutConfig, LayoutStructure, LayoutStyle,
    PositionOffsets, Positioning, Schema, SemanticRole, SCHEMA_VERSION,
};
pub use normalize::normalize;
pub use validate::{validate, Diagnostic, DiagnosticCode, Severity, ValidationReport};

/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
