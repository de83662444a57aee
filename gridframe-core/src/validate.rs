//! Canvas-grid validation.
//!
//! `validate` runs every check to completion and returns the full
//! diagnostic picture in one pass; it never panics and never short
//! circuits. Errors make the schema structurally unusable
//! (`valid == false`); warnings flag placements that are legal but likely
//! to produce a misleading result downstream. Consumers match on
//! [`DiagnosticCode`], not on message text.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geometry::{placed_components, placement_for, row_buckets, visual_order, x_ranges_intersect};
use crate::model::{Schema, SCHEMA_VERSION};

/// Diagnostic severity. Warnings never affect validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Schema is structurally unusable.
    Error,
    /// Schema is usable but likely suboptimal or ambiguous.
    Warning,
}

/// Stable machine-readable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    /// Document version differs from [`SCHEMA_VERSION`].
    InvalidVersion,
    /// Schema declares no components.
    NoComponents,
    /// Two components share an id.
    DuplicateComponentId,
    /// Component name is not PascalCase alphanumeric.
    InvalidComponentName,
    /// Schema declares no breakpoints.
    NoBreakpoints,
    /// Two breakpoints share a name.
    DuplicateBreakpointName,
    /// Breakpoint has a negative minimum width.
    InvalidMinWidth,
    /// Declared breakpoint has no layout configuration.
    MissingLayout,
    /// Layout references a component id that does not exist.
    InvalidComponentReference,
    /// Role assignment targets an id outside the layout's components.
    RoleComponentNotInLayout,
    /// Present layout configuration with an empty components list.
    EmptyLayout,
    /// Placement has a negative x or y.
    CanvasNegativeCoordinate,
    /// Placement has zero width or height.
    CanvasZeroSize,
    /// Placement coordinate is not a whole cell.
    CanvasFractionalCoordinate,
    /// Placement extends past the breakpoint's grid.
    CanvasOutOfBounds,
    /// Placed component missing from every breakpoint's document order.
    CanvasComponentNotInLayout,
    /// Two placements share a row and their x-ranges intersect.
    CanvasComponentsOverlap,
    /// Visual order disagrees with declared document order.
    CanvasLayoutOrderMismatch,
    /// Two or more components occupy the same row.
    ComplexGridLayoutDetected,
}

impl DiagnosticCode {
    /// The fixed severity of this code.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::InvalidVersion
            | Self::NoComponents
            | Self::DuplicateComponentId
            | Self::InvalidComponentName
            | Self::NoBreakpoints
            | Self::DuplicateBreakpointName
            | Self::InvalidMinWidth
            | Self::MissingLayout
            | Self::InvalidComponentReference
            | Self::RoleComponentNotInLayout
            | Self::EmptyLayout
            | Self::CanvasNegativeCoordinate => Severity::Error,
            Self::CanvasZeroSize
            | Self::CanvasFractionalCoordinate
            | Self::CanvasOutOfBounds
            | Self::CanvasComponentNotInLayout
            | Self::CanvasComponentsOverlap
            | Self::CanvasLayoutOrderMismatch
            | Self::ComplexGridLayoutDetected => Severity::Warning,
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Machine-readable code; the contract consumers match on.
    pub code: DiagnosticCode,
    /// Severity derived from the code.
    pub severity: Severity,
    /// Human-readable description. Not part of the contract.
    pub message: String,
    /// Component the finding is about, when applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Breakpoint the finding is about, when applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with no context fields.
    #[must_use]
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            component: None,
            breakpoint: None,
        }
    }

    /// Attach the component this finding is about.
    #[must_use]
    pub fn with_component(mut self, id: impl Into<String>) -> Self {
        self.component = Some(id.into());
        self
    }

    /// Attach the breakpoint this finding is about.
    #[must_use]
    pub fn with_breakpoint(mut self, name: impl Into<String>) -> Self {
        self.breakpoint = Some(name.into());
        self
    }
}

/// The complete outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Exactly `errors.is_empty()`.
    pub valid: bool,
    /// Findings that block downstream consumption.
    pub errors: Vec<Diagnostic>,
    /// Findings that do not affect validity.
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Whether the schema is structurally usable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether a finding with the given code is present at any severity.
    #[must_use]
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|d| d.code == code)
    }
}

/// Whether a component name matches `^[A-Z][a-zA-Z0-9]*$`.
#[must_use]
pub fn is_valid_component_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Validate a schema against every structural and geometric invariant.
///
/// Pure and total: every check runs regardless of earlier findings, and
/// the report's `valid` flag is exactly "no errors were found".
#[must_use]
pub fn validate(schema: &Schema) -> ValidationReport {
    let mut findings = Vec::new();

    check_version(schema, &mut findings);
    check_components(schema, &mut findings);
    check_breakpoints(schema, &mut findings);
    check_layouts(schema, &mut findings);
    check_placements(schema, &mut findings);
    check_membership(schema, &mut findings);
    check_rows(schema, &mut findings);

    let (errors, warnings): (Vec<_>, Vec<_>) = findings
        .into_iter()
        .partition(|d| d.severity == Severity::Error);

    tracing::debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        "validated schema"
    );

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn check_version(schema: &Schema, findings: &mut Vec<Diagnostic>) {
    if schema.schema_version != SCHEMA_VERSION {
        findings.push(Diagnostic::new(
            DiagnosticCode::InvalidVersion,
            format!(
                "Unsupported schema version '{}', expected '{SCHEMA_VERSION}'",
                schema.schema_version
            ),
        ));
    }
}

fn check_components(schema: &Schema, findings: &mut Vec<Diagnostic>) {
    if schema.components.is_empty() {
        findings.push(Diagnostic::new(
            DiagnosticCode::NoComponents,
            "Schema declares no components",
        ));
    }

    let mut seen = HashSet::new();
    for component in &schema.components {
        if !seen.insert(component.id.as_str()) {
            findings.push(
                Diagnostic::new(
                    DiagnosticCode::DuplicateComponentId,
                    format!("Duplicate component id '{}'", component.id),
                )
                .with_component(component.id.clone()),
            );
        }
        if !is_valid_component_name(&component.name) {
            findings.push(
                Diagnostic::new(
                    DiagnosticCode::InvalidComponentName,
                    format!(
                        "Component name '{}' must be PascalCase alphanumeric",
                        component.name
                    ),
                )
                .with_component(component.id.clone()),
            );
        }
    }
}

fn check_breakpoints(schema: &Schema, findings: &mut Vec<Diagnostic>) {
    if schema.breakpoints.is_empty() {
        findings.push(Diagnostic::new(
            DiagnosticCode::NoBreakpoints,
            "Schema declares no breakpoints",
        ));
    }

    let mut seen = HashSet::new();
    for breakpoint in &schema.breakpoints {
        if !seen.insert(breakpoint.name.as_str()) {
            findings.push(
                Diagnostic::new(
                    DiagnosticCode::DuplicateBreakpointName,
                    format!("Duplicate breakpoint name '{}'", breakpoint.name),
                )
                .with_breakpoint(breakpoint.name.clone()),
            );
        }
        if breakpoint.min_width < 0 {
            findings.push(
                Diagnostic::new(
                    DiagnosticCode::InvalidMinWidth,
                    format!(
                        "Breakpoint '{}' has negative minWidth {}",
                        breakpoint.name, breakpoint.min_width
                    ),
                )
                .with_breakpoint(breakpoint.name.clone()),
            );
        }
    }
}

fn check_layouts(schema: &Schema, findings: &mut Vec<Diagnostic>) {
    let known_ids: HashSet<&str> = schema.component_ids().collect();

    for breakpoint in &schema.breakpoints {
        let Some(config) = schema.layouts.get(&breakpoint.name) else {
            findings.push(
                Diagnostic::new(
                    DiagnosticCode::MissingLayout,
                    format!("Breakpoint '{}' has no layout configuration", breakpoint.name),
                )
                .with_breakpoint(breakpoint.name.clone()),
            );
            continue;
        };

        if config.components.is_empty() {
            findings.push(
                Diagnostic::new(
                    DiagnosticCode::EmptyLayout,
                    format!("Layout for breakpoint '{}' lists no components", breakpoint.name),
                )
                .with_breakpoint(breakpoint.name.clone()),
            );
        }

        for id in &config.components {
            if !known_ids.contains(id.as_str()) {
                findings.push(
                    Diagnostic::new(
                        DiagnosticCode::InvalidComponentReference,
                        format!(
                            "Layout for breakpoint '{}' references unknown component '{id}'",
                            breakpoint.name
                        ),
                    )
                    .with_component(id.clone())
                    .with_breakpoint(breakpoint.name.clone()),
                );
            }
        }

        for (role, id) in &config.roles {
            if !config.components.contains(id) {
                findings.push(
                    Diagnostic::new(
                        DiagnosticCode::RoleComponentNotInLayout,
                        format!(
                            "Role '{role}' on breakpoint '{}' targets '{id}', which is not in the layout",
                            breakpoint.name
                        ),
                    )
                    .with_component(id.clone())
                    .with_breakpoint(breakpoint.name.clone()),
                );
            }
        }
    }
}

fn check_placements(schema: &Schema, findings: &mut Vec<Diagnostic>) {
    for breakpoint in &schema.breakpoints {
        for component in &schema.components {
            let Some(layout) = placement_for(component, &breakpoint.name) else {
                continue;
            };

            if layout.x < 0.0 || layout.y < 0.0 {
                findings.push(
                    Diagnostic::new(
                        DiagnosticCode::CanvasNegativeCoordinate,
                        format!(
                            "Component '{}' sits at ({}, {}) on breakpoint '{}'",
                            component.id, layout.x, layout.y, breakpoint.name
                        ),
                    )
                    .with_component(component.id.clone())
                    .with_breakpoint(breakpoint.name.clone()),
                );
            }

            if layout.width == 0.0 || layout.height == 0.0 {
                findings.push(
                    Diagnostic::new(
                        DiagnosticCode::CanvasZeroSize,
                        format!(
                            "Component '{}' has zero size on breakpoint '{}'",
                            component.id, breakpoint.name
                        ),
                    )
                    .with_component(component.id.clone())
                    .with_breakpoint(breakpoint.name.clone()),
                );
            }

            if !layout.is_integral() {
                findings.push(
                    Diagnostic::new(
                        DiagnosticCode::CanvasFractionalCoordinate,
                        format!(
                            "Component '{}' has fractional cell coordinates on breakpoint '{}'",
                            component.id, breakpoint.name
                        ),
                    )
                    .with_component(component.id.clone())
                    .with_breakpoint(breakpoint.name.clone()),
                );
            }

            if layout.right() > f64::from(breakpoint.grid_cols)
                || layout.bottom() > f64::from(breakpoint.grid_rows)
            {
                findings.push(
                    Diagnostic::new(
                        DiagnosticCode::CanvasOutOfBounds,
                        format!(
                            "Component '{}' extends past the {}x{} grid of breakpoint '{}'",
                            component.id, breakpoint.grid_cols, breakpoint.grid_rows, breakpoint.name
                        ),
                    )
                    .with_component(component.id.clone())
                    .with_breakpoint(breakpoint.name.clone()),
                );
            }
        }
    }
}

fn check_membership(schema: &Schema, findings: &mut Vec<Diagnostic>) {
    let listed: HashSet<&str> = schema
        .layouts
        .values()
        .flat_map(|config| config.components.iter().map(String::as_str))
        .collect();

    for component in &schema.components {
        let placed_somewhere = schema
            .breakpoints
            .iter()
            .any(|b| placement_for(component, &b.name).is_some());
        if placed_somewhere && !listed.contains(component.id.as_str()) {
            findings.push(
                Diagnostic::new(
                    DiagnosticCode::CanvasComponentNotInLayout,
                    format!(
                        "Component '{}' is placed on the canvas but absent from every document order",
                        component.id
                    ),
                )
                .with_component(component.id.clone()),
            );
        }
    }
}

fn check_rows(schema: &Schema, findings: &mut Vec<Diagnostic>) {
    for breakpoint in &schema.breakpoints {
        let placed = placed_components(&schema.components, &breakpoint.name);
        let buckets = row_buckets(&placed);

        let mut reported: HashSet<(usize, usize)> = HashSet::new();
        let mut shared_row = None;
        for (row, members) in &buckets {
            if members.len() > 1 && shared_row.is_none() {
                shared_row = Some(*row);
            }
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    let pair = (a.min(b), a.max(b));
                    if reported.contains(&pair) {
                        continue;
                    }
                    let (component_a, layout_a) = placed[pair.0];
                    let (component_b, layout_b) = placed[pair.1];
                    if x_ranges_intersect(layout_a, layout_b) {
                        reported.insert(pair);
                        findings.push(
                            Diagnostic::new(
                                DiagnosticCode::CanvasComponentsOverlap,
                                format!(
                                    "Components '{}' and '{}' overlap on row {row} of breakpoint '{}'",
                                    component_a.id, component_b.id, breakpoint.name
                                ),
                            )
                            .with_component(component_a.id.clone())
                            .with_breakpoint(breakpoint.name.clone()),
                        );
                    }
                }
            }
        }

        if let Some(row) = shared_row {
            findings.push(
                Diagnostic::new(
                    DiagnosticCode::ComplexGridLayoutDetected,
                    format!(
                        "Multiple components share row {row} on breakpoint '{}'; a grid container is required to express this",
                        breakpoint.name
                    ),
                )
                .with_breakpoint(breakpoint.name.clone()),
            );
        }

        if let Some(config) = schema.layouts.get(&breakpoint.name) {
            let visual = visual_order(&schema.components, &breakpoint.name);
            let placed_ids: HashSet<&str> = visual.iter().map(String::as_str).collect();
            let declared_placed: Vec<String> = config
                .components
                .iter()
                .filter(|id| placed_ids.contains(id.as_str()))
                .cloned()
                .collect();
            if !visual.is_empty() && declared_placed != visual {
                findings.push(
                    Diagnostic::new(
                        DiagnosticCode::CanvasLayoutOrderMismatch,
                        format!(
                            "Declared document order on breakpoint '{}' disagrees with the visual (y, x) order",
                            breakpoint.name
                        ),
                    )
                    .with_breakpoint(breakpoint.name.clone()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Breakpoint, CanvasLayout, Component, LayoutConfig, SemanticRole};
    use crate::normalize::normalize;

    fn block(id: &str, x: f64, y: f64, width: f64, height: f64) -> Component {
        Component::new(id, "Block", SemanticRole::Div)
            .with_canvas_layout(CanvasLayout::new(x, y, width, height))
    }

    fn schema_with(components: Vec<Component>) -> Schema {
        let mut schema = Schema::new();
        schema.breakpoints = vec![Breakpoint::new("desktop", 1280, 12, 8)];
        schema.components = components;
        normalize(&schema)
    }

    #[test]
    fn test_empty_schema_is_invalid() {
        let report = validate(&Schema::new());
        assert!(!report.valid);
        assert!(report.has_code(DiagnosticCode::NoComponents));
        assert!(report.has_code(DiagnosticCode::NoBreakpoints));
    }

    #[test]
    fn test_version_mismatch() {
        let mut schema = schema_with(vec![block("a", 0.0, 0.0, 6.0, 2.0)]);
        schema.schema_version = "0.9".to_string();
        let report = validate(&schema);
        assert!(!report.valid);
        assert!(report.has_code(DiagnosticCode::InvalidVersion));
    }

    #[test]
    fn test_duplicate_component_id() {
        let schema = schema_with(vec![
            block("a", 0.0, 0.0, 6.0, 2.0),
            block("a", 0.0, 2.0, 6.0, 2.0),
        ]);
        let report = validate(&schema);
        assert!(!report.valid);
        assert!(report.has_code(DiagnosticCode::DuplicateComponentId));
    }

    #[test]
    fn test_component_name_rule() {
        assert!(is_valid_component_name("HeroSection"));
        assert!(is_valid_component_name("Nav2"));
        assert!(!is_valid_component_name("heroSection"));
        assert!(!is_valid_component_name("Hero-Section"));
        assert!(!is_valid_component_name(""));

        let mut bad = block("a", 0.0, 0.0, 6.0, 2.0);
        bad.name = "hero".to_string();
        let report = validate(&schema_with(vec![bad]));
        assert!(report.has_code(DiagnosticCode::InvalidComponentName));
    }

    #[test]
    fn test_negative_min_width() {
        let mut schema = schema_with(vec![block("a", 0.0, 0.0, 6.0, 2.0)]);
        schema.breakpoints.push(Breakpoint::new("broken", -1, 4, 8));
        let report = validate(&schema);
        assert!(report.has_code(DiagnosticCode::InvalidMinWidth));
    }

    #[test]
    fn test_missing_layout_for_declared_breakpoint() {
        let mut schema = schema_with(vec![block("a", 0.0, 0.0, 6.0, 2.0)]);
        schema.breakpoints.push(Breakpoint::new("tablet", 768, 8, 8));
        // Deliberately skip re-normalizing so tablet has no config.
        let report = validate(&schema);
        assert!(!report.valid);
        assert!(report.has_code(DiagnosticCode::MissingLayout));
    }

    #[test]
    fn test_invalid_component_reference() {
        let mut schema = schema_with(vec![block("a", 0.0, 0.0, 6.0, 2.0)]);
        schema
            .layouts
            .get_mut("desktop")
            .expect("layout")
            .components
            .push("ghost".to_string());
        let report = validate(&schema);
        assert!(!report.valid);
        assert!(report.has_code(DiagnosticCode::InvalidComponentReference));
    }

    #[test]
    fn test_role_must_be_in_layout() {
        let mut schema = schema_with(vec![
            block("a", 0.0, 0.0, 6.0, 2.0),
            Component::new("floating", "Floating", SemanticRole::Aside),
        ]);
        schema
            .layouts
            .get_mut("desktop")
            .expect("layout")
            .roles
            .insert(SemanticRole::Aside, "floating".to_string());
        let report = validate(&schema);
        assert!(!report.valid);
        assert!(report.has_code(DiagnosticCode::RoleComponentNotInLayout));
    }

    #[test]
    fn test_empty_layout_is_error() {
        let mut schema = Schema::new();
        schema.breakpoints = vec![Breakpoint::new("desktop", 1280, 12, 8)];
        schema.components = vec![Component::new("a", "Block", SemanticRole::Div)];
        schema
            .layouts
            .insert("desktop".to_string(), LayoutConfig::vertical());
        let report = validate(&schema);
        assert!(!report.valid);
        assert!(report.has_code(DiagnosticCode::EmptyLayout));
    }

    #[test]
    fn test_negative_coordinate_is_error() {
        let report = validate(&schema_with(vec![block("a", -1.0, 0.0, 6.0, 2.0)]));
        assert!(!report.valid);
        assert!(report.has_code(DiagnosticCode::CanvasNegativeCoordinate));
    }

    #[test]
    fn test_zero_size_warns_but_stays_valid() {
        let report = validate(&schema_with(vec![
            block("a", 0.0, 0.0, 6.0, 2.0),
            block("b", 0.0, 2.0, 0.0, 2.0),
        ]));
        assert!(report.valid);
        assert!(report.has_code(DiagnosticCode::CanvasZeroSize));
    }

    #[test]
    fn test_fractional_coordinate_warns() {
        let report = validate(&schema_with(vec![block("a", 0.5, 0.0, 6.0, 2.0)]));
        assert!(report.valid);
        assert!(report.has_code(DiagnosticCode::CanvasFractionalCoordinate));
    }

    #[test]
    fn test_out_of_bounds_warns() {
        // 8 + 8 = 16 > 12 columns.
        let report = validate(&schema_with(vec![block("a", 8.0, 0.0, 8.0, 2.0)]));
        assert!(report.valid);
        assert!(report.has_code(DiagnosticCode::CanvasOutOfBounds));
    }

    #[test]
    fn test_overlap_is_strict_intersection() {
        let overlapping = validate(&schema_with(vec![
            block("a", 0.0, 0.0, 6.0, 2.0),
            block("b", 4.0, 0.0, 6.0, 2.0),
        ]));
        assert!(overlapping.has_code(DiagnosticCode::CanvasComponentsOverlap));

        let touching = validate(&schema_with(vec![
            block("a", 0.0, 0.0, 6.0, 2.0),
            block("b", 6.0, 0.0, 6.0, 2.0),
        ]));
        assert!(!touching.has_code(DiagnosticCode::CanvasComponentsOverlap));
        // Sharing a row is still complex even without overlap.
        assert!(touching.has_code(DiagnosticCode::ComplexGridLayoutDetected));
    }

    #[test]
    fn test_overlap_reported_once_per_pair() {
        // Two components overlapping across three shared rows.
        let report = validate(&schema_with(vec![
            block("a", 0.0, 0.0, 6.0, 3.0),
            block("b", 4.0, 0.0, 6.0, 3.0),
        ]));
        let count = report
            .warnings
            .iter()
            .filter(|d| d.code == DiagnosticCode::CanvasComponentsOverlap)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_order_mismatch_detected() {
        let mut schema = schema_with(vec![
            block("top", 0.0, 0.0, 6.0, 1.0),
            block("bottom", 0.0, 2.0, 6.0, 1.0),
        ]);
        let config = schema.layouts.get_mut("desktop").expect("layout");
        config.components = vec!["bottom".to_string(), "top".to_string()];
        let report = validate(&schema);
        assert!(report.valid);
        assert!(report.has_code(DiagnosticCode::CanvasLayoutOrderMismatch));
    }

    #[test]
    fn test_placed_but_unlisted_component_warns() {
        let mut schema = schema_with(vec![block("a", 0.0, 0.0, 6.0, 2.0)]);
        schema
            .layouts
            .get_mut("desktop")
            .expect("layout")
            .components
            .clear();
        let report = validate(&schema);
        assert!(report.has_code(DiagnosticCode::CanvasComponentNotInLayout));
    }

    #[test]
    fn test_clean_schema_has_no_findings() {
        let report = validate(&schema_with(vec![
            block("header", 0.0, 0.0, 12.0, 1.0),
            block("content", 0.0, 1.0, 12.0, 5.0),
            block("footer", 0.0, 6.0, 12.0, 1.0),
        ]));
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }
}
