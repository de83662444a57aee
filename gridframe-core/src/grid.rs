//! Canvas-to-CSS-grid conversion and layout complexity classification.
//!
//! Canvas placements are 0-based cells; CSS grid lines are 1-based and
//! end-exclusive. The conversion is a pure arithmetic shift, so it is
//! order-preserving and reversible given the same grid dimensions.

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};
use crate::geometry::{placed_components, row_buckets, x_ranges_intersect};
use crate::model::{CanvasLayout, Component, Schema};

/// A component's rectangle expressed as CSS grid lines.
///
/// Lines stay `f64` like the canvas coordinates they shift; they are only
/// fractional when the source placement was fractional (which the
/// validator flags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPosition {
    /// Component this position belongs to.
    pub component_id: String,
    /// First occupied row line (1-based).
    pub row_start: f64,
    /// First occupied column line (1-based).
    pub col_start: f64,
    /// Row line one past the last occupied row (end-exclusive).
    pub row_end: f64,
    /// Column line one past the last occupied column (end-exclusive).
    pub col_end: f64,
}

impl GridPosition {
    /// Invert the conversion back to a 0-based canvas placement.
    #[must_use]
    pub fn to_canvas_layout(&self) -> CanvasLayout {
        CanvasLayout::new(
            self.col_start - 1.0,
            self.row_start - 1.0,
            self.col_end - self.col_start,
            self.row_end - self.row_start,
        )
    }
}

/// Result of converting one breakpoint's placements to grid positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConversion {
    /// Column count of the breakpoint grid, for the consumer's template.
    pub cols: u32,
    /// Row count of the breakpoint grid.
    pub rows: u32,
    /// One position per placed component, in declaration order.
    pub positions: Vec<GridPosition>,
}

/// Which container the instruction layer should emit for a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Side-by-side or overlapping placements need a 2-D grid.
    Grid,
    /// A single column per row; flexbox suffices.
    Flexbox,
}

/// Advisory complexity classification for one breakpoint's placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    /// Largest number of components sharing any single row.
    pub max_per_row: usize,
    /// Whether any row holds more than one component.
    pub has_side_by_side: bool,
    /// Whether any same-row pair strictly intersects on the x axis.
    pub has_overlap: bool,
    /// Container recommendation for the instruction layer.
    pub recommendation: Recommendation,
}

/// Convert every placed component to 1-based, end-exclusive grid lines:
/// `(rowStart, colStart, rowEnd, colEnd) = (y+1, x+1, y+height+1, x+width+1)`.
#[must_use]
pub fn to_grid_positions(
    components: &[Component],
    breakpoint: &str,
    cols: u32,
    rows: u32,
) -> GridConversion {
    let positions = placed_components(components, breakpoint)
        .into_iter()
        .map(|(component, layout)| GridPosition {
            component_id: component.id.clone(),
            row_start: layout.y + 1.0,
            col_start: layout.x + 1.0,
            row_end: layout.bottom() + 1.0,
            col_end: layout.right() + 1.0,
        })
        .collect();
    GridConversion {
        cols,
        rows,
        positions,
    }
}

/// Classify how complex one breakpoint's placements are.
///
/// Components are bucketed by every row they span, so a component of
/// height 3 counts toward 3 rows.
#[must_use]
pub fn analyze_complexity(components: &[Component], breakpoint: &str) -> ComplexityReport {
    let placed = placed_components(components, breakpoint);
    let buckets = row_buckets(&placed);

    let max_per_row = buckets.values().map(Vec::len).max().unwrap_or(0);
    let has_side_by_side = max_per_row > 1;
    let has_overlap = buckets.values().any(|members| {
        members.iter().enumerate().any(|(i, &a)| {
            members[i + 1..]
                .iter()
                .any(|&b| x_ranges_intersect(placed[a].1, placed[b].1))
        })
    });

    let recommendation = if has_side_by_side || has_overlap {
        Recommendation::Grid
    } else {
        Recommendation::Flexbox
    };

    ComplexityReport {
        max_per_row,
        has_side_by_side,
        has_overlap,
        recommendation,
    }
}

impl Schema {
    /// Grid positions for a breakpoint resolved by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::BreakpointNotFound`] for an undeclared name.
    pub fn grid_positions_for(&self, breakpoint: &str) -> SchemaResult<GridConversion> {
        let tier = self
            .breakpoint(breakpoint)
            .ok_or_else(|| SchemaError::BreakpointNotFound(breakpoint.to_string()))?;
        Ok(to_grid_positions(
            &self.components,
            breakpoint,
            tier.grid_cols,
            tier.grid_rows,
        ))
    }

    /// Complexity classification for a breakpoint resolved by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::BreakpointNotFound`] for an undeclared name.
    pub fn complexity_for(&self, breakpoint: &str) -> SchemaResult<ComplexityReport> {
        if self.breakpoint(breakpoint).is_none() {
            return Err(SchemaError::BreakpointNotFound(breakpoint.to_string()));
        }
        Ok(analyze_complexity(&self.components, breakpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SemanticRole;

    fn block(id: &str, x: f64, y: f64, width: f64, height: f64) -> Component {
        Component::new(id, "Block", SemanticRole::Div)
            .with_canvas_layout(CanvasLayout::new(x, y, width, height))
    }

    #[test]
    fn test_full_width_banner_conversion() {
        // Canvas (0,0,12,1) on a 12x8 grid becomes rows 1-2, cols 1-13.
        let conversion = to_grid_positions(&[block("banner", 0.0, 0.0, 12.0, 1.0)], "desktop", 12, 8);
        let position = &conversion.positions[0];
        assert_eq!(position.row_start, 1.0);
        assert_eq!(position.row_end, 2.0);
        assert_eq!(position.col_start, 1.0);
        assert_eq!(position.col_end, 13.0);
    }

    #[test]
    fn test_conversion_is_reversible() {
        let layout = CanvasLayout::new(3.0, 2.0, 4.0, 5.0);
        let conversion =
            to_grid_positions(&[block("a", layout.x, layout.y, layout.width, layout.height)], "desktop", 12, 8);
        assert_eq!(conversion.positions[0].to_canvas_layout(), layout);
    }

    #[test]
    fn test_stacked_column_recommends_flexbox() {
        let report = analyze_complexity(
            &[
                block("a", 0.0, 0.0, 12.0, 1.0),
                block("b", 0.0, 1.0, 12.0, 1.0),
            ],
            "desktop",
        );
        assert_eq!(report.max_per_row, 1);
        assert!(!report.has_side_by_side);
        assert!(!report.has_overlap);
        assert_eq!(report.recommendation, Recommendation::Flexbox);
    }

    #[test]
    fn test_side_by_side_recommends_grid() {
        let report = analyze_complexity(
            &[
                block("main", 0.0, 0.0, 8.0, 4.0),
                block("aside", 8.0, 0.0, 4.0, 4.0),
            ],
            "desktop",
        );
        assert_eq!(report.max_per_row, 2);
        assert!(report.has_side_by_side);
        assert!(!report.has_overlap);
        assert_eq!(report.recommendation, Recommendation::Grid);
    }

    #[test]
    fn test_tall_component_counts_in_every_row() {
        let report = analyze_complexity(
            &[
                block("rail", 0.0, 0.0, 2.0, 3.0),
                block("row2", 4.0, 1.0, 4.0, 1.0),
            ],
            "desktop",
        );
        // The rail shares row 1 with row2.
        assert!(report.has_side_by_side);
    }

    #[test]
    fn test_unknown_breakpoint_lookup_fails() {
        let schema = Schema::new();
        assert!(matches!(
            schema.grid_positions_for("ultrawide"),
            Err(SchemaError::BreakpointNotFound(_))
        ));
    }
}
