//! Geometric utilities over the schema model: per-breakpoint placement
//! lookup, row grouping, and interval overlap.
//!
//! Everything here is a pure read of the model; the normalizer, validator,
//! and grid converter are all built on these lookups.

use std::collections::BTreeMap;

use crate::model::{CanvasLayout, Component};

/// Resolve the effective placement of a component on one breakpoint.
///
/// A per-breakpoint override wins; otherwise the component's default
/// `canvasLayout` applies. Breakpoints never inherit from each other's
/// overrides.
#[must_use]
pub fn placement_for<'a>(component: &'a Component, breakpoint: &str) -> Option<&'a CanvasLayout> {
    component
        .responsive_canvas_layout
        .get(breakpoint)
        .or(component.canvas_layout.as_ref())
}

/// Whether a component has an effective placement on the breakpoint.
#[must_use]
pub fn is_placed(component: &Component, breakpoint: &str) -> bool {
    placement_for(component, breakpoint).is_some()
}

/// All components with an effective placement on the breakpoint, paired
/// with that placement, in declaration order.
#[must_use]
pub fn placed_components<'a>(
    components: &'a [Component],
    breakpoint: &str,
) -> Vec<(&'a Component, &'a CanvasLayout)> {
    components
        .iter()
        .filter_map(|c| placement_for(c, breakpoint).map(|layout| (c, layout)))
        .collect()
}

/// Rows spanned by a placement, as whole row indices.
///
/// A placement of height 3 starting at row 2 spans rows 2, 3, and 4.
/// Fractional edges are widened to the rows they touch; zero-height
/// placements span no row.
#[must_use]
pub fn rows_spanned(layout: &CanvasLayout) -> Vec<i64> {
    if layout.height <= 0.0 {
        return Vec::new();
    }
    let start = layout.y.floor() as i64;
    let end = layout.bottom().ceil() as i64;
    (start..end).collect()
}

/// Group placed components by every row they span.
///
/// Returns row index → indices into `placed`, rows in ascending order.
#[must_use]
pub fn row_buckets(placed: &[(&Component, &CanvasLayout)]) -> BTreeMap<i64, Vec<usize>> {
    let mut buckets: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (index, (_, layout)) in placed.iter().enumerate() {
        for row in rows_spanned(layout) {
            buckets.entry(row).or_default().push(index);
        }
    }
    buckets
}

/// Strict x-interval intersection: touching edges do not overlap.
#[must_use]
pub fn x_ranges_intersect(a: &CanvasLayout, b: &CanvasLayout) -> bool {
    a.x < b.right() && b.x < a.right()
}

/// Ids of placed components in visual order: ascending `y`, then `x`.
///
/// The sort is stable, so components sharing a cell keep their declaration
/// order.
#[must_use]
pub fn visual_order(components: &[Component], breakpoint: &str) -> Vec<String> {
    let mut placed = placed_components(components, breakpoint);
    placed.sort_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    placed.into_iter().map(|(c, _)| c.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SemanticRole;

    fn component(id: &str, layout: Option<CanvasLayout>) -> Component {
        let mut component = Component::new(id, "Block", SemanticRole::Div);
        component.canvas_layout = layout;
        component
    }

    #[test]
    fn test_override_wins_over_default() {
        let component = component("a", Some(CanvasLayout::new(0.0, 0.0, 4.0, 1.0)))
            .with_responsive_layout("desktop", CanvasLayout::new(2.0, 2.0, 6.0, 1.0));
        let placement = placement_for(&component, "desktop").expect("placed");
        assert_eq!(placement.x, 2.0);
        // Other breakpoints fall back to the default.
        let fallback = placement_for(&component, "mobile").expect("placed");
        assert_eq!(fallback.x, 0.0);
    }

    #[test]
    fn test_rows_spanned_widens_fractional_edges() {
        assert_eq!(rows_spanned(&CanvasLayout::new(0.0, 2.0, 4.0, 3.0)), vec![2, 3, 4]);
        assert_eq!(rows_spanned(&CanvasLayout::new(0.0, 1.5, 4.0, 1.0)), vec![1, 2]);
        assert!(rows_spanned(&CanvasLayout::new(0.0, 2.0, 4.0, 0.0)).is_empty());
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = CanvasLayout::new(0.0, 0.0, 6.0, 2.0);
        let b = CanvasLayout::new(6.0, 0.0, 6.0, 2.0);
        let c = CanvasLayout::new(4.0, 0.0, 6.0, 2.0);
        assert!(!x_ranges_intersect(&a, &b));
        assert!(x_ranges_intersect(&a, &c));
    }

    #[test]
    fn test_visual_order_sorts_by_y_then_x() {
        let components = vec![
            component("low", Some(CanvasLayout::new(0.0, 4.0, 4.0, 1.0))),
            component("right", Some(CanvasLayout::new(6.0, 0.0, 4.0, 1.0))),
            component("left", Some(CanvasLayout::new(0.0, 0.0, 4.0, 1.0))),
            component("unplaced", None),
        ];
        assert_eq!(visual_order(&components, "mobile"), vec!["left", "right", "low"]);
    }
}
