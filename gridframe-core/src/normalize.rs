//! Schema normalization: canonical breakpoint order, layout backfill, and
//! document-order synchronization.
//!
//! `normalize` is pure, total, and idempotent. It keeps what the user sees
//! (2-D canvas placement) and what gets serialized (the linear `components`
//! order) mechanically consistent, so the editor never has to maintain
//! both by hand.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::geometry::{is_placed, placement_for};
use crate::model::{Component, LayoutConfig, Schema};

/// Produce the canonical form of a schema.
///
/// Steps, per the canonical policy of strictly independent breakpoints:
///
/// 1. Breakpoints are sorted by `(minWidth, name)`.
/// 2. A breakpoint with no `LayoutConfig` at all gets an empty vertical
///    one. A present-but-empty `components` list is user-authored state
///    and is preserved.
/// 3. Every component with an effective placement on a breakpoint is
///    registered in that breakpoint's `components` list; placing a block
///    on the canvas is sufficient to give it a document position.
/// 4. Each `components` list is re-sorted into visual order (ascending
///    `y`, then `x`) among placed ids; unplaced ids keep their relative
///    order and sort after all placed ids.
#[must_use]
pub fn normalize(schema: &Schema) -> Schema {
    let mut breakpoints = schema.breakpoints.clone();
    breakpoints.sort_by(|a, b| {
        a.min_width
            .cmp(&b.min_width)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut layouts = schema.layouts.clone();
    for breakpoint in &breakpoints {
        let config = layouts
            .entry(breakpoint.name.clone())
            .or_insert_with(LayoutConfig::vertical);
        register_placed(&schema.components, &breakpoint.name, config);
        sort_document_order(&schema.components, &breakpoint.name, config);
    }

    tracing::debug!(
        breakpoints = breakpoints.len(),
        components = schema.components.len(),
        "normalized schema"
    );

    Schema {
        schema_version: schema.schema_version.clone(),
        components: schema.components.clone(),
        breakpoints,
        layouts,
    }
}

/// Step 3: union placed component ids into the declared list.
fn register_placed(components: &[Component], breakpoint: &str, config: &mut LayoutConfig) {
    for component in components {
        if is_placed(component, breakpoint) && !config.components.contains(&component.id) {
            config.components.push(component.id.clone());
        }
    }
}

/// Step 4: placed ids in visual `(y, x)` order, unplaced ids after them in
/// their original relative order.
fn sort_document_order(components: &[Component], breakpoint: &str, config: &mut LayoutConfig) {
    let placements: HashMap<&str, (f64, f64)> = components
        .iter()
        .filter_map(|c| placement_for(c, breakpoint).map(|layout| (c.id.as_str(), (layout.y, layout.x))))
        .collect();

    // Stable sort: unplaced ids compare equal to each other.
    config.components.sort_by(|a, b| {
        match (placements.get(a.as_str()), placements.get(b.as_str())) {
            (Some((ay, ax)), Some((by, bx))) => ay.total_cmp(by).then(ax.total_cmp(bx)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Breakpoint, CanvasLayout, SemanticRole};

    fn placed(id: &str, x: f64, y: f64) -> Component {
        Component::new(id, "Block", SemanticRole::Div)
            .with_canvas_layout(CanvasLayout::new(x, y, 4.0, 1.0))
    }

    fn two_tier_schema() -> Schema {
        let mut schema = Schema::new();
        schema.breakpoints = vec![
            Breakpoint::new("desktop", 1280, 12, 12),
            Breakpoint::new("mobile", 0, 4, 12),
        ];
        schema
    }

    #[test]
    fn test_breakpoints_sorted_by_min_width_then_name() {
        let mut schema = two_tier_schema();
        schema
            .breakpoints
            .push(Breakpoint::new("kiosk", 1280, 16, 12));
        let normalized = normalize(&schema);
        let names: Vec<&str> = normalized.breakpoints.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["mobile", "desktop", "kiosk"]);
    }

    #[test]
    fn test_missing_layout_backfilled_empty_vertical() {
        let schema = two_tier_schema();
        let normalized = normalize(&schema);
        let config = normalized.layouts.get("mobile").expect("backfilled");
        assert!(config.components.is_empty());
    }

    #[test]
    fn test_placed_component_registered_in_document_order() {
        let mut schema = two_tier_schema();
        schema.components.push(placed("hero", 0.0, 0.0));
        let normalized = normalize(&schema);
        assert_eq!(
            normalized.layouts.get("desktop").expect("layout").components,
            vec!["hero"]
        );
    }

    #[test]
    fn test_explicitly_empty_list_stays_empty_without_placements() {
        let mut schema = two_tier_schema();
        let mut unplaced = Component::new("aside", "SideNote", SemanticRole::Aside);
        // Placement only on desktop; mobile's authored empty list must survive.
        unplaced
            .responsive_canvas_layout
            .insert("desktop".to_string(), CanvasLayout::new(0.0, 0.0, 4.0, 1.0));
        schema.components.push(unplaced);
        schema.layouts.insert("mobile".to_string(), LayoutConfig::vertical());
        let normalized = normalize(&schema);
        assert!(normalized.layouts.get("mobile").expect("layout").components.is_empty());
        assert_eq!(
            normalized.layouts.get("desktop").expect("layout").components,
            vec!["aside"]
        );
    }

    #[test]
    fn test_document_order_follows_visual_order() {
        let mut schema = two_tier_schema();
        schema.components.push(placed("footer", 0.0, 6.0));
        schema.components.push(placed("sidebar", 8.0, 1.0));
        schema.components.push(placed("header", 0.0, 0.0));
        schema.components.push(placed("content", 0.0, 1.0));
        schema.components.push(Component::new("ghost", "Ghost", SemanticRole::Div));
        let mut config = LayoutConfig::vertical();
        config.components = vec!["ghost".to_string(), "footer".to_string()];
        schema.layouts.insert("desktop".to_string(), config);

        let normalized = normalize(&schema);
        assert_eq!(
            normalized.layouts.get("desktop").expect("layout").components,
            vec!["header", "content", "sidebar", "footer", "ghost"]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut schema = two_tier_schema();
        schema.components.push(placed("b", 4.0, 0.0));
        schema.components.push(placed("a", 0.0, 0.0));
        let once = normalize(&schema);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }
}
