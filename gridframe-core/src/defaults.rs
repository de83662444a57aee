//! Default configuration tables: standard breakpoint tiers and per-role
//! component templates.
//!
//! These are immutable lookup tables, not mutable singletons; callers get
//! fresh values on every call.

use uuid::Uuid;

use crate::model::{
    Breakpoint, Component, FlexDirection, LayoutStyle, PositionOffsets, Positioning, SemanticRole,
};

/// Minimum viewport width of the tablet tier in pixels.
pub const TABLET_MIN_WIDTH: i64 = 768;

/// Minimum viewport width of the desktop tier in pixels.
pub const DESKTOP_MIN_WIDTH: i64 = 1280;

/// The standard three-tier breakpoint set: a 4-column mobile grid, an
/// 8-column tablet grid, and a 12-column desktop grid, 12 rows each.
#[must_use]
pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("mobile", 0, 4, 12),
        Breakpoint::new("tablet", TABLET_MIN_WIDTH, 8, 12),
        Breakpoint::new("desktop", DESKTOP_MIN_WIDTH, 12, 12),
    ]
}

/// A starting configuration for a component of a given role.
#[derive(Debug, Clone)]
pub struct ComponentTemplate {
    /// PascalCase name the new component starts with.
    pub name: &'static str,
    /// Role the template is for.
    pub role: SemanticRole,
    /// Internal layout the role typically carries.
    pub layout: LayoutStyle,
    /// Positioning the role typically carries.
    pub positioning: Positioning,
}

impl ComponentTemplate {
    /// Mint a new component from this template with a fresh unique id.
    #[must_use]
    pub fn instantiate(&self) -> Component {
        let id = format!("{}-{}", self.role, Uuid::new_v4());
        Component::new(id, self.name, self.role)
            .with_layout(self.layout.clone())
            .with_positioning(self.positioning.clone())
    }
}

/// The default template for a semantic role.
#[must_use]
pub fn template_for(role: SemanticRole) -> ComponentTemplate {
    let (name, layout, positioning) = match role {
        SemanticRole::Header => (
            "PageHeader",
            LayoutStyle::Flex {
                direction: FlexDirection::Row,
                gap: Some(16.0),
                wrap: false,
                justify: Some("space-between".to_string()),
                align: Some("center".to_string()),
            },
            Positioning::Static,
        ),
        SemanticRole::Nav => (
            "MainNav",
            LayoutStyle::Flex {
                direction: FlexDirection::Row,
                gap: Some(8.0),
                wrap: false,
                justify: None,
                align: Some("center".to_string()),
            },
            Positioning::Sticky {
                offsets: PositionOffsets {
                    top: Some(0.0),
                    z_index: Some(10),
                    ..PositionOffsets::default()
                },
            },
        ),
        SemanticRole::Main => (
            "MainContent",
            LayoutStyle::Container {
                max_width: Some(1200.0),
                padding: Some(24.0),
            },
            Positioning::Static,
        ),
        SemanticRole::Aside => ("Sidebar", LayoutStyle::None, Positioning::Static),
        SemanticRole::Footer => (
            "PageFooter",
            LayoutStyle::Flex {
                direction: FlexDirection::Column,
                gap: Some(8.0),
                wrap: false,
                justify: None,
                align: None,
            },
            Positioning::Static,
        ),
        SemanticRole::Section => (
            "ContentSection",
            LayoutStyle::Container {
                max_width: None,
                padding: Some(16.0),
            },
            Positioning::Static,
        ),
        SemanticRole::Article => ("ArticleBlock", LayoutStyle::None, Positioning::Static),
        SemanticRole::Div => ("Block", LayoutStyle::None, Positioning::Static),
        SemanticRole::Form => (
            "FormBlock",
            LayoutStyle::Flex {
                direction: FlexDirection::Column,
                gap: Some(12.0),
                wrap: false,
                justify: None,
                align: None,
            },
            Positioning::Static,
        ),
    };
    ComponentTemplate {
        name,
        role,
        layout,
        positioning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::is_valid_component_name;

    #[test]
    fn test_default_breakpoints_are_canonically_ordered() {
        let tiers = default_breakpoints();
        assert_eq!(tiers.len(), 3);
        assert!(tiers.windows(2).all(|w| w[0].min_width < w[1].min_width));
    }

    #[test]
    fn test_template_names_pass_validation() {
        for role in [
            SemanticRole::Header,
            SemanticRole::Nav,
            SemanticRole::Main,
            SemanticRole::Aside,
            SemanticRole::Footer,
            SemanticRole::Section,
            SemanticRole::Article,
            SemanticRole::Div,
            SemanticRole::Form,
        ] {
            let template = template_for(role);
            assert!(is_valid_component_name(template.name), "{role}");
        }
    }

    #[test]
    fn test_instantiate_mints_unique_ids() {
        let template = template_for(SemanticRole::Header);
        let a = template.instantiate();
        let b = template.instantiate();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("header-"));
    }
}
