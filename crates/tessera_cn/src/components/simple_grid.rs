//! SimpleGrid component
//!
//! An equal-width column grid whose `cols`, `spacing` and `vertical_spacing`
//! may change per breakpoint. Responsive values are maps keyed by `base` and
//! breakpoint names (or raw widths):
//!
//! ```toml
//! cols = { base = 1, sm = 2, lg = 4 }
//! ```
//!
//! Breakpoint-dependent variables cannot be inline styles, so each instance
//! mints a scoped selector and injects a rule block into the provider's
//! stylesheet. The rule lives as long as the rendered element.
//!
//! With `type = "container"` the breakpoints compare against the width of a
//! wrapping container element instead of the viewport.
//!
//! # Example
//!
//! ```rust
//! use tessera_cn::simple_grid;
//! use tessera_core::PropValue;
//! use tessera_styles::{ComponentProps, ThemeProvider};
//!
//! let provider = ThemeProvider::default();
//! let cols = PropValue::Map([("base".to_string(), 1.into()), ("md".to_string(), 3.into())].into_iter().collect());
//!
//! let grid = provider
//!     .render(simple_grid(), ComponentProps::new().prop("cols", cols).child("a").child("b"))
//!     .unwrap();
//!
//! assert!(provider.stylesheet().to_css().contains("@media (min-width: 62em)"));
//! drop(grid);
//! assert!(provider.stylesheet().is_empty());
//! ```

use std::sync::OnceLock;

use tessera_core::props;
use tessera_styles::{
    factory, get_spacing, BreakpointQuery, Component, ComponentCx, ComponentDescriptor, Element,
    ResponsiveRules, Result, StyleOverrides,
};

/// Registry key of [`simple_grid`]
pub const SIMPLE_GRID: &str = "SimpleGrid";

/// Rules for the `--sg-*` variables of one instance
pub fn simple_grid_rules(cx: &ComponentCx<'_>) -> ResponsiveRules {
    let props = cx.props();
    let theme = cx.theme();

    let query = if is_container(cx) {
        BreakpointQuery::Container(None)
    } else {
        BreakpointQuery::Media
    };
    let mut rules = ResponsiveRules::new(query);

    if let Some(cols) = props.get("cols") {
        rules.add_prop(theme, "--sg-cols", cols, |v| v.to_attribute());
    }
    if let Some(spacing) = props.get("spacing") {
        rules.add_prop(theme, "--sg-spacing-x", spacing, |v| get_spacing(Some(v)));
    }
    if let Some(spacing_y) = props.get("vertical_spacing").or_else(|| props.get("spacing")) {
        rules.add_prop(theme, "--sg-spacing-y", spacing_y, |v| get_spacing(Some(v)));
    }
    rules
}

fn render(cx: &ComponentCx<'_>) -> Result<Element> {
    let rules = simple_grid_rules(cx);
    let scoped = cx.inject_scoped(&rules);
    let overrides = StyleOverrides::new().class_name(scoped.class_name());
    let mut root = cx.render_root_with(&overrides, cx.children().to_vec())?;

    if is_container(cx) {
        let mut container = cx.element("div", "container").child(root);
        container.style.set("container-type", "inline-size");
        container.retain_scoped(scoped);
        return Ok(container);
    }

    root.retain_scoped(scoped);
    Ok(root)
}

fn is_container(cx: &ComponentCx<'_>) -> bool {
    cx.props().str("type") == Some("container")
}

static SIMPLE_GRID_COMPONENT: OnceLock<Component> = OnceLock::new();

pub fn simple_grid() -> &'static Component {
    SIMPLE_GRID_COMPONENT.get_or_init(|| {
        factory(
            ComponentDescriptor::new(SIMPLE_GRID)
                .default_props(props! { "cols" => 1, "spacing" => "md", "type" => "media" })
                .consumes(&["vertical_spacing"])
                .selectors(&["root", "container"]),
            render,
        )
    })
}
