//! Button component
//!
//! A polymorphic button: renders a native `<button>` by default and can be
//! swapped for a link or any other component with the `component` prop while
//! keeping its styling. Colors come from the theme's variant color resolver.
//!
//! # Example
//!
//! ```rust
//! use tessera_cn::button;
//! use tessera_styles::{ComponentProps, ThemeProvider};
//!
//! let provider = ThemeProvider::default();
//!
//! let el = provider
//!     .render(button(), ComponentProps::new().prop("variant", "light").child("Save"))
//!     .unwrap();
//! assert_eq!(el.tag, "button");
//! assert_eq!(el.attribute("data-variant"), Some("light"));
//! assert_eq!(el.text_content(), "Save");
//!
//! // As a link
//! let link = provider
//!     .render(
//!         button(),
//!         ComponentProps::new().component("a").prop("href", "/docs").child("Docs"),
//!     )
//!     .unwrap();
//! assert_eq!(link.tag, "a");
//! assert_eq!(link.attribute("href"), Some("/docs"));
//! ```
//!
//! # Props
//!
//! | Prop | Default | |
//! |---|---|---|
//! | `variant` | `"filled"` | any variant the theme's resolver knows |
//! | `size` | `"sm"` | scale key, `compact-{key}`, or a length |
//! | `color` | primary color | palette key, `"blue.7"`, or a CSS color |
//! | `radius` | theme default | scale key or length |
//! | `full_width` | `false` | |
//! | `loading` | `false` | |
//! | `disabled` | `false` | |
//! | `left_section`, `right_section` | | text shown beside the label |

use std::sync::OnceLock;

use tessera_core::{props, PropValue};
use tessera_styles::{
    get_font_size, get_radius, get_size, polymorphic_factory, Child, Component, ComponentCx,
    ComponentDescriptor, CssVars, Element, Mod, ResolvedProps, Result, VarsResolver, ROOT,
};
use tessera_theme::{SizeToken, Theme, VariantColorsInput};

/// Registry key of [`button`]
pub const BUTTON: &str = "Button";

const SELECTORS: &[&str] = &["root", "inner", "label", "section", "loader"];

/// `compact-{key}` sizes use their own variable family
fn size_var(size: Option<&PropValue>, prefix: &str) -> Option<String> {
    match size.and_then(PropValue::as_str).and_then(|s| s.strip_prefix("compact-")) {
        Some(key) if SizeToken::parse(key).is_some() => Some(format!("var(--{prefix}-compact-{key})")),
        _ => get_size(size, prefix),
    }
}

fn font_size(size: Option<&PropValue>) -> Option<String> {
    let key = size.and_then(PropValue::as_str)?;
    let key = key.strip_prefix("compact-").unwrap_or(key);
    SizeToken::parse(key)?;
    get_font_size(Some(&PropValue::from(key)))
}

/// CSS variables of a button instance
pub fn button_vars(theme: &Theme, props: &ResolvedProps) -> CssVars {
    let colors = theme.variant_colors(
        &VariantColorsInput::new(props.variant().unwrap_or("filled"))
            .color(props.color())
            .auto_contrast(props.bool("auto_contrast")),
    );
    let size = props.size();

    CssVars::new()
        .with(ROOT, "--button-height", size_var(size, "button-height"))
        .with(ROOT, "--button-padding-x", size_var(size, "button-padding-x"))
        .with(ROOT, "--button-fz", font_size(size))
        .with(ROOT, "--button-radius", get_radius(props.get("radius")))
        .with(ROOT, "--button-bg", colors.background)
        .with(ROOT, "--button-hover", colors.hover)
        .with(ROOT, "--button-color", colors.color)
        .with(ROOT, "--button-bd", colors.border)
        .with(ROOT, "--button-hover-color", colors.hover_color)
}

fn section(cx: &ComponentCx<'_>, position: &str, content: &str) -> Element {
    cx.element("span", "section")
        .attr("data-position", position)
        .text(content)
}

fn render(cx: &ComponentCx<'_>) -> Result<Element> {
    let props = cx.props();
    let loading = props.flag("loading");
    let disabled = props.flag("disabled");
    let left = props.str("left_section");
    let right = props.str("right_section");

    let mut label = cx.element("span", "label");
    label.children = cx.render_cx().render_children(cx.children().to_vec())?;

    let mut inner = cx.element("span", "inner");
    if let Some(left) = left {
        inner = inner.child(section(cx, "left", left));
    }
    inner = inner.child(label);
    if let Some(right) = right {
        inner = inner.child(section(cx, "right", right));
    }

    let mut children: Vec<Child> = Vec::with_capacity(2);
    if loading {
        children.push(cx.element("span", "loader").attr("aria-hidden", "true").into());
    }
    children.push(inner.into());

    let cx = cx.with_mods([
        Mod::toggle("disabled", disabled),
        Mod::toggle("loading", loading),
        Mod::toggle("block", props.flag("full_width")),
        Mod::toggle("with-left-section", left.is_some()),
        Mod::toggle("with-right-section", right.is_some()),
    ]);
    let mut el = cx.render_root(children)?;
    if (disabled || loading) && el.tag == "button" {
        el.attributes.insert("disabled".to_string(), String::new());
    }
    Ok(el)
}

static BUTTON_COMPONENT: OnceLock<Component> = OnceLock::new();

/// The Button component
pub fn button() -> &'static Component {
    BUTTON_COMPONENT.get_or_init(|| {
        polymorphic_factory(
            ComponentDescriptor::new(BUTTON)
                .tag("button")
                .default_props(props! {
                    "variant" => "filled",
                    "size" => "sm",
                    "loading" => false,
                    "disabled" => false,
                    "full_width" => false,
                })
                .consumes(&["color", "radius", "auto_contrast", "left_section", "right_section"])
                .selectors(SELECTORS)
                .vars(VarsResolver::new(button_vars)),
            render,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tessera_core::PropMap;

    fn vars(props: PropMap) -> CssVars {
        button_vars(&Theme::default(), &ResolvedProps::new(props))
    }

    #[test]
    fn test_size_vars() {
        let v = vars(props! { "size" => "md" });
        assert_eq!(v.get("root", "--button-height"), Some("var(--button-height-md)"));
        assert_eq!(v.get("root", "--button-fz"), Some("var(--tessera-font-size-md)"));

        let v = vars(props! { "size" => "compact-xs" });
        assert_eq!(v.get("root", "--button-height"), Some("var(--button-height-compact-xs)"));
        assert_eq!(v.get("root", "--button-fz"), Some("var(--tessera-font-size-xs)"));

        let v = vars(props! { "size" => 40 });
        assert_eq!(v.get("root", "--button-height"), Some("calc(2.5rem * var(--tessera-scale))"));
        assert_eq!(v.get("root", "--button-fz"), None);
    }

    #[test]
    fn test_filled_colors() {
        let v = vars(props! { "variant" => "filled" });
        assert_eq!(v.get("root", "--button-bg"), Some("#228be6"));
        assert_eq!(v.get("root", "--button-hover"), Some("#1c7ed6"));
        assert_eq!(v.get("root", "--button-color"), Some("#ffffff"));
    }

    #[test]
    fn test_unknown_variant_drops_color_vars() {
        let v = vars(props! { "variant" => "gradient" });
        assert_eq!(v.get("root", "--button-bg"), None);
        assert!(!v.for_selector("root").contains("--button-bg"));
    }

    #[test]
    fn test_radius_unset_by_default() {
        assert_eq!(vars(PropMap::new()).get("root", "--button-radius"), None);
        assert_eq!(
            vars(props! { "radius" => "xl" }).get("root", "--button-radius"),
            Some("var(--tessera-radius-xl)")
        );
    }
}
