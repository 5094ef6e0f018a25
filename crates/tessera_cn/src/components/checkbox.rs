//! Checkbox and Checkbox.Group
//!
//! A checkbox works on its own or inside a [`checkbox_group`]. The group is an
//! optional context: a standalone checkbox reads its own `checked` prop, a
//! grouped one derives `checked` from the group's `value` list and takes the
//! group's `name` and `size`.
//!
//! # Example
//!
//! ```rust
//! use tessera_cn::{checkbox, checkbox_group};
//! use tessera_styles::{Child, ComponentProps, ThemeProvider};
//!
//! let provider = ThemeProvider::default();
//!
//! let group = provider
//!     .render(
//!         checkbox_group(),
//!         ComponentProps::new()
//!             .prop("name", "fruit")
//!             .prop("value", vec!["apple"])
//!             .child(Child::component(checkbox(), ComponentProps::new().prop("value", "apple")))
//!             .child(Child::component(checkbox(), ComponentProps::new().prop("value", "pear"))),
//!     )
//!     .unwrap();
//!
//! let inputs: Vec<_> = group
//!     .children
//!     .iter()
//!     .filter_map(|n| n.as_element())
//!     .map(|c| c.attribute("data-checked").is_some())
//!     .collect();
//! assert_eq!(inputs, vec![true, false]);
//! ```

use std::sync::OnceLock;

use tessera_core::{props, PropValue};
use tessera_styles::{
    factory, get_radius, get_size, Component, ComponentCx, ComponentDescriptor, CssVars, Element,
    Mod, OptionalContext, ResolvedProps, Result, StyleOverrides, VarsResolver, ROOT,
};
use tessera_theme::Theme;

/// Registry key of [`checkbox`]
pub const CHECKBOX: &str = "Checkbox";

/// Registry key of [`checkbox_group`]
pub const CHECKBOX_GROUP: &str = "CheckboxGroup";

/// State a group shares with its checkboxes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckboxGroupState {
    pub value: Vec<String>,
    pub name: Option<String>,
    pub size: Option<PropValue>,
}

impl CheckboxGroupState {
    pub fn is_checked(&self, value: &str) -> bool {
        self.value.iter().any(|v| v == value)
    }
}

/// Absent outside of a group
pub static CHECKBOX_GROUP_CONTEXT: OptionalContext<CheckboxGroupState> = OptionalContext::new();

/// CSS variables of a checkbox instance
pub fn checkbox_vars(theme: &Theme, props: &ResolvedProps) -> CssVars {
    let color = props.color().map(|c| theme.resolve_color(c));
    let icon_color = match props.str("icon_color") {
        Some(icon) => Some(theme.resolve_color(icon)),
        None if props.flag("auto_contrast") => color
            .as_deref()
            .map(|bg| theme.contrast_color(bg).to_css()),
        None => None,
    };

    CssVars::new()
        .with(ROOT, "--checkbox-size", get_size(props.size(), "checkbox-size"))
        .with(ROOT, "--checkbox-radius", get_radius(props.get("radius")))
        .with(ROOT, "--checkbox-color", color)
        .with(ROOT, "--checkbox-icon-color", icon_color)
}

fn render_checkbox(cx: &ComponentCx<'_>) -> Result<Element> {
    let props = cx.props();
    let group = CHECKBOX_GROUP_CONTEXT.use_context(cx.render_cx());
    let value = props.str("value");

    let checked = match (&group, value) {
        (Some(group), Some(value)) => group.is_checked(value),
        _ => props.flag("checked"),
    };
    let disabled = props.flag("disabled");

    let mut input = cx
        .element("input", "input")
        .attr("type", "checkbox");
    if let Some(name) = group.as_ref().and_then(|g| g.name.as_deref()) {
        input = input.attr("name", name);
    }
    if let Some(value) = value {
        input = input.attr("value", value);
    }
    if checked {
        input = input.attr("checked", "");
    }
    if disabled {
        input = input.attr("disabled", "");
    }

    let mut inner = cx.element("div", "inner").child(input);
    if checked {
        inner = inner.child(cx.element("span", "icon").attr("aria-hidden", "true"));
    }

    let mut body = cx.element("div", "body").child(inner);
    if let Some(label) = props.str("label") {
        body = body.child(cx.element("label", "label").text(label));
    }

    let cx = cx.with_mods([
        Mod::toggle("checked", checked),
        Mod::toggle("disabled", disabled),
    ]);

    // A group's size wins over the checkbox's own
    match group.as_ref().and_then(|g| g.size.as_ref()) {
        Some(size) => {
            let mut overrides = StyleOverrides::new();
            if let Some(css) = get_size(Some(size), "checkbox-size") {
                overrides.style.set("--checkbox-size", css);
            }
            let mut el = cx.render_root_with(&overrides, vec![body.into()])?;
            if let Some(size) = size.as_str() {
                el.attributes.insert("data-size".into(), size.to_string());
            }
            Ok(el)
        }
        None => cx.render_root(vec![body.into()]),
    }
}

fn render_group(cx: &ComponentCx<'_>) -> Result<Element> {
    let props = cx.props();
    let value = props
        .get("value")
        .and_then(PropValue::as_list)
        .map(|items| {
            items
                .iter()
                .filter_map(PropValue::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let state = CheckboxGroupState {
        value,
        name: props.str("name").map(str::to_string),
        size: props.size().cloned(),
    };
    tracing::trace!("checkbox_group - {} checked", state.value.len());

    let cx = cx.provide(&CHECKBOX_GROUP_CONTEXT, state);
    let mut el = cx.render_root(cx.children().to_vec())?;
    el.attributes.insert("role".into(), "group".into());
    Ok(el)
}

static CHECKBOX_COMPONENT: OnceLock<Component> = OnceLock::new();
static GROUP_COMPONENT: OnceLock<Component> = OnceLock::new();

/// The Checkbox component. `Checkbox.Group` is its `"Group"` part.
pub fn checkbox() -> &'static Component {
    CHECKBOX_COMPONENT.get_or_init(|| {
        factory(
            ComponentDescriptor::new(CHECKBOX)
                .default_props(props! {
                    "size" => "sm",
                    "checked" => false,
                    "disabled" => false,
                })
                .consumes(&["value", "label", "color", "icon_color", "radius", "auto_contrast"])
                .selectors(&["root", "body", "inner", "input", "icon", "label"])
                .vars(VarsResolver::new(checkbox_vars)),
            render_checkbox,
        )
        .with_part("Group", checkbox_group().clone())
    })
}

pub fn checkbox_group() -> &'static Component {
    GROUP_COMPONENT.get_or_init(|| {
        factory(
            ComponentDescriptor::new(CHECKBOX_GROUP)
                .consumes(&["value", "name", "size"])
                .selectors(&["root"]),
            render_group,
        )
        .with_display_name("tessera/Checkbox.Group")
    })
}
