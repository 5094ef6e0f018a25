//! Scroll Area component
//!
//! A scroll container with custom scrollbars. Its outermost element is
//! called `scrollContainer` internally; the public `root` selector is an
//! alias for it, so `class_names.root`, `styles.root` and root vars all land
//! on the container.
//!
//! # Example
//!
//! ```rust
//! use tessera_cn::scroll_area;
//! use tessera_styles::{ComponentProps, ThemeProvider};
//!
//! let provider = ThemeProvider::default();
//! let el = provider
//!     .render(
//!         scroll_area(),
//!         ComponentProps::new()
//!             .class_names("root", "sidebar-scroll")
//!             .prop("scrollbars", "y")
//!             .child("long content"),
//!     )
//!     .unwrap();
//!
//! assert_eq!(el.class_name, "tessera-ScrollArea-scrollContainer sidebar-scroll");
//! assert_eq!(el.attribute("data-type"), Some("hover"));
//! ```

use std::sync::OnceLock;

use tessera_core::props;
use tessera_styles::{
    factory, get_size, Child, Component, ComponentCx, ComponentDescriptor, CssVars, Element, Mod,
    ResolvedProps, Result, VarsResolver, ROOT,
};
use tessera_theme::Theme;

/// Registry key of [`scroll_area`]
pub const SCROLL_AREA: &str = "ScrollArea";

/// Scrollbar visibility modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollbarType {
    Auto,
    Always,
    Scroll,
    #[default]
    Hover,
    Never,
}

impl ScrollbarType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "scroll" => Some(Self::Scroll),
            "hover" => Some(Self::Hover),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Scroll => "scroll",
            Self::Hover => "hover",
            Self::Never => "never",
        }
    }
}

/// CSS variables of a scroll area instance
pub fn scroll_area_vars(_theme: &Theme, props: &ResolvedProps) -> CssVars {
    let size = props.get("scrollbar_size");
    let offset = if props.flag("offset_scrollbars") {
        get_size(size, "scrollarea-scrollbar-size")
    } else {
        None
    };

    CssVars::new()
        .with(ROOT, "--scrollarea-scrollbar-size", get_size(size, "scrollarea-scrollbar-size"))
        .with(ROOT, "--scrollarea-over-scrollbar-offset", offset)
}

fn scrollbar(cx: &ComponentCx<'_>, orientation: &str) -> Element {
    cx.element("div", "scrollbar")
        .attr("data-orientation", orientation)
        .child(cx.element("div", "thumb"))
}

fn render(cx: &ComponentCx<'_>) -> Result<Element> {
    let props = cx.props();
    let kind = props
        .str("type")
        .and_then(ScrollbarType::parse)
        .unwrap_or_default();
    let axes = props.str("scrollbars").unwrap_or("xy");
    let (x, y) = (axes.contains('x'), axes.contains('y'));

    let mut content = cx.element("div", "content");
    content.children = cx.render_cx().render_children(cx.children().to_vec())?;
    let viewport = cx.element("div", "viewport").child(content);

    let mut children: Vec<Child> = vec![viewport.into()];
    if kind != ScrollbarType::Never {
        if x {
            children.push(scrollbar(cx, "horizontal").into());
        }
        if y {
            children.push(scrollbar(cx, "vertical").into());
        }
        if x && y {
            children.push(cx.element("div", "corner").into());
        }
    }

    cx.with_mods([
        Mod::value("type", kind.key()),
        Mod::toggle("offset-scrollbars", props.flag("offset_scrollbars")),
    ])
    .render_root(children)
}

static SCROLL_AREA_COMPONENT: OnceLock<Component> = OnceLock::new();

pub fn scroll_area() -> &'static Component {
    SCROLL_AREA_COMPONENT.get_or_init(|| {
        factory(
            ComponentDescriptor::new(SCROLL_AREA)
                .default_props(props! {
                    "type" => "hover",
                    "scrollbars" => "xy",
                    "scrollbar_size" => 8,
                    "offset_scrollbars" => false,
                })
                .selectors(&["scrollContainer", "viewport", "content", "scrollbar", "thumb", "corner"])
                .root_selector("scrollContainer")
                .vars(VarsResolver::new(scroll_area_vars)),
            render,
        )
    })
}
