//! Dialog component with compound parts
//!
//! The root publishes its styles API through a required context; the parts
//! (`Dialog.Header`, `Dialog.Title`, `Dialog.CloseButton`, `Dialog.Body`)
//! style themselves with the root's resolver, so theme and instance
//! overrides given to the root reach every part. Rendering a part outside of
//! a dialog fails with [`StylesError::MissingContext`](tessera_styles::StylesError).
//!
//! # Example
//!
//! ```rust
//! use tessera_cn::{dialog, dialog_body, dialog_header, dialog_title};
//! use tessera_styles::{Child, ComponentProps, ThemeProvider};
//!
//! let provider = ThemeProvider::default();
//! let el = provider
//!     .render(
//!         dialog(),
//!         ComponentProps::new()
//!             .prop("opened", true)
//!             .prop("id", "confirm")
//!             .child(Child::component(
//!                 dialog_header(),
//!                 ComponentProps::new()
//!                     .child(Child::component(dialog_title(), ComponentProps::new().child("Delete?"))),
//!             ))
//!             .child(Child::component(dialog_body(), ComponentProps::new().child("This cannot be undone"))),
//!     )
//!     .unwrap();
//!
//! assert_eq!(el.attribute("aria-labelledby"), Some("confirm-title"));
//! let title = el.find_by_class("tessera-Dialog-title").unwrap();
//! assert_eq!(title.attribute("id"), Some("confirm-title"));
//! ```

use std::sync::{Arc, OnceLock};

use tessera_core::props;
use tessera_styles::{
    factory, get_radius, get_size, get_spacing, Component, ComponentCx, ComponentDescriptor,
    CompoundContext, CssVars, Element, Mod, ResolvedProps, Result, SafeContext, VarsResolver, ROOT,
};
use tessera_theme::Theme;

/// Registry key of [`dialog`]
pub const DIALOG: &str = "Dialog";

/// Root-only settings the parts need
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogInternal {
    pub title_id: Option<String>,
    pub body_id: Option<String>,
    pub close_label: String,
}

/// Context every dialog part requires
pub static DIALOG_CONTEXT: SafeContext<CompoundContext<DialogInternal>> = SafeContext::new(DIALOG);

/// CSS variables of a dialog instance
pub fn dialog_vars(_theme: &Theme, props: &ResolvedProps) -> CssVars {
    CssVars::new()
        .with(ROOT, "--dialog-size", get_size(props.size(), "dialog-size"))
        .with(ROOT, "--dialog-radius", get_radius(props.get("radius")))
        .with(ROOT, "--dialog-padding", get_spacing(props.get("padding")))
        .with(
            ROOT,
            "--dialog-z-index",
            props.get("z_index").and_then(|z| z.to_attribute()),
        )
}

fn render_dialog(cx: &ComponentCx<'_>) -> Result<Element> {
    let props = cx.props();
    let opened = props.flag("opened");
    let id = props.str("id");

    let internal = DialogInternal {
        title_id: id.map(|id| format!("{id}-title")),
        body_id: id.map(|id| format!("{id}-body")),
        close_label: props.str("close_label").unwrap_or("Close").to_string(),
    };
    let title_id = internal.title_id.clone();
    let body_id = internal.body_id.clone();

    let cx = cx
        .provide_compound(&DIALOG_CONTEXT, internal)
        .with_mods([Mod::toggle("opened", opened)]);

    let children = if opened { cx.children().to_vec() } else { Vec::new() };
    let mut el = cx.render_root(children)?;
    el.attributes.insert("role".into(), "dialog".into());
    el.attributes.insert("aria-modal".into(), "true".into());
    if let Some(title_id) = title_id {
        el.attributes.insert("aria-labelledby".into(), title_id);
    }
    if let Some(body_id) = body_id {
        el.attributes.insert("aria-describedby".into(), body_id);
    }
    if !opened {
        el.attributes.insert("hidden".into(), String::new());
    }
    Ok(el)
}

/// Render a part with the root's styles for `selector`
fn render_part(
    cx: &ComponentCx<'_>,
    part: &str,
    selector: &str,
) -> Result<(Element, Arc<CompoundContext<DialogInternal>>)> {
    let ctx = DIALOG_CONTEXT.use_context(cx.render_cx(), part)?;
    let styles = ctx
        .get_styles
        .get_styles(selector, Some(&cx.part_overrides(selector)));
    let el = cx.render_root_as(styles, cx.children().to_vec())?;
    Ok((el, ctx))
}

fn render_title(cx: &ComponentCx<'_>) -> Result<Element> {
    let (mut el, ctx) = render_part(cx, "Dialog.Title", "title")?;
    if let Some(id) = &ctx.internal.title_id {
        el.attributes.insert("id".into(), id.clone());
    }
    Ok(el)
}

fn render_body(cx: &ComponentCx<'_>) -> Result<Element> {
    let (mut el, ctx) = render_part(cx, "Dialog.Body", "body")?;
    if let Some(id) = &ctx.internal.body_id {
        el.attributes.insert("id".into(), id.clone());
    }
    Ok(el)
}

fn render_header(cx: &ComponentCx<'_>) -> Result<Element> {
    render_part(cx, "Dialog.Header", "header").map(|(el, _)| el)
}

fn render_close_button(cx: &ComponentCx<'_>) -> Result<Element> {
    let (mut el, ctx) = render_part(cx, "Dialog.CloseButton", "close")?;
    el.attributes
        .insert("aria-label".into(), ctx.internal.close_label.clone());
    if el.children.is_empty() {
        el = el.text("\u{00d7}");
    }
    Ok(el)
}

static DIALOG_COMPONENT: OnceLock<Component> = OnceLock::new();
static HEADER: OnceLock<Component> = OnceLock::new();
static TITLE: OnceLock<Component> = OnceLock::new();
static BODY: OnceLock<Component> = OnceLock::new();
static CLOSE_BUTTON: OnceLock<Component> = OnceLock::new();

pub fn dialog_header() -> &'static Component {
    HEADER.get_or_init(|| {
        factory(ComponentDescriptor::new("DialogHeader").tag("header"), render_header)
            .with_display_name("tessera/Dialog.Header")
    })
}

pub fn dialog_title() -> &'static Component {
    TITLE.get_or_init(|| {
        factory(ComponentDescriptor::new("DialogTitle").tag("h2"), render_title)
            .with_display_name("tessera/Dialog.Title")
    })
}

pub fn dialog_body() -> &'static Component {
    BODY.get_or_init(|| {
        factory(ComponentDescriptor::new("DialogBody"), render_body)
            .with_display_name("tessera/Dialog.Body")
    })
}

pub fn dialog_close_button() -> &'static Component {
    CLOSE_BUTTON.get_or_init(|| {
        factory(
            ComponentDescriptor::new("DialogCloseButton").tag("button"),
            render_close_button,
        )
        .with_display_name("tessera/Dialog.CloseButton")
    })
}

/// The Dialog root. Its parts are also reachable with
/// [`Component::part`] (`"Header"`, `"Title"`, `"Body"`, `"CloseButton"`).
pub fn dialog() -> &'static Component {
    DIALOG_COMPONENT.get_or_init(|| {
        factory(
            ComponentDescriptor::new(DIALOG)
                .tag("section")
                .default_props(props! {
                    "opened" => false,
                    "size" => "md",
                    "padding" => "md",
                    "close_label" => "Close",
                })
                .consumes(&["id", "radius", "z_index"])
                .selectors(&["root", "header", "title", "close", "body"])
                .vars(VarsResolver::new(dialog_vars)),
            render_dialog,
        )
        .with_part("Header", dialog_header().clone())
        .with_part("Title", dialog_title().clone())
        .with_part("Body", dialog_body().clone())
        .with_part("CloseButton", dialog_close_button().clone())
    })
}
