use pretty_assertions::assert_eq;
use tessera_core::{props, InlineStyle, PropMap};
use tessera_styles::{
    create_style_resolver, factory, resolve_props, ClassNames, ComponentDescriptor,
    ComponentProps, CssVars, OverrideRegistry, ResolvedProps, StyleOverrides, StyleProps,
    StylesInput, ThemeOverride, ThemeProvider, VarsResolver,
};
use tessera_theme::Theme;

fn size_registry() -> OverrideRegistry {
    OverrideRegistry::new().with(
        "Button",
        ThemeOverride::new().default_props(props! { "size" => "md" }),
    )
}

#[test]
fn theme_default_beats_builtin_default() {
    let resolved = resolve_props(
        &size_registry(),
        "Button",
        &props! { "size" => "sm" },
        &PropMap::new(),
    );
    assert_eq!(resolved.str("size"), Some("md"));
}

#[test]
fn instance_prop_beats_theme_default() {
    let resolved = resolve_props(
        &size_registry(),
        "Button",
        &props! { "size" => "sm" },
        &props! { "size" => "lg" },
    );
    assert_eq!(resolved.str("size"), Some("lg"));
}

fn class_for(unstyled: bool) -> String {
    let theme = Theme::default();
    let classes = ClassNames::new().with("root", "btn-root");
    let props = ResolvedProps::default();
    let style_props = StyleProps::new()
        .class_names("root", "user-root")
        .unstyled(unstyled);

    let resolver = create_style_resolver(StylesInput {
        component: "Button",
        classes: &classes,
        props: &props,
        theme: &theme,
        theme_override: None,
        style_props: &style_props,
        vars_resolver: None,
        root_selector: None,
    });

    resolver
        .get_styles("root", Some(&StyleOverrides::new().class_name("extra")))
        .class_name
}

#[test]
fn class_tokens_join_in_order() {
    assert_eq!(class_for(false), "btn-root user-root extra");
}

#[test]
fn unstyled_drops_only_static_tokens() {
    assert_eq!(class_for(true), "user-root extra");
}

#[test]
fn undefined_vars_are_dropped() {
    let theme = Theme::default();
    let classes = ClassNames::new();
    let props = ResolvedProps::default();
    let style_props = StyleProps::new();
    let vars = VarsResolver::new(|_, _| {
        CssVars::new()
            .with("root", "--h", Some("10px"))
            .with("root", "--w", None::<String>)
    });

    let resolver = create_style_resolver(StylesInput {
        component: "Box",
        classes: &classes,
        props: &props,
        theme: &theme,
        theme_override: None,
        style_props: &style_props,
        vars_resolver: Some(&vars),
        root_selector: None,
    });

    let style = resolver.get_styles("root", None).style;
    assert_eq!(style, InlineStyle::new().with("--h", "10px"));
    assert!(!style.contains("--w"));
    assert!(!style.to_declarations().contains("undefined"));
}

#[test]
fn unknown_selector_renders_without_styles() {
    let provider = ThemeProvider::default();
    let gauge = factory(ComponentDescriptor::new("Gauge").selectors(&["root"]), |cx| {
        let ghost = cx.element("i", "ghost");
        assert!(ghost.class_name.is_empty());
        cx.render_root(vec![ghost.into()])
    });

    let el = provider.render(&gauge, ComponentProps::new()).unwrap();
    assert_eq!(el.to_html(), r#"<div class="tessera-Gauge-root"><i></i></div>"#);
}

#[test]
fn theme_override_flows_through_render() {
    let gauge = factory(
        ComponentDescriptor::new("Gauge")
            .default_props(props! { "size" => "sm" })
            .selectors(&["root", "label"])
            .vars(VarsResolver::new(|_, props| {
                CssVars::new().with(
                    "root",
                    "--gauge-fz",
                    tessera_styles::get_font_size(props.get("size")),
                )
            })),
        |cx| {
            let label = cx.element("span", "label");
            cx.render_root(vec![label.into()])
        },
    );

    let provider = ThemeProvider::default().with_registry(
        OverrideRegistry::new().with(
            "Gauge",
            ThemeOverride::new()
                .default_props(props! { "size" => "lg" })
                .class_name("label", "app-label")
                .style("root", InlineStyle::new().with("margin", "4px")),
        ),
    );

    let el = provider
        .render(
            &gauge,
            ComponentProps::new().style(InlineStyle::new().with("margin", "8px")),
        )
        .unwrap();

    assert_eq!(el.style.get("--gauge-fz"), Some("var(--tessera-font-size-lg)"));
    assert_eq!(el.style.get("margin"), Some("8px"));
    assert_eq!(el.attribute("data-size"), Some("lg"));

    let label = el.find_by_class("app-label").unwrap();
    assert_eq!(label.class_name, "tessera-Gauge-label app-label");
}

#[test]
fn forwarded_props_become_attributes() {
    let gauge = factory(
        ComponentDescriptor::new("Gauge")
            .tag("input")
            .default_props(props! { "size" => "sm" })
            .consumes(&["label"]),
        |cx| cx.render_root(Vec::new()),
    );
    let provider = ThemeProvider::default();

    let el = provider
        .render(
            &gauge,
            ComponentProps::new()
                .prop("type", "checkbox")
                .prop("label", "Accept")
                .prop("disabled", true)
                .prop("hidden", false)
                .prop("size", 20),
        )
        .unwrap();

    assert_eq!(el.attribute("type"), Some("checkbox"));
    assert_eq!(el.attribute("disabled"), Some("true"));
    assert_eq!(el.attribute("label"), None);
    assert_eq!(el.attribute("hidden"), None);
    // Numeric sizes are not exposed as data-size
    assert_eq!(el.attribute("data-size"), None);
}
