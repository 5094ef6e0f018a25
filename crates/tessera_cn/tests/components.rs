use pretty_assertions::assert_eq;
use tessera_cn::{
    button, checkbox, checkbox_group, dialog, dialog_body, dialog_header, dialog_title, BUTTON,
    DIALOG,
};
use tessera_core::{props, InlineStyle};
use tessera_styles::{
    Child, ComponentProps, NodeRef, OverrideRegistry, StylesError, ThemeOverride, ThemeProvider,
};
use tessera_theme::ColorScheme;

#[test]
fn dialog_title_outside_dialog_names_root() {
    let provider = ThemeProvider::default();
    let err = provider
        .render(dialog_title(), ComponentProps::new().child("Orphan"))
        .unwrap_err();

    assert!(matches!(err, StylesError::MissingContext { root: DIALOG, .. }));
    assert!(err.to_string().contains("Dialog"));
}

#[test]
fn dialog_overrides_reach_parts() {
    let provider = ThemeProvider::default().with_registry(OverrideRegistry::new().with(
        DIALOG,
        ThemeOverride::new()
            .class_name("title", "app-dialog-title")
            .style("body", InlineStyle::new().with("padding", "0")),
    ));

    let el = provider
        .render(
            dialog(),
            ComponentProps::new()
                .prop("opened", true)
                .class_names("body", "instance-body")
                .child(Child::component(
                    dialog_header(),
                    ComponentProps::new().child(Child::component(
                        dialog_title(),
                        ComponentProps::new().child("Settings"),
                    )),
                ))
                .child(Child::component(dialog_body(), ComponentProps::new().child("..."))),
        )
        .unwrap();

    let title = el.find_by_class("tessera-Dialog-title").unwrap();
    assert_eq!(title.class_name, "tessera-Dialog-title app-dialog-title");
    assert_eq!(title.tag, "h2");

    let body = el.find_by_class("tessera-Dialog-body").unwrap();
    assert_eq!(body.class_name, "tessera-Dialog-body instance-body");
    assert_eq!(body.style.get("padding"), Some("0"));
}

#[test]
fn checkbox_group_state_reaches_only_checkboxes() {
    let provider = ThemeProvider::default();

    let standalone = provider
        .render(checkbox(), ComponentProps::new().prop("value", "a"))
        .unwrap();
    assert_eq!(standalone.attribute("data-checked"), None);

    let grouped = provider
        .render(
            checkbox_group(),
            ComponentProps::new()
                .prop("value", vec!["a"])
                .child(Child::component(checkbox(), ComponentProps::new().prop("value", "a")))
                .child(Child::component(button(), ComponentProps::new().child("Submit"))),
        )
        .unwrap();

    let item = grouped.children[0].as_element().unwrap();
    assert_eq!(item.attribute("data-checked"), Some("true"));
    let submit = grouped.children[1].as_element().unwrap();
    assert_eq!(submit.tag, "button");
}

#[test]
fn button_theme_defaults_and_color_scheme() {
    let provider = ThemeProvider::default().with_registry(OverrideRegistry::new().with(
        BUTTON,
        ThemeOverride::new().default_props(props! { "variant" => "default", "size" => "md" }),
    ));

    let light = provider.render(button(), ComponentProps::new()).unwrap();
    assert_eq!(light.attribute("data-variant"), Some("default"));
    assert_eq!(light.attribute("data-size"), Some("md"));
    assert_eq!(light.style.get("--button-bg"), Some("#ffffff"));

    provider.set_color_scheme(ColorScheme::Dark);
    let dark = provider.render(button(), ComponentProps::new()).unwrap();
    assert_eq!(dark.style.get("--button-bg"), Some("#2e2e2e"));
    assert_eq!(dark.style.get("--button-color"), Some("#ffffff"));
}

#[test]
fn button_ref_and_mods() {
    let provider = ThemeProvider::default();
    let node_ref = NodeRef::new();

    let el = provider
        .render(
            button(),
            ComponentProps::new()
                .prop("loading", true)
                .prop("full_width", true)
                .prop("left_section", "+")
                .node_ref(&node_ref)
                .child("Add"),
        )
        .unwrap();

    assert_eq!(el.attribute("data-loading"), Some("true"));
    assert_eq!(el.attribute("data-block"), Some("true"));
    assert_eq!(el.attribute("data-with-left-section"), Some("true"));
    assert_eq!(el.attribute("data-disabled"), None);
    assert_eq!(el.attribute("disabled"), Some(""));
    assert!(el.find_by_class("tessera-Button-loader").is_some());
    assert_eq!(node_ref.get().map(|h| h.tag), Some("button".to_string()));
}

#[test]
fn config_file_drives_components() {
    let provider = ThemeProvider::from_toml(
        r#"
        preset = "violet"

        [components.Button.default_props]
        variant = "light"
        radius = "xl"

        [components.Button.class_names]
        label = "app-button-label"
        "#,
    )
    .unwrap();

    let el = provider
        .render(button(), ComponentProps::new().child("Save"))
        .unwrap();

    assert_eq!(el.attribute("data-variant"), Some("light"));
    assert_eq!(el.style.get("--button-radius"), Some("var(--tessera-radius-xl)"));
    assert!(el.find_by_class("app-button-label").is_some());
}
