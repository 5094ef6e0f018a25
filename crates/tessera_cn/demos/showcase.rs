//! Component Showcase
//!
//! Loads a provider config from TOML, renders every component once and
//! prints the resulting markup followed by the theme variables and the
//! scoped rules injected by responsive components.
//!
//! Run with: cargo run -p tessera_cn --example showcase
//! Verbose:  RUST_LOG=tessera_styles=debug cargo run -p tessera_cn --example showcase

use anyhow::Result;
use tessera_cn::{
    button, checkbox, checkbox_group, dialog, dialog_body, dialog_close_button, dialog_header,
    dialog_title, scroll_area, simple_grid,
};
use tessera_core::{InlineStyle, PropValue};
use tessera_styles::{Child, ComponentProps, ThemeProvider};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
preset = "teal"
primary_shade = { light = 7, dark = 8 }

[components.Button.default_props]
variant = "light"
radius = "md"

[components.Button.class_names]
root = "showcase-button"

[components.Dialog.styles.title]
font-weight = "700"

[components.SimpleGrid.default_props]
spacing = "lg"
"#;

/// `{ base = .., sm = .. }` responsive value
fn responsive(entries: &[(&str, PropValue)]) -> PropValue {
    PropValue::Map(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let provider = ThemeProvider::from_toml(CONFIG)?;
    tracing::info!("showcase - theme {:?}", provider.theme().name);

    // ========================================================================
    // Button
    // ========================================================================

    let save = provider.render(
        button(),
        ComponentProps::new()
            .prop("left_section", "+")
            .class_name("primary-action")
            .child("Save"),
    )?;
    let docs = provider.render(
        button(),
        ComponentProps::new()
            .component("a")
            .prop("href", "/docs")
            .prop("variant", "subtle")
            .child("Docs"),
    )?;

    // ========================================================================
    // Dialog
    // ========================================================================

    let confirm = provider.render(
        dialog(),
        ComponentProps::new()
            .prop("opened", true)
            .prop("id", "confirm")
            .child(Child::component(
                dialog_header(),
                ComponentProps::new()
                    .child(Child::component(dialog_title(), ComponentProps::new().child("Discard draft?")))
                    .child(Child::component(dialog_close_button(), ComponentProps::new())),
            ))
            .child(Child::component(
                dialog_body(),
                ComponentProps::new().child("Unsaved changes will be lost."),
            )),
    )?;

    // ========================================================================
    // Checkbox.Group
    // ========================================================================

    let toppings = provider.render(
        checkbox_group(),
        ComponentProps::new()
            .prop("name", "toppings")
            .prop("value", vec!["olives"])
            .children(["olives", "peppers", "onions"].map(|value| {
                Child::component(
                    checkbox(),
                    ComponentProps::new().prop("value", value).prop("label", value),
                )
            })),
    )?;

    // ========================================================================
    // SimpleGrid inside a ScrollArea
    // ========================================================================

    let grid = provider.render(
        scroll_area(),
        ComponentProps::new()
            .styles("root", InlineStyle::new().with("height", "320px"))
            .prop("scrollbars", "y")
            .child(Child::component(
                simple_grid(),
                ComponentProps::new()
                    .prop("cols", responsive(&[("base", 1.into()), ("sm", 2.into()), ("lg", 4.into())]))
                    .children((1..=8).map(|i| format!("Card {i}"))),
            )),
    )?;

    for el in [&save, &docs, &confirm, &toppings, &grid] {
        println!("{}\n", el.to_html());
    }

    println!("{}\n", provider.theme().to_css());
    println!("{}", provider.stylesheet().to_css());

    Ok(())
}
