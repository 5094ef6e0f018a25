use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use tessera_core::props;
use tessera_styles::{
    factory, BreakpointQuery, ComponentDescriptor, ComponentProps, ResponsiveRules, StyleSheet,
    ThemeProvider,
};

#[test]
fn concurrent_mints_are_unique() {
    let sheet = Arc::new(StyleSheet::new());

    let tokens: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sheet = &sheet;
                s.spawn(move || {
                    (0..1250)
                        .map(|_| sheet.mint_scoped_selector().class_name().to_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(tokens.len(), 10_000);
    let unique: HashSet<&String> = tokens.iter().collect();
    assert_eq!(unique.len(), 10_000);
    assert!(tokens.iter().all(|t| t.starts_with("tsr-")));
}

#[test]
fn rule_lives_as_long_as_element() {
    let columns = factory(
        ComponentDescriptor::new("Columns").default_props(props! { "cols" => 1 }),
        |cx| {
            let mut rules = ResponsiveRules::new(BreakpointQuery::Media);
            if let Some(cols) = cx.props().get("cols") {
                rules.add_prop(cx.theme(), "--cols", cols, |v| v.to_attribute());
            }
            let scoped = cx.inject_scoped(&rules);
            let mut el = cx.render_root_with(
                &tessera_styles::StyleOverrides::new().class_name(scoped.class_name()),
                Vec::new(),
            )?;
            el.retain_scoped(scoped);
            Ok(el)
        },
    );

    let provider = ThemeProvider::default();
    let el = provider
        .render(
            &columns,
            ComponentProps::new().prop(
                "cols",
                tessera_core::PropValue::Map(
                    [
                        ("base".to_string(), 1.into()),
                        ("sm".to_string(), 2.into()),
                        ("lg".to_string(), 4.into()),
                    ]
                    .into_iter()
                    .collect(),
                ),
            ),
        )
        .unwrap();

    let token = el
        .class_name
        .split(' ')
        .find(|c| c.starts_with("tsr-"))
        .unwrap()
        .to_string();

    let css = provider.stylesheet().to_css();
    assert!(css.contains(&format!(".{token} {{")));
    assert!(css.contains("@media (min-width: 48em)"));
    assert!(css.contains("@media (min-width: 75em)"));
    assert!(css.contains("--cols: 4;"));

    drop(el);
    assert!(provider.stylesheet().is_empty());
}

#[test]
fn nested_provider_shares_stylesheet() {
    let outer = ThemeProvider::default();
    let inner = outer.nested(None, Default::default());

    let selector = inner.stylesheet().mint_scoped_selector();
    let guard = inner
        .stylesheet()
        .inject_rule(&selector, &ResponsiveRules::new(BreakpointQuery::Media).base("--x", "1"));

    assert!(outer.stylesheet().contains(&selector));
    drop(guard);
    assert!(!outer.stylesheet().contains(&selector));
}
