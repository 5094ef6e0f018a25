//! Modifier flags rendered as `data-*` attributes

use indexmap::IndexMap;
use serde::Deserialize;
use tessera_core::kebab_case;

/// One `mod` entry
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mod {
    /// Always present: `data-{name}="true"`
    Flag(String),
    /// Present only when `true`
    Toggle(String, bool),
    /// `data-{name}="{value}"`
    Value(String, String),
}

impl Mod {
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag(name.into())
    }

    pub fn toggle(name: impl Into<String>, on: bool) -> Self {
        Self::Toggle(name.into(), on)
    }

    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Value(name.into(), value.into())
    }
}

/// `withIcon` / `with_icon` / `data-with-icon` -> `data-with-icon`
pub fn data_attribute(name: &str) -> String {
    if name.starts_with("data-") {
        name.to_string()
    } else {
        format!("data-{}", kebab_case(name))
    }
}

/// Attributes for a list of modifiers, in order; later entries win
pub fn mod_attributes(mods: &[Mod]) -> IndexMap<String, String> {
    let mut attributes = IndexMap::new();
    for m in mods {
        match m {
            Mod::Flag(name) | Mod::Toggle(name, true) => {
                attributes.insert(data_attribute(name), "true".to_string());
            }
            Mod::Toggle(name, false) => {
                attributes.shift_remove(&data_attribute(name));
            }
            Mod::Value(name, value) => {
                attributes.insert(data_attribute(name), value.clone());
            }
        }
    }
    attributes
}
