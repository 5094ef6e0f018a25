//! Theme-provider boundary
//!
//! A [`ThemeProvider`] owns the active theme, its override registry, the
//! memoized style resolvers computed under them, and the stylesheet scoped
//! rules are injected into. Replacing the theme or the registry swaps it
//! wholesale and invalidates every memoized resolver, in this boundary and
//! in every boundary nested inside it.
//!
//! ```rust
//! use tessera_styles::{OverrideRegistry, ThemeOverride, ThemeProvider};
//! use tessera_core::props;
//! use tessera_theme::{ColorScheme, Theme};
//!
//! let provider = ThemeProvider::new(Theme::default()).with_registry(
//!     OverrideRegistry::new().with(
//!         "Button",
//!         ThemeOverride::new().default_props(props! { "radius" => "xl" }),
//!     ),
//! );
//!
//! provider.toggle_color_scheme();
//! assert_eq!(provider.theme().color_scheme, ColorScheme::Dark);
//! assert!(provider.registry().lookup("Button").is_some());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;
use serde::Deserialize;
use smallvec::SmallVec;
use tessera_core::{MemoCache, PropMap};
use tessera_theme::{ColorScheme, Theme, ThemeConfig};

use crate::context::RenderCx;
use crate::error::Result;
use crate::factory::Component;
use crate::node::Element;
use crate::props::ComponentProps;
use crate::registry::{OverrideRegistry, ThemeOverride};
use crate::scoped::StyleSheet;
use crate::styles_api::{ClassNames, Styles};
use crate::vars::{CssVars, VarsResolver};

/// Revisions of a boundary and every enclosing one, innermost first
type Revisions = SmallVec<[u64; 4]>;

struct BoundaryState {
    /// `None` inherits the enclosing boundary's theme
    theme: Option<Arc<Theme>>,
    /// This boundary's own entries
    registry: Arc<OverrideRegistry>,
}

/// Effective theme and registry, as of `revisions`
struct Snapshot {
    revisions: Revisions,
    theme: Arc<Theme>,
    registry: Arc<OverrideRegistry>,
}

/// State of one provider boundary, shared with nested boundaries
struct Boundary {
    state: RwLock<BoundaryState>,
    revision: AtomicU64,
    snapshot: RwLock<Option<Snapshot>>,
    parent: Option<Arc<Boundary>>,
}

impl Boundary {
    fn new(
        theme: Option<Arc<Theme>>,
        registry: OverrideRegistry,
        parent: Option<Arc<Boundary>>,
    ) -> Self {
        Self {
            state: RwLock::new(BoundaryState {
                theme,
                registry: Arc::new(registry),
            }),
            revision: AtomicU64::new(0),
            snapshot: RwLock::new(None),
            parent,
        }
    }

    fn update(&self, update: impl FnOnce(&mut BoundaryState)) {
        update(&mut self.state.write().unwrap_or_else(PoisonError::into_inner));
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    fn revisions(&self) -> Revisions {
        let mut revisions = Revisions::new();
        let mut boundary = Some(self);
        while let Some(current) = boundary {
            revisions.push(current.revision.load(Ordering::Acquire));
            boundary = current.parent.as_deref();
        }
        revisions
    }

    /// Effective theme and registry, with the revisions they reflect
    fn resolve(&self) -> (Arc<Theme>, Arc<OverrideRegistry>, Revisions) {
        let revisions = self.revisions();
        {
            let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(s) = snapshot.as_ref().filter(|s| s.revisions == revisions) {
                return (s.theme.clone(), s.registry.clone(), revisions);
            }
        }

        let inherited = self.parent.as_ref().map(|parent| {
            let (theme, registry, _) = parent.resolve();
            (theme, registry)
        });

        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let (theme, registry) = match inherited {
            Some((parent_theme, parent_registry)) => {
                let theme = state.theme.clone().unwrap_or(parent_theme);
                let registry = if state.registry.parent().is_none() {
                    Arc::new((*state.registry).clone().with_parent(parent_registry))
                } else {
                    state.registry.clone()
                };
                (theme, registry)
            }
            None => (
                state.theme.clone().unwrap_or_else(|| Arc::new(Theme::default())),
                state.registry.clone(),
            ),
        };
        drop(state);

        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(Snapshot {
            revisions: revisions.clone(),
            theme: theme.clone(),
            registry: registry.clone(),
        });
        (theme, registry, revisions)
    }
}

/// Theme-provider boundary
pub struct ThemeProvider {
    boundary: Arc<Boundary>,
    cache: MemoCache,
    /// Enclosing revisions the cached resolvers were computed under
    cached_under: RwLock<Revisions>,
    stylesheet: Arc<StyleSheet>,
}

impl ThemeProvider {
    pub fn new(theme: Theme) -> Self {
        let boundary = Boundary::new(Some(Arc::new(theme)), OverrideRegistry::new(), None);
        Self::with_boundary(Arc::new(boundary), Arc::new(StyleSheet::new()))
    }

    fn with_boundary(boundary: Arc<Boundary>, stylesheet: Arc<StyleSheet>) -> Self {
        let cached_under = RwLock::new(boundary.revisions());
        Self {
            boundary,
            cache: MemoCache::new(),
            cached_under,
            stylesheet,
        }
    }

    pub fn with_registry(self, registry: OverrideRegistry) -> Self {
        self.boundary.update(|state| state.registry = Arc::new(registry));
        self
    }

    /// Replace the memo cache with one holding at most `capacity` resolvers
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = MemoCache::with_capacity(capacity);
        self
    }

    /// Build a provider from a TOML [`ProviderConfig`]
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let theme = config.theme.build()?;
        Ok(Self::new(theme).with_registry(config.registry()))
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Self::from_config(&ProviderConfig::from_toml(source)?)
    }

    /// Inner boundary sharing this provider's stylesheet. Its registry falls
    /// back to this provider's registry, and without a theme of its own it
    /// follows this provider's theme. Later changes to this provider reach
    /// the inner one on its next render.
    pub fn nested(&self, theme: Option<Theme>, registry: OverrideRegistry) -> ThemeProvider {
        tracing::debug!(
            "ThemeProvider::nested - {} own overrides, own theme: {}",
            registry.len(),
            theme.is_some()
        );

        let boundary = Boundary::new(theme.map(Arc::new), registry, Some(self.boundary.clone()));
        ThemeProvider::with_boundary(Arc::new(boundary), self.stylesheet.clone())
    }

    /// Current theme and registry; drops memoized resolvers computed under
    /// an enclosing boundary's previous state
    fn snapshot(&self) -> (Arc<Theme>, Arc<OverrideRegistry>) {
        let (theme, registry, revisions) = self.boundary.resolve();
        let stale = {
            let cached_under = self.cached_under.read().unwrap_or_else(PoisonError::into_inner);
            cached_under[1..] != revisions[1..]
        };
        if stale {
            tracing::debug!("ThemeProvider::snapshot - enclosing provider changed");
            self.cache.invalidate();
            *self.cached_under.write().unwrap_or_else(PoisonError::into_inner) = revisions;
        }
        (theme, registry)
    }

    pub fn theme(&self) -> Arc<Theme> {
        self.snapshot().0
    }

    /// Effective registry, chained to enclosing boundaries
    pub fn registry(&self) -> Arc<OverrideRegistry> {
        self.snapshot().1
    }

    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    pub fn stylesheet(&self) -> &Arc<StyleSheet> {
        &self.stylesheet
    }

    /// Replace the active theme
    pub fn set_theme(&self, theme: Theme) {
        tracing::debug!("ThemeProvider::set_theme - {:?}", theme.name);
        self.boundary.update(|state| state.theme = Some(Arc::new(theme)));
        self.cache.invalidate();
    }

    /// Replace the active theme with an edited copy. An inner boundary that
    /// inherited its theme owns the edited copy from then on.
    pub fn update_theme(&self, update: impl FnOnce(&mut Theme)) {
        let mut theme = (*self.theme()).clone();
        update(&mut theme);
        self.set_theme(theme);
    }

    /// Replace this boundary's own overrides. Enclosing registries stay
    /// chained behind them.
    pub fn set_registry(&self, registry: OverrideRegistry) {
        tracing::debug!("ThemeProvider::set_registry - {} entries", registry.len());
        self.boundary.update(|state| state.registry = Arc::new(registry));
        self.cache.invalidate();
    }

    pub fn set_color_scheme(&self, scheme: ColorScheme) {
        if self.theme().color_scheme == scheme {
            return;
        }
        self.update_theme(|theme| theme.color_scheme = scheme);
    }

    /// Toggle between light and dark
    pub fn toggle_color_scheme(&self) {
        self.update_theme(|theme| theme.color_scheme = theme.color_scheme.toggle());
    }

    /// Drop memoized style resolvers
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Root render scope with a snapshot of the current theme and registry
    pub fn cx(&self) -> RenderCx<'_> {
        let (theme, registry) = self.snapshot();
        RenderCx::new(self, theme, registry)
    }

    /// Render `component` at the root of this boundary
    pub fn render(&self, component: &Component, props: ComponentProps) -> Result<Element> {
        component.render(&self.cx(), props)
    }
}

impl Default for ThemeProvider {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Overrides for one component, as written in configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentConfig {
    pub default_props: PropMap,
    pub class_names: ClassNames,
    pub styles: Styles,
    pub vars: CssVars,
}

impl ComponentConfig {
    pub fn to_override(&self) -> ThemeOverride {
        let mut entry = ThemeOverride::new().default_props(self.default_props.clone());
        entry.class_names = self.class_names.clone();
        entry.styles = self.styles.clone();
        if !self.vars.is_empty() {
            entry.vars = Some(VarsResolver::constant(self.vars.clone()));
        }
        entry
    }
}

/// Provider configuration: a theme plus `[components.<Name>]` overrides
///
/// ```toml
/// preset = "teal"
///
/// [components.Button.default_props]
/// size = "md"
///
/// [components.Button.class_names]
/// root = "app-button"
///
/// [components.Button.vars.root]
/// "--button-height" = "50px"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(flatten)]
    pub theme: ThemeConfig,
    pub components: IndexMap<String, ComponentConfig>,
}

impl ProviderConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn registry(&self) -> OverrideRegistry {
        let mut registry = OverrideRegistry::new();
        for (name, config) in &self.components {
            registry.register(name.clone(), config.to_override());
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::props;

    #[test]
    fn test_set_theme_invalidates() {
        let provider = ThemeProvider::default();
        provider.cache().get_or_insert_with(&"k", || 1u8);
        assert_eq!(provider.cache().len(), 1);

        provider.set_theme(Theme::default().with_primary_color("red"));

        assert!(provider.cache().is_empty());
        assert_eq!(provider.theme().primary_color, "red");
        assert_eq!(provider.cache().revision(), 1);
    }

    #[test]
    fn test_set_color_scheme_noop_when_unchanged() {
        let provider = ThemeProvider::default();
        provider.set_color_scheme(ColorScheme::Light);
        assert_eq!(provider.cache().revision(), 0);

        provider.set_color_scheme(ColorScheme::Dark);
        assert_eq!(provider.theme().color_scheme, ColorScheme::Dark);
        assert_eq!(provider.cache().revision(), 1);
    }

    #[test]
    fn test_cx_snapshot_survives_swap() {
        let provider = ThemeProvider::default();
        let cx = provider.cx();
        provider.set_theme(Theme::default().with_name("Other"));

        assert_eq!(cx.theme().name, "Tessera");
        assert_eq!(provider.cx().theme().name, "Other");
    }

    #[test]
    fn test_nested_inherits() {
        let outer = ThemeProvider::default().with_registry(OverrideRegistry::new().with(
            "Badge",
            ThemeOverride::new().default_props(props! { "variant" => "dot" }),
        ));
        let inner = outer.nested(
            None,
            OverrideRegistry::new().with("Button", ThemeOverride::new()),
        );

        assert!(inner.registry().lookup("Badge").is_some());
        assert!(outer.registry().lookup("Button").is_none());
        assert!(Arc::ptr_eq(inner.stylesheet(), outer.stylesheet()));
        assert!(Arc::ptr_eq(&inner.theme(), &outer.theme()));
    }

    #[test]
    fn test_set_registry_keeps_parent() {
        let outer = ThemeProvider::default().with_registry(
            OverrideRegistry::new().with("Badge", ThemeOverride::new()),
        );
        let inner = outer.nested(None, OverrideRegistry::new());
        inner.set_registry(OverrideRegistry::new().with("Button", ThemeOverride::new()));

        assert!(inner.registry().lookup("Badge").is_some());
        assert!(inner.registry().lookup("Button").is_some());
    }

    #[test]
    fn test_nested_follows_outer_swaps() {
        let outer = ThemeProvider::default();
        let middle = outer.nested(None, OverrideRegistry::new());
        let inner = middle.nested(None, OverrideRegistry::new());
        inner.cache().get_or_insert_with(&"k", || 1u8);
        middle.cache().get_or_insert_with(&"k", || 1u8);

        outer.set_color_scheme(ColorScheme::Dark);
        outer.set_registry(OverrideRegistry::new().with("Badge", ThemeOverride::new()));

        assert_eq!(inner.theme().color_scheme, ColorScheme::Dark);
        assert!(inner.registry().lookup("Badge").is_some());
        assert!(inner.cache().is_empty());

        // The inner lookup refreshed the middle boundary, its cache still goes stale
        assert_eq!(middle.theme().color_scheme, ColorScheme::Dark);
        assert!(middle.cache().is_empty());
    }

    #[test]
    fn test_nested_own_theme_shadows_outer() {
        let outer = ThemeProvider::default();
        let inner = outer.nested(
            Some(Theme::default().with_name("Inner")),
            OverrideRegistry::new(),
        );

        outer.set_theme(Theme::default().with_name("Outer"));

        assert_eq!(inner.theme().name, "Inner");
        assert_eq!(outer.theme().name, "Outer");
    }

    #[test]
    fn test_nested_cache_kept_without_outer_change() {
        let outer = ThemeProvider::default();
        let inner = outer.nested(None, OverrideRegistry::new());
        inner.cache().get_or_insert_with(&"k", || 1u8);

        let _ = inner.cx();
        let _ = outer.theme();

        assert_eq!(inner.cache().len(), 1);
        assert_eq!(inner.cache().revision(), 0);
    }

    #[test]
    fn test_provider_config() {
        let source = r#"
            preset = "teal"
            color_scheme = "dark"

            [components.Button.default_props]
            size = "md"
            radius = 12

            [components.Button.class_names]
            root = "app-button"

            [components.Button.styles.label]
            font-weight = "700"

            [components.Button.vars.root]
            "--button-height" = "50px"
        "#;

        let provider = ThemeProvider::from_toml(source).unwrap();
        let theme = provider.theme();
        assert_eq!(theme.primary_color, "teal");
        assert_eq!(theme.color_scheme, ColorScheme::Dark);

        let registry = provider.registry();
        let button = registry.lookup("Button").unwrap();
        assert_eq!(button.default_props.str("size"), Some("md"));
        assert_eq!(button.default_props.number("radius"), Some(12.0));
        assert_eq!(button.class_names.get("root").map(String::as_str), Some("app-button"));
        assert_eq!(
            button.styles.get("label").and_then(|s| s.get("font-weight")),
            Some("700")
        );

        let vars = button
            .vars
            .as_ref()
            .unwrap()
            .resolve(&theme, &Default::default());
        assert_eq!(vars.get("root", "--button-height"), Some("50px"));
    }

    #[test]
    fn test_provider_config_rejects_unknown_component_field() {
        let source = "[components.Button]\nclasses = {}";
        assert!(ProviderConfig::from_toml(source).is_err());
    }
}
