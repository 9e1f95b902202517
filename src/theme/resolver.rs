use super::presets::builtin_presets;
use super::{PartialTheme, ResolvedTheme, ThemeOverride};
use core::iter;
use std::collections::BTreeMap;

const LOG_TARGET: &str = "     theme";

/// Merges request overrides, a named preset and the built-in defaults into one theme.
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    presets: BTreeMap<String, PartialTheme>,
}

impl Default for ThemeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeResolver {
    /// A resolver that knows only the built-in presets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            presets: builtin_presets(),
        }
    }

    /// A resolver with additional presets. Custom presets replace built-ins with the same key.
    #[must_use]
    pub fn with_presets(custom: impl IntoIterator<Item = (String, PartialTheme)>) -> Self {
        let mut resolver = Self::new();
        for (key, theme) in custom {
            let _ = resolver.presets.insert(normalize_key(&key), theme);
        }
        resolver
    }

    /// Look up a preset. Keys are matched case-insensitively, ignoring surrounding whitespace.
    #[must_use]
    pub fn preset(&self, key: &str) -> Option<&PartialTheme> {
        self.presets.get(&normalize_key(key))
    }

    /// All known preset keys in sorted order.
    pub fn preset_keys(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Produce a fully populated theme.
    ///
    /// Each field comes from `overrides` if set there, else from the preset named by
    /// `preset_key` if that preset exists and sets it, else from [`ResolvedTheme::default`].
    /// An unknown preset key is not an error; it simply contributes nothing.
    #[must_use]
    pub fn resolve(&self, preset_key: Option<&str>, overrides: &ThemeOverride) -> ResolvedTheme {
        let preset = preset_key.and_then(|key| {
            let preset = self.preset(key);
            if preset.is_none() {
                log::debug!(target: LOG_TARGET, "Unknown theme preset '{key}', using defaults");
            }
            preset
        });

        let layers: Vec<&PartialTheme> = iter::once(overrides).chain(preset).collect();
        ResolvedTheme::from_layers(&layers, ResolvedTheme::default())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
