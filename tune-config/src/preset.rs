//! Preset lookup with a fixed fallback.

use tracing::{debug, instrument, warn};

use crate::catalog::CatalogSource;
use crate::document::SettingsDocument;

/// Preset used when a requested name is not in the catalog.
pub const DEFAULT_PRESET: &str = "balanced";

/// Resolves preset names and the tweak overlay against a catalog.
pub struct PresetResolver<C> {
    catalog: C,
}

impl<C: CatalogSource> PresetResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.catalog.preset(name).is_some()
    }

    pub fn preset_names(&self) -> Vec<&str> {
        self.catalog.preset_names()
    }

    /// Settings for `name`.
    ///
    /// Unknown names resolve to [`DEFAULT_PRESET`] without an error; front
    /// ends only offer known names, so an unknown one is stale input rather
    /// than a user mistake.
    #[instrument(skip(self))]
    pub fn resolve_preset(&self, name: &str) -> SettingsDocument {
        if let Some(preset) = self.catalog.preset(name) {
            return preset.clone();
        }

        debug!(
            fallback = DEFAULT_PRESET,
            "Unknown preset, using default preset"
        );
        self.default_preset()
    }

    fn default_preset(&self) -> SettingsDocument {
        match self.catalog.preset(DEFAULT_PRESET) {
            Some(preset) => preset.clone(),
            None => {
                warn!(
                    preset = DEFAULT_PRESET,
                    "Catalog has no default preset; resolving to an empty document"
                );
                SettingsDocument::new()
            }
        }
    }

    /// The engine tweak overlay, or an empty document when none is configured.
    pub fn resolve_tweaks(&self) -> SettingsDocument {
        self.catalog.tweaks().cloned().unwrap_or_default()
    }
}
