use crate::document::SettingsDocument;

/// Layered merge of settings documents, later layers taking precedence.
///
/// Merging works at `(section, key)` granularity: a later value replaces an
/// earlier one, missing sections are created, and nothing is ever removed.
pub struct SettingsMerger {
    base: SettingsDocument,
}

impl SettingsMerger {
    pub fn new(base: SettingsDocument) -> Self {
        Self { base }
    }

    /// Merge `overlay` on top of the accumulated document.
    pub fn merge(mut self, overlay: &SettingsDocument) -> Self {
        overlay_onto(&mut self.base, overlay);
        self
    }

    /// Merge several overlays in order.
    pub fn merge_all<'a, I>(self, overlays: I) -> Self
    where
        I: IntoIterator<Item = &'a SettingsDocument>,
    {
        overlays
            .into_iter()
            .fold(self, |merger, overlay| merger.merge(overlay))
    }

    pub fn finish(self) -> SettingsDocument {
        self.base
    }
}

fn overlay_onto(base: &mut SettingsDocument, overlay: &SettingsDocument) {
    for (name, entries) in overlay.sections() {
        let section = base.section_mut(name);
        for (key, value) in entries {
            section.insert(key.clone(), value.clone());
        }
    }
}

/// Merge documents left to right.
pub fn merge<'a, I>(documents: I) -> SettingsDocument
where
    I: IntoIterator<Item = &'a SettingsDocument>,
{
    SettingsMerger::new(SettingsDocument::new())
        .merge_all(documents)
        .finish()
}

/// Merge following the engine-tune precedence rules:
/// 1. Preset (base)
/// 2. Engine tweaks (if included)
/// 3. Custom overrides (highest priority)
pub fn merge_layers(
    preset: &SettingsDocument,
    tweaks: Option<&SettingsDocument>,
    overrides: Option<&SettingsDocument>,
) -> SettingsDocument {
    SettingsMerger::new(preset.clone())
        .merge_all(tweaks.into_iter().chain(overrides))
        .finish()
}
