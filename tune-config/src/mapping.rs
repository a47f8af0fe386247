//! Conversion between UI values and engine setting strings.
//!
//! Every UI control is described once in [`CONTROLS`]: its label, the
//! `(section, key)` it writes, and how its value is encoded. The functions in
//! this module are pure; nothing here touches the filesystem.

use tune_core::error::{Result, TuneError};

use crate::document::SettingsDocument;

pub const SYSTEM_SETTINGS: &str = "SystemSettings";

pub const ENABLED: &str = "Enabled";
pub const DISABLED: &str = "Disabled";

/// How a boolean switch is spelled in the engine file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolEncoding {
    /// `1` / `0`
    OneZero,
    /// `True` / `False`
    TrueFalse,
}

impl BoolEncoding {
    pub fn encode(self, on: bool) -> &'static str {
        match (self, on) {
            (BoolEncoding::OneZero, true) => "1",
            (BoolEncoding::OneZero, false) => "0",
            (BoolEncoding::TrueFalse, true) => "True",
            (BoolEncoding::TrueFalse, false) => "False",
        }
    }

    pub fn decode(self, raw: &str) -> bool {
        let raw = raw.trim();
        match self {
            BoolEncoding::OneZero => raw != "0",
            BoolEncoding::TrueFalse => raw.eq_ignore_ascii_case("true"),
        }
    }
}

/// Switches whose engine value is a boolean word rather than `1`/`0`.
/// Every key not listed here uses [`BoolEncoding::OneZero`].
pub const BOOL_ENCODINGS: &[(&str, BoolEncoding)] = &[
    ("r.Fog", BoolEncoding::TrueFalse),
    ("r.VolumetricFog", BoolEncoding::TrueFalse),
];

pub fn bool_encoding(key: &str) -> BoolEncoding {
    BOOL_ENCODINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, encoding)| *encoding)
        .unwrap_or(BoolEncoding::OneZero)
}

/// One entry of an ordinal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub label: &'static str,
    pub ordinal: i64,
}

const fn level(label: &'static str, ordinal: i64) -> Level {
    Level { label, ordinal }
}

pub const QUALITY_LEVELS: &[Level] = &[
    level("Disabled", 0),
    level("Low", 1),
    level("Medium", 2),
    level("High", 3),
    level("Very High", 4),
    level("Ultra", 5),
];

pub const ANISOTROPY_LEVELS: &[Level] = &[
    level("Disabled", 0),
    level("2x", 2),
    level("4x", 4),
    level("8x", 8),
    level("16x", 16),
];

pub const SHADOW_LEVELS: &[Level] = &[
    level("Low", 1),
    level("Medium", 2),
    level("High", 3),
    level("Ultra", 5),
];

/// Pick the label for an engine ordinal: the highest level not above it,
/// or the lowest level when the ordinal is below the table.
/// Tables must be sorted by ordinal.
fn level_for_ordinal(levels: &'static [Level], ordinal: i64) -> &'static str {
    levels
        .iter()
        .rev()
        .find(|level| level.ordinal <= ordinal)
        .or_else(|| levels.first())
        .map(|level| level.label)
        .unwrap_or(DISABLED)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Dropdown backed by an ordinal table.
    Levels(&'static [Level]),
    /// On/off switch; spelling comes from [`bool_encoding`].
    Switch,
    /// Free-form decimal such as a distance scale.
    Decimal,
    /// Free-form integer.
    Integer,
    /// Passed through untouched.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub section: &'static str,
    pub key: &'static str,
    pub kind: ControlKind,
}

const fn control(label: &'static str, key: &'static str, kind: ControlKind) -> Control {
    Control {
        label,
        section: SYSTEM_SETTINGS,
        key,
        kind,
    }
}

pub const CONTROLS: &[Control] = &[
    control("Resolution", "r.ScreenPercentage", ControlKind::Text),
    control(
        "Anisotropic Filtering",
        "r.MaxAnisotropy",
        ControlKind::Levels(ANISOTROPY_LEVELS),
    ),
    control(
        "Depth of Field",
        "r.DepthOfFieldQuality",
        ControlKind::Levels(QUALITY_LEVELS),
    ),
    control("Bloom", "r.BloomQuality", ControlKind::Levels(QUALITY_LEVELS)),
    control(
        "Motion Blur",
        "r.MotionBlurQuality",
        ControlKind::Levels(QUALITY_LEVELS),
    ),
    control(
        "Lens Flares",
        "r.LensFlareQuality",
        ControlKind::Levels(QUALITY_LEVELS),
    ),
    control("Fog", "r.Fog", ControlKind::Switch),
    control("Volumetric Fog", "r.VolumetricFog", ControlKind::Switch),
    control(
        "Chromatic Aberration",
        "r.SceneColorFringeQuality",
        ControlKind::Switch,
    ),
    control(
        "Disable Distortion Effects",
        "r.DistortionEffects",
        ControlKind::Switch,
    ),
    control("Film Grain", "r.FilmGrain", ControlKind::Switch),
    control(
        "Shadow Quality",
        "r.ShadowQuality",
        ControlKind::Levels(SHADOW_LEVELS),
    ),
    control("Shadow Resolution", "r.Shadow.MaxResolution", ControlKind::Text),
    control("Tonemapper Quality", "r.Tonemapper.Quality", ControlKind::Integer),
    control(
        "Grain Quantization",
        "r.Tonemapper.GrainQuantization",
        ControlKind::Switch,
    ),
    control(
        "Sharpening Strength",
        "r.Tonemapper.Sharpen",
        ControlKind::Decimal,
    ),
    control("View Distance", "r.ViewDistanceScale", ControlKind::Decimal),
    control(
        "Shadow Distance",
        "r.Shadow.DistanceScale",
        ControlKind::Decimal,
    ),
    control(
        "Foliage Distance",
        "r.Foliage.LODDistanceScale",
        ControlKind::Decimal,
    ),
];

pub fn control_for_label(label: &str) -> Option<&'static Control> {
    CONTROLS.iter().find(|c| c.label == label)
}

pub fn control_for_key(key: &str) -> Option<&'static Control> {
    CONTROLS.iter().find(|c| c.key == key)
}

/// A UI value converted to its place and spelling in the engine file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSetting {
    pub section: &'static str,
    pub key: &'static str,
    pub value: String,
}

fn parse_switch(key: &str, ui_value: &str) -> Result<bool> {
    let word = ui_value.trim().to_ascii_lowercase();
    match word.as_str() {
        "enabled" | "on" | "true" | "yes" | "1" => Ok(true),
        "disabled" | "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(TuneError::conversion(
            key,
            ui_value,
            "expected Enabled or Disabled",
        )),
    }
}

fn parse_ordinal(key: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| TuneError::conversion(key, raw, "expected an integer level"))
}

fn checked_decimal(key: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(trimmed.to_string()),
        _ => Err(TuneError::conversion(key, raw, "expected a number")),
    }
}

fn checked_integer(key: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map(|_| trimmed.to_string())
        .map_err(|_| TuneError::conversion(key, raw, "expected an integer"))
}

/// Convert a UI control value to its engine setting.
///
/// Returns `Ok(None)` for labels that are not in [`CONTROLS`]; callers skip
/// those fields. Values that cannot be converted yield
/// [`TuneError::Conversion`] naming the engine key.
pub fn to_engine(label: &str, ui_value: &str) -> Result<Option<EngineSetting>> {
    let Some(control) = control_for_label(label) else {
        return Ok(None);
    };
    let key = control.key;

    let value = match control.kind {
        ControlKind::Levels(levels) => {
            match levels
                .iter()
                .find(|level| level.label.eq_ignore_ascii_case(ui_value.trim()))
            {
                Some(level) => level.ordinal.to_string(),
                // Raw ordinals are accepted as-is.
                None => parse_ordinal(key, ui_value)
                    .map_err(|_| {
                        let choices: Vec<&str> = levels.iter().map(|l| l.label).collect();
                        TuneError::conversion(
                            key,
                            ui_value,
                            format!("expected one of: {}", choices.join(", ")),
                        )
                    })?
                    .to_string(),
            }
        }
        ControlKind::Switch => bool_encoding(key)
            .encode(parse_switch(key, ui_value)?)
            .to_string(),
        ControlKind::Decimal => checked_decimal(key, ui_value)?,
        ControlKind::Integer => checked_integer(key, ui_value)?,
        ControlKind::Text => ui_value.to_string(),
    };

    Ok(Some(EngineSetting {
        section: control.section,
        key,
        value,
    }))
}

/// Convert an engine value back to what the UI displays.
///
/// Ordinals outside a table clamp to its nearest end (`"9"` → `Ultra`).
/// Keys without a control pass through unchanged.
pub fn from_engine(key: &str, engine_value: &str) -> Result<String> {
    let Some(control) = control_for_key(key) else {
        return Ok(engine_value.to_string());
    };

    match control.kind {
        ControlKind::Levels(levels) => {
            let ordinal = parse_ordinal(key, engine_value)?;
            Ok(level_for_ordinal(levels, ordinal).to_string())
        }
        ControlKind::Switch => {
            let on = bool_encoding(key).decode(engine_value);
            Ok(if on { ENABLED } else { DISABLED }.to_string())
        }
        ControlKind::Decimal => checked_decimal(key, engine_value),
        ControlKind::Integer => checked_integer(key, engine_value),
        ControlKind::Text => Ok(engine_value.to_string()),
    }
}

/// Assemble a custom-overrides document from `(label, ui_value)` pairs.
///
/// Unknown labels are skipped; the first conversion failure aborts.
pub fn build_overrides<I, L, V>(fields: I) -> Result<SettingsDocument>
where
    I: IntoIterator<Item = (L, V)>,
    L: AsRef<str>,
    V: AsRef<str>,
{
    let mut overrides = SettingsDocument::new();
    for (label, value) in fields {
        if let Some(setting) = to_engine(label.as_ref(), value.as_ref())? {
            overrides.set(setting.section, setting.key, setting.value);
        }
    }
    Ok(overrides)
}

/// Show a document in UI terms: `(label, ui_value)` for every control whose
/// key is present, in control order.
pub fn describe(document: &SettingsDocument) -> Result<Vec<(&'static str, String)>> {
    CONTROLS
        .iter()
        .filter_map(|control| {
            document
                .get(control.section, control.key)
                .map(|raw| from_engine(control.key, raw).map(|ui| (control.label, ui)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_value(label: &str, ui_value: &str) -> String {
        to_engine(label, ui_value)
            .unwrap()
            .unwrap_or_else(|| panic!("{label} should be a known control"))
            .value
    }

    #[test]
    fn test_quality_words_map_to_ordinals() {
        let expected = [
            ("Disabled", "0"),
            ("Low", "1"),
            ("Medium", "2"),
            ("High", "3"),
            ("Very High", "4"),
            ("Ultra", "5"),
        ];
        for (word, ordinal) in expected {
            assert_eq!(engine_value("Bloom", word), ordinal, "Bloom {word}");
        }
    }

    #[test]
    fn test_anisotropy_words_map_to_sample_counts() {
        let expected = [
            ("Disabled", "0"),
            ("2x", "2"),
            ("4x", "4"),
            ("8x", "8"),
            ("16x", "16"),
        ];
        for (word, samples) in expected {
            assert_eq!(engine_value("Anisotropic Filtering", word), samples);
        }
    }

    #[test]
    fn test_level_round_trip_for_every_table_entry() {
        for control in CONTROLS {
            if let ControlKind::Levels(levels) = control.kind {
                for level in levels {
                    let setting = to_engine(control.label, level.label).unwrap().unwrap();
                    assert_eq!(
                        from_engine(control.key, &setting.value).unwrap(),
                        level.label,
                        "{} / {}",
                        control.label,
                        level.label
                    );
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_ordinals_clamp() {
        assert_eq!(from_engine("r.BloomQuality", "99").unwrap(), "Ultra");
        assert_eq!(from_engine("r.DepthOfFieldQuality", "9").unwrap(), "Ultra");
        assert_eq!(from_engine("r.BloomQuality", "-3").unwrap(), "Disabled");
        assert_eq!(from_engine("r.MaxAnisotropy", "32").unwrap(), "16x");
        assert_eq!(from_engine("r.MaxAnisotropy", "3").unwrap(), "2x");
        assert_eq!(from_engine("r.ShadowQuality", "0").unwrap(), "Low");
        assert_eq!(from_engine("r.ShadowQuality", "4").unwrap(), "High");
    }

    #[test]
    fn test_fog_switches_use_boolean_words() {
        assert_eq!(engine_value("Fog", "Enabled"), "True");
        assert_eq!(engine_value("Fog", "Disabled"), "False");
        assert_eq!(engine_value("Volumetric Fog", "Enabled"), "True");
        assert_eq!(engine_value("Volumetric Fog", "Disabled"), "False");
    }

    #[test]
    fn test_other_switches_use_one_zero() {
        for label in [
            "Chromatic Aberration",
            "Disable Distortion Effects",
            "Film Grain",
            "Grain Quantization",
        ] {
            assert_eq!(engine_value(label, "Enabled"), "1", "{label}");
            assert_eq!(engine_value(label, "Disabled"), "0", "{label}");
        }
    }

    #[test]
    fn test_bool_encoding_table_is_the_only_special_case() {
        assert_eq!(bool_encoding("r.Fog"), BoolEncoding::TrueFalse);
        assert_eq!(bool_encoding("r.VolumetricFog"), BoolEncoding::TrueFalse);
        assert_eq!(bool_encoding("r.FilmGrain"), BoolEncoding::OneZero);
        assert_eq!(bool_encoding("r.fog"), BoolEncoding::OneZero);
    }

    #[test]
    fn test_switches_decode_per_key() {
        assert_eq!(from_engine("r.Fog", "True").unwrap(), ENABLED);
        assert_eq!(from_engine("r.Fog", "false").unwrap(), DISABLED);
        assert_eq!(from_engine("r.VolumetricFog", "1").unwrap(), DISABLED);
        assert_eq!(from_engine("r.FilmGrain", "1").unwrap(), ENABLED);
        assert_eq!(from_engine("r.FilmGrain", "0").unwrap(), DISABLED);
    }

    #[test]
    fn test_unknown_label_produces_nothing() {
        assert_eq!(to_engine("Ray Tracing", "Ultra").unwrap(), None);
    }

    #[test]
    fn test_unknown_key_passes_through() {
        assert_eq!(
            from_engine("r.Streaming.PoolSize", "3000").unwrap(),
            "3000"
        );
        assert_eq!(from_engine("r.Custom", "anything").unwrap(), "anything");
    }

    #[test]
    fn test_bad_decimal_names_the_key() {
        let err = to_engine("View Distance", "far").unwrap_err();
        match err {
            TuneError::Conversion { key, value, .. } => {
                assert_eq!(key, "r.ViewDistanceScale");
                assert_eq!(value, "far");
            }
            other => panic!("expected conversion error, got {other:?}"),
        }
        assert!(from_engine("r.ViewDistanceScale", "NaN").is_err());
    }

    #[test]
    fn test_bad_ordinal_from_engine_is_a_conversion_error() {
        let err = from_engine("r.BloomQuality", "high").unwrap_err();
        assert!(matches!(err, TuneError::Conversion { ref key, .. } if key == "r.BloomQuality"));
    }

    #[test]
    fn test_numbers_keep_their_spelling() {
        assert_eq!(engine_value("Foliage Distance", "2.50"), "2.50");
        assert_eq!(engine_value("Tonemapper Quality", " 5 "), "5");
        assert!(to_engine("Tonemapper Quality", "5.5").is_err());
        assert_eq!(engine_value("Bloom", "4"), "4");
        assert!(to_engine("Bloom", "Extreme").is_err());
    }

    #[test]
    fn test_unrecognised_switch_word_is_rejected() {
        assert!(to_engine("Film Grain", "maybe").is_err());
    }

    #[test]
    fn test_build_overrides_skips_unknown_labels() {
        let overrides = build_overrides([
            ("Bloom", "High"),
            ("Fog", "Disabled"),
            ("Palette", "dark"),
            ("View Distance", "2.75"),
        ])
        .unwrap();

        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.entry_count(), 3);
        assert_eq!(overrides.get(SYSTEM_SETTINGS, "r.BloomQuality"), Some("3"));
        assert_eq!(overrides.get(SYSTEM_SETTINGS, "r.Fog"), Some("False"));
        assert_eq!(
            overrides.get(SYSTEM_SETTINGS, "r.ViewDistanceScale"),
            Some("2.75")
        );
    }

    #[test]
    fn test_describe_lists_known_controls_in_order() {
        let mut doc = SettingsDocument::new();
        doc.set(SYSTEM_SETTINGS, "r.Fog", "True");
        doc.set(SYSTEM_SETTINGS, "r.MaxAnisotropy", "16");
        doc.set(SYSTEM_SETTINGS, "r.Streaming.PoolSize", "3000");

        let described = describe(&doc).unwrap();
        assert_eq!(
            described,
            vec![
                ("Anisotropic Filtering", "16x".to_string()),
                ("Fog", ENABLED.to_string()),
            ]
        );
    }

    #[test]
    fn test_control_labels_and_keys_are_unique() {
        for (i, a) in CONTROLS.iter().enumerate() {
            for b in &CONTROLS[i + 1..] {
                assert_ne!(a.label, b.label);
                assert_ne!(a.key, b.key);
            }
        }
    }
}
