//! Declarative preset and tweak catalog.
//!
//! The catalog is plain data: named presets (`{preset: {section: {key: value}}}`),
//! a single engine-tweaks fragment (`{section: {key: value}}`), and the
//! home-relative config directories for each game edition. A default catalog
//! is embedded in the binary; callers can load their own from YAML or build
//! one in code.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml_ng as serde_yaml;
use tracing::debug;
use tune_core::error::{Operation, Result, TuneError};

use crate::document::SettingsDocument;

const EMBEDDED_CATALOG: &str = include_str!("../configs/catalog.yaml");

/// Read-only lookup of presets and tweaks by name.
///
/// The preset resolver only depends on this trait so tests and front ends can
/// substitute their own data.
pub trait CatalogSource {
    fn preset(&self, name: &str) -> Option<&SettingsDocument>;

    fn tweaks(&self) -> Option<&SettingsDocument>;

    fn preset_names(&self) -> Vec<&str>;
}

/// Which edition of the game the config directory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameVersion {
    #[default]
    Steam,
    GamePass,
}

impl std::str::FromStr for GameVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "steam" => Ok(GameVersion::Steam),
            "gamepass" | "game-pass" => Ok(GameVersion::GamePass),
            _ => Err(format!("Unknown game version: {s} (expected steam or gamepass)")),
        }
    }
}

/// Home-relative configuration directories per game edition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GamePaths {
    #[serde(default, alias = "steam_path")]
    pub steam: Option<String>,
    #[serde(default, alias = "gamepass_path")]
    pub gamepass: Option<String>,
}

impl GamePaths {
    pub fn for_version(&self, version: GameVersion) -> Option<&str> {
        match version {
            GameVersion::Steam => self.steam.as_deref(),
            GameVersion::GamePass => self.gamepass.as_deref(),
        }
    }
}

/// Scalar as written in the catalog; rendered to the literal engine string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CatalogValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CatalogValue {
    fn into_engine_string(self) -> String {
        match self {
            CatalogValue::Bool(true) => "True".to_string(),
            CatalogValue::Bool(false) => "False".to_string(),
            CatalogValue::Int(n) => n.to_string(),
            // Keep "1.0" rather than Rust's "1" so whole floats stay floats in the file.
            CatalogValue::Float(x) if x.is_finite() && x.fract() == 0.0 => format!("{x:.1}"),
            CatalogValue::Float(x) => x.to_string(),
            CatalogValue::Text(s) => s,
        }
    }
}

type RawDocument = IndexMap<String, IndexMap<String, CatalogValue>>;

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    paths: GamePaths,
    #[serde(default)]
    presets: IndexMap<String, RawDocument>,
    #[serde(default)]
    engine_tweaks: Option<RawDocument>,
}

fn into_document(raw: RawDocument) -> SettingsDocument {
    raw.into_iter()
        .flat_map(|(section, entries)| {
            entries
                .into_iter()
                .map(move |(key, value)| (section.clone(), key, value.into_engine_string()))
        })
        .collect()
}

/// In-memory catalog, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    paths: GamePaths,
    presets: IndexMap<String, SettingsDocument>,
    engine_tweaks: Option<SettingsDocument>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = serde_yaml::from_str(content)?;
        let presets = raw
            .presets
            .into_iter()
            .map(|(name, doc)| (name, into_document(doc)))
            .collect();

        Ok(Self {
            paths: raw.paths,
            presets,
            engine_tweaks: raw.engine_tweaks.map(into_document),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| TuneError::io(path, Operation::Read, e))?;
        let catalog = Self::from_yaml_str(&content).map_err(|e| {
            TuneError::Catalog(format!("Failed to load catalog {}: {e}", path.display()))
        })?;
        debug!(
            path = %path.display(),
            presets = catalog.presets.len(),
            "Loaded preset catalog"
        );
        Ok(catalog)
    }

    pub fn with_preset(mut self, name: impl Into<String>, preset: SettingsDocument) -> Self {
        self.presets.insert(name.into(), preset);
        self
    }

    pub fn with_tweaks(mut self, tweaks: SettingsDocument) -> Self {
        self.engine_tweaks = Some(tweaks);
        self
    }

    pub fn paths(&self) -> &GamePaths {
        &self.paths
    }
}

impl CatalogSource for Catalog {
    fn preset(&self, name: &str) -> Option<&SettingsDocument> {
        self.presets.get(name)
    }

    fn tweaks(&self) -> Option<&SettingsDocument> {
        self.engine_tweaks.as_ref()
    }

    fn preset_names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }
}
