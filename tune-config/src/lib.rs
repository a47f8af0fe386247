//! Engine.ini preset resolution, UI value mapping and persistence.
//!
//! The crate is organised bottom-up:
//! - [`document`]: the ordered `section -> key -> value` model and its INI text form
//! - [`mapping`]: conversion between UI labels/values and engine keys/values
//! - [`catalog`] and [`preset`]: declarative presets and the lookup with fallback
//! - [`merge`]: layered merging (preset, then tweaks, then overrides)
//! - [`store`]: backup, atomic write and write protection of the file on disk
//! - [`cli`]: the `engine-tune` command line

pub mod catalog;
pub mod cli;
pub mod document;
pub mod mapping;
pub mod merge;
pub mod preset;
pub mod store;

pub use catalog::{Catalog, CatalogSource, GamePaths, GameVersion};
pub use document::{Section, SettingsDocument};
pub use mapping::{from_engine, to_engine, EngineSetting};
pub use merge::{merge, merge_layers, SettingsMerger};
pub use preset::{PresetResolver, DEFAULT_PRESET};
pub use store::{ConfigStore, BACKUP_SUFFIX, ENGINE_INI};
