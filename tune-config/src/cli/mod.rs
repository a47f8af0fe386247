use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::{Catalog, GameVersion};
use crate::preset::{PresetResolver, DEFAULT_PRESET};
use crate::store::ConfigStore;

mod commands;

/// Command-line arguments for engine-tune.
///
/// Manages the game's `Engine.ini`: creates it from quality presets, applies
/// individual settings on top, keeps a backup of the previous file, and can
/// write-protect it so the game does not overwrite the tuning.
#[derive(Parser)]
#[command(name = "engine-tune")]
#[command(about = "Engine.ini configuration tool for Clair Obscur: Expedition 33")]
#[command(version)]
pub struct Args {
    /// Directory containing Engine.ini (default: derived from --game-version)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Game edition used to locate the config directory (steam or gamepass)
    #[arg(long, global = true, default_value = "steam")]
    pub game_version: GameVersion,

    /// Preset catalog to use instead of the built-in one (YAML)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new Engine.ini from a preset
    Create {
        /// Performance preset to apply
        #[arg(long, default_value = DEFAULT_PRESET)]
        preset: String,

        /// Don't include additional engine tweaks
        #[arg(long)]
        no_tweaks: bool,

        /// Set Engine.ini as read-only after creation
        #[arg(long)]
        read_only: bool,
    },

    /// Show the current Engine.ini configuration
    Show {
        /// Output format
        #[arg(short = 'f', long, default_value = "ini")]
        format: OutputFormat,
    },

    /// Create a backup of the current Engine.ini
    Backup,

    /// Apply raw engine settings to one section, keeping everything else
    Custom {
        /// Config section name
        #[arg(long)]
        section: String,

        /// Setting as KEY VALUE (can be used multiple times)
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"], action = ArgAction::Append)]
        setting: Vec<String>,
    },

    /// Apply UI-level options such as "Bloom=High" or "Fog=Disabled"
    Set {
        /// Option as LABEL=VALUE (can be used multiple times)
        #[arg(long = "option", short = 'o', required = true)]
        options: Vec<String>,

        /// Also apply the engine tweaks
        #[arg(long)]
        tweaks: bool,
    },

    /// Apply the engine tweaks on top of the current file
    Tweaks,

    /// Set read-only status
    Readonly {
        /// Enable or disable read-only mode
        status: Toggle,
    },

    /// List presets, or show one in UI terms
    Presets {
        /// Preset to describe
        #[arg(long)]
        describe: Option<String>,
    },
}

/// Output format for `show`.
///
/// # Formats
/// - `Ini` - The file as the engine reads it (default)
/// - `Json` - Compact JSON, sections as objects
/// - `JsonPretty` - Pretty-printed JSON
#[derive(Clone, Debug)]
pub enum OutputFormat {
    Ini,
    Json,
    JsonPretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ini" => Ok(OutputFormat::Ini),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" => Ok(OutputFormat::JsonPretty),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl std::str::FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" => Ok(Toggle::On),
            "off" => Ok(Toggle::Off),
            _ => Err(format!("Expected 'on' or 'off', got '{}'", s)),
        }
    }
}

/// Store and resolver shared by every command.
pub struct Session {
    pub store: ConfigStore,
    pub resolver: PresetResolver<Catalog>,
}

impl Session {
    pub fn from_args(args: &Args) -> Result<Self> {
        let catalog = match &args.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::embedded().context("Built-in preset catalog is invalid")?,
        };

        let config_dir = match &args.config_path {
            Some(dir) => dir.clone(),
            None => {
                let relative = catalog
                    .paths()
                    .for_version(args.game_version)
                    .with_context(|| {
                        format!(
                            "Catalog has no config path for {:?}; pass --config-path",
                            args.game_version
                        )
                    })?;
                tune_core::user_paths::resolve_home_relative(relative)?
            }
        };

        tracing::debug!(config_dir = %config_dir.display(), "Resolved config directory");

        Ok(Self {
            store: ConfigStore::new(config_dir),
            resolver: PresetResolver::new(catalog),
        })
    }
}

/// Run the parsed command.
pub fn execute(args: Args) -> Result<()> {
    let session = Session::from_args(&args)?;

    match args.command {
        Command::Create {
            preset,
            no_tweaks,
            read_only,
        } => commands::create(&session, &preset, !no_tweaks, read_only),
        Command::Show { format } => commands::show(&session, &format),
        Command::Backup => commands::backup(&session),
        Command::Custom { section, setting } => commands::custom(&session, &section, &setting),
        Command::Set { options, tweaks } => commands::set(&session, &options, tweaks),
        Command::Tweaks => commands::tweaks(&session),
        Command::Readonly { status } => commands::readonly(&session, status == Toggle::On),
        Command::Presets { describe } => commands::presets(&session, describe.as_deref()),
    }
}
