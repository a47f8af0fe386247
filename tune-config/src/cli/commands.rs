// Command handlers for engine-tune

use anyhow::{bail, Context, Result};
use tracing::debug;

use tune_core::{tune_println, tune_success, tune_warning};
use tune_messages::{msg, MESSAGES};

use super::{OutputFormat, Session};
use crate::document::SettingsDocument;
use crate::mapping::{build_overrides, control_for_label, describe};
use crate::preset::DEFAULT_PRESET;
use crate::store::ENGINE_INI;

fn report_backup(backup: Option<std::path::PathBuf>) {
    if let Some(path) = backup {
        tune_success!("{}", msg!(MESSAGES.backup_created, path = path.display().to_string()));
    }
}

pub fn create(session: &Session, preset: &str, include_tweaks: bool, read_only: bool) -> Result<()> {
    let applied = if session.resolver.is_known(preset) {
        preset
    } else {
        tune_warning!("Unknown preset '{}', using '{}'", preset, DEFAULT_PRESET);
        DEFAULT_PRESET
    };

    let backup = session
        .store
        .create(&session.resolver, preset, include_tweaks)?;
    report_backup(backup);

    tune_success!(
        "{}",
        msg!(
            MESSAGES.config_created,
            name = ENGINE_INI,
            path = session.store.path().display().to_string()
        )
    );
    tune_success!("{}", msg!(MESSAGES.preset_applied, preset = applied));

    if read_only {
        session.store.set_read_only(true)?;
        tune_success!("{}", msg!(MESSAGES.readonly_enabled, name = ENGINE_INI));
    }
    Ok(())
}

pub fn show(session: &Session, format: &OutputFormat) -> Result<()> {
    if !session.store.exists() {
        tune_warning!("{}", msg!(MESSAGES.show_missing, name = ENGINE_INI));
        return Ok(());
    }

    match format {
        OutputFormat::Ini => {
            let rendered = session.store.render()?.unwrap_or_default();
            tune_println!(
                "{}",
                msg!(
                    MESSAGES.show_header,
                    name = ENGINE_INI,
                    path = session.store.path().display().to_string()
                )
            );
            tune_println!("{}", MESSAGES.show_separator);
            tune_println!("{}", rendered.trim_end());
        }
        OutputFormat::Json => {
            let document = session.store.read()?;
            tune_println!("{}", serde_json::to_string(&document)?);
        }
        OutputFormat::JsonPretty => {
            let document = session.store.read()?;
            tune_println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}

pub fn backup(session: &Session) -> Result<()> {
    match session.store.backup()? {
        Some(path) => report_backup(Some(path)),
        None => tune_warning!("{}", msg!(MESSAGES.backup_nothing_to_do, name = ENGINE_INI)),
    }
    Ok(())
}

pub fn custom(session: &Session, section: &str, setting: &[String]) -> Result<()> {
    if setting.is_empty() {
        bail!(MESSAGES.custom_requires_setting);
    }

    let mut overlay = SettingsDocument::new();
    for pair in setting.chunks(2) {
        let [key, value] = pair else {
            bail!("--setting expects a KEY and a VALUE");
        };
        overlay.set(section, key.as_str(), value.as_str());
    }
    debug!(section, entries = overlay.entry_count(), "Applying custom settings");

    report_backup(session.store.apply_overlay(&overlay)?);
    tune_success!(
        "{}",
        msg!(
            MESSAGES.custom_applied,
            path = session.store.path().display().to_string()
        )
    );
    Ok(())
}

fn parse_option(option: &str) -> Result<(&str, &str)> {
    option
        .split_once('=')
        .map(|(label, value)| (label.trim(), value.trim()))
        .with_context(|| format!("Invalid option '{option}', expected LABEL=VALUE"))
}

pub fn set(session: &Session, options: &[String], tweaks: bool) -> Result<()> {
    let mut fields = Vec::with_capacity(options.len());
    for option in options {
        let (label, value) = parse_option(option)?;
        if control_for_label(label).is_none() {
            tune_warning!("{}", msg!(MESSAGES.error_unknown_option, label = label));
            continue;
        }
        fields.push((label, value));
    }
    if fields.is_empty() && !tweaks {
        tune_warning!("{}", MESSAGES.options_none_applied);
        return Ok(());
    }

    let overrides = build_overrides(fields.iter().copied())?;
    let overlay = if tweaks {
        crate::merge::merge([&session.resolver.resolve_tweaks(), &overrides])
    } else {
        overrides
    };

    report_backup(session.store.apply_overlay(&overlay)?);
    tune_success!(
        "{}",
        msg!(
            MESSAGES.options_applied,
            count = fields.len().to_string(),
            path = session.store.path().display().to_string()
        )
    );
    Ok(())
}

pub fn tweaks(session: &Session) -> Result<()> {
    let tweaks = session.resolver.resolve_tweaks();
    report_backup(session.store.apply_overlay(&tweaks)?);
    tune_success!(
        "{}",
        msg!(
            MESSAGES.tweaks_applied,
            path = session.store.path().display().to_string()
        )
    );
    Ok(())
}

pub fn readonly(session: &Session, on: bool) -> Result<()> {
    if !session.store.exists() {
        tune_warning!("{}", msg!(MESSAGES.show_missing, name = ENGINE_INI));
        return Ok(());
    }

    session.store.set_read_only(on)?;
    let template = if on {
        MESSAGES.readonly_enabled
    } else {
        MESSAGES.readonly_disabled
    };
    tune_success!("{}", msg!(template, name = ENGINE_INI));
    Ok(())
}

pub fn presets(session: &Session, name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        tune_println!("{}", MESSAGES.presets_available);
        for preset in session.resolver.preset_names() {
            tune_println!("  {}", preset);
        }
        return Ok(());
    };

    if !session.resolver.is_known(name) {
        bail!(
            "Unknown preset '{}'. Available: {}",
            name,
            session.resolver.preset_names().join(", ")
        );
    }

    let document = session.resolver.resolve_preset(name);
    tune_println!("{}", msg!(MESSAGES.presets_describe_header, preset = name));
    for (label, value) in describe(&document)? {
        tune_println!("  {:<22} {}", label, value);
    }
    tune_println!("{}", msg!(MESSAGES.presets_describe_hint, preset = name));
    Ok(())
}
