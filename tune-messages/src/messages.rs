//! Central registry for all user-facing message templates.
//!
//! Templates use `{variable}` syntax for runtime values, which are
//! substituted by the `MessageBuilder` (see the `msg!` macro).

pub struct Messages {
    // ============================================================================
    // Backup Messages
    // ============================================================================
    pub backup_created: &'static str,
    pub backup_nothing_to_do: &'static str,

    // ============================================================================
    // Create / Apply Messages
    // ============================================================================
    pub config_created: &'static str,
    pub custom_applied: &'static str,
    pub custom_requires_setting: &'static str,
    pub options_applied: &'static str,
    pub options_none_applied: &'static str,
    pub preset_applied: &'static str,
    pub tweaks_applied: &'static str,

    // ============================================================================
    // Read-only Messages
    // ============================================================================
    pub readonly_disabled: &'static str,
    pub readonly_enabled: &'static str,
    pub readonly_hint: &'static str,

    // ============================================================================
    // Show Messages
    // ============================================================================
    pub show_header: &'static str,
    pub show_missing: &'static str,
    pub show_separator: &'static str,

    // ============================================================================
    // Preset Messages
    // ============================================================================
    pub presets_available: &'static str,
    pub presets_describe_header: &'static str,
    pub presets_describe_hint: &'static str,

    // ============================================================================
    // Error Messages
    // ============================================================================
    pub error_generic: &'static str,
    pub error_unknown_option: &'static str,
}

pub const MESSAGES: Messages = Messages {
    // Backup
    backup_created: "Backup created: {path}",
    backup_nothing_to_do: "No {name} found to backup",

    // Create / Apply
    config_created: "{name} created: {path}",
    custom_applied: "Custom settings applied to: {path}",
    custom_requires_setting: "--setting is required for the custom command",
    options_applied: "Applied {count} option(s) to: {path}",
    options_none_applied: "No recognised options given; nothing was changed",
    preset_applied: "Applied preset: {preset}",
    tweaks_applied: "Engine tweaks applied to: {path}",

    // Read-only
    readonly_disabled: "{name} write permissions restored",
    readonly_enabled: "{name} set to read-only",
    readonly_hint: "Run 'engine-tune readonly off' before changing a protected file",

    // Show
    show_header: "Current {name} configuration ({path}):",
    show_missing: "{name} does not exist",
    show_separator: "============================================================",

    // Presets
    presets_available: "Available presets:",
    presets_describe_header: "Preset '{preset}' in UI terms:",
    presets_describe_hint: "Apply with: engine-tune create --preset {preset}",

    // Errors
    error_generic: "Error: {error}",
    error_unknown_option: "Ignoring unknown option '{label}'",
};
