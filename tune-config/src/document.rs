//! In-memory form of an INI settings file.
//!
//! Section names and keys are case-sensitive and keep their insertion
//! order; the engine reading the file treats `r.Fog` and `r.fog` as
//! different settings.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use indexmap::IndexMap;
use ini::{Ini, ParseOption};
use serde::{Deserialize, Serialize};
use tune_core::error::{Result, TuneError};

/// Ordered key → value mapping of one `[section]`.
pub type Section = IndexMap<String, String>;

/// Ordered collection of sections, each mapping keys to literal string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsDocument {
    sections: IndexMap<String, Section>,
}

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, section)| (name.as_str(), section))
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Get a section for writing, creating it (at the end) on first use.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Set a value, creating the section if needed. Returns the previous value.
    pub fn set(
        &mut self,
        section: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.section_mut(section).insert(key.into(), value.into())
    }

    /// Total number of key/value pairs across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.values().map(IndexMap::len).sum()
    }

    /// Parse INI text. `source` is only used for error reporting.
    ///
    /// Quotes and backslashes are kept literally. Keys outside any section
    /// and keys repeated within one section are rejected so that a rewrite
    /// never silently drops content. Repeated section headers are folded
    /// into the first occurrence, and a key may appear under only one of them.
    pub fn from_ini_str(text: &str, source: &Path) -> Result<Self> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options)
            .map_err(|e| TuneError::format(source, e.to_string()))?;

        let mut document = SettingsDocument::new();
        for (name, properties) in ini.iter() {
            let Some(name) = name else {
                if let Some((key, _)) = properties.iter().next() {
                    return Err(TuneError::format(
                        source,
                        format!("key '{key}' appears before any section header"),
                    ));
                }
                continue;
            };

            // Keys already folded in from an earlier header count as duplicates.
            let section = document.section_mut(name);
            for (key, value) in properties.iter() {
                if section.contains_key(key) {
                    return Err(TuneError::format(
                        source,
                        format!("duplicate key '{key}' in section [{name}]"),
                    ));
                }
                section.insert(key.to_string(), value.to_string());
            }
        }

        Ok(document)
    }

    /// Serialize as INI text: `[section]` headers and `key=value` lines,
    /// with a blank line between sections.
    pub fn to_ini_string(&self) -> String {
        self.to_string()
    }

    /// Check that every name and value survives a write and re-read
    /// unchanged. `target` is only used for error reporting.
    pub fn validate(&self, target: &Path) -> Result<()> {
        for (name, section) in &self.sections {
            if let Some(problem) = section_name_problem(name) {
                return Err(TuneError::format(
                    target,
                    format!("section name [{name}] {problem}"),
                ));
            }
            for (key, value) in section {
                if let Some(problem) = key_problem(key) {
                    return Err(TuneError::format(
                        target,
                        format!("key '{key}' in section [{name}] {problem}"),
                    ));
                }
                if let Some(problem) = value_problem(value) {
                    return Err(TuneError::format(
                        target,
                        format!("value of '{key}' in section [{name}] {problem}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

fn has_outer_whitespace(text: &str) -> bool {
    text.trim() != text
}

fn section_name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("is empty")
    } else if has_line_break(name) {
        Some("contains a line break")
    } else if name.contains(['[', ']']) {
        Some("contains a bracket")
    } else if has_outer_whitespace(name) {
        Some("has leading or trailing whitespace")
    } else {
        None
    }
}

fn key_problem(key: &str) -> Option<&'static str> {
    if key.is_empty() {
        Some("is empty")
    } else if has_line_break(key) {
        Some("contains a line break")
    } else if key.contains(['=', ':']) {
        Some("contains '=' or ':'")
    } else if key.starts_with([';', '#', '[']) {
        Some("would be read as a comment or section header")
    } else if has_outer_whitespace(key) {
        Some("has leading or trailing whitespace")
    } else {
        None
    }
}

fn value_problem(value: &str) -> Option<&'static str> {
    if has_line_break(value) {
        Some("contains a line break")
    } else if has_outer_whitespace(value) {
        Some("has leading or trailing whitespace")
    } else {
        None
    }
}

impl Display for SettingsDocument {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (index, (name, section)) in self.sections.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{name}]")?;
            for (key, value) in section {
                writeln!(f, "{key}={value}")?;
            }
        }
        Ok(())
    }
}

impl<S, K, V> FromIterator<(S, K, V)> for SettingsDocument
where
    S: AsRef<str>,
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, K, V)>>(iter: I) -> Self {
        let mut document = SettingsDocument::new();
        for (section, key, value) in iter {
            document.set(section.as_ref(), key, value);
        }
        document
    }
}

impl From<IndexMap<String, Section>> for SettingsDocument {
    fn from(sections: IndexMap<String, Section>) -> Self {
        Self { sections }
    }
}
