//! Config operations: validation, listing, key lookup, and result types.
//!
//! Provides the logic behind `config check`, `config list`, `config get`, and
//! `config set`, plus the `ConfigResult` enum that callers use to display
//! results. Keys are dotted `section.option` (or `section.key` for dict
//! sections); the section part may itself contain dots.

use std::fmt;
use std::path::PathBuf;

use crate::bound::{BoundConfig, BoundSection, BoundValue};
use crate::error::InifigError;
use crate::persist;
use crate::schema::SectionKind;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// The file bound cleanly against the schema.
    Valid { path: PathBuf, sections: usize },
    /// All bound key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// A key's bound value and, when it can be found, the line that set it.
    KeyValue {
        key: String,
        value: String,
        line: Option<usize>,
    },
    /// Confirmation that a value was persisted.
    ValueSet { key: String, value: String },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Valid { path, sections } => {
                write!(f, "{} is valid ({sections} sections)", path.display())
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::KeyValue { key, value, line } => {
                if let Some(line) = line {
                    writeln!(f, "# line {line}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::ValueSet { key, value } => write!(f, "Set {key} = {value}"),
        }
    }
}

/// Summarize a successfully bound config.
pub fn check(config: &BoundConfig) -> ConfigResult {
    ConfigResult::Valid {
        path: config.path().to_path_buf(),
        sections: config
            .sections()
            .iter()
            .filter(|(_, s)| !s.is_absent())
            .count(),
    }
}

/// List every declared option and every dict pair as dotted key-value pairs.
///
/// Options of absent sections are listed as `<not set>`; absent dict sections
/// contribute nothing.
pub fn list_values(config: &BoundConfig) -> ConfigResult {
    let mut entries = Vec::new();

    for decl in config.schema().sections() {
        let name = decl.name();
        match config.section(name) {
            Some(BoundSection::Fixed(values)) => {
                for (option, value) in values {
                    entries.push((format!("{name}.{option}"), format_value(value)));
                }
            }
            Some(BoundSection::Dict(pairs)) => {
                for (key, value) in pairs {
                    entries.push((format!("{name}.{key}"), value.clone()));
                }
            }
            Some(BoundSection::Absent) | None => {
                for option in decl.options() {
                    entries.push((
                        format!("{name}.{}", option.name()),
                        format_value(&BoundValue::Absent),
                    ));
                }
            }
        }
    }

    ConfigResult::Listing { entries }
}

/// Get a bound value by dotted key, with its best-effort line number.
pub fn get_value(config: &BoundConfig, key: &str) -> Result<ConfigResult, InifigError> {
    let (section, option) = split_key(config, key)?;

    let value = match config.section(section) {
        Some(BoundSection::Fixed(_)) => config.get(section, option).map(format_value),
        Some(BoundSection::Dict(pairs)) => pairs
            .iter()
            .find(|(k, _)| k == option)
            .map(|(_, v)| v.clone()),
        Some(BoundSection::Absent) => config
            .schema()
            .get_option(section, option)
            .map(|_| format_value(&BoundValue::Absent)),
        None => None,
    }
    .ok_or_else(|| InifigError::KeyNotFound(key.into()))?;

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value,
        line: config.line_number(section, option),
    })
}

/// Coerce and bind a new value, then write the config back to its own file.
pub fn set_value(
    config: &mut BoundConfig,
    key: &str,
    value: &str,
) -> Result<ConfigResult, InifigError> {
    let (section, option) = split_key(config, key)?;
    config.set(section, option, value)?;
    let path = config.path().to_path_buf();
    persist::write(config, &path)?;

    Ok(ConfigResult::ValueSet {
        key: key.into(),
        value: value.into(),
    })
}

/// Split `section.option` against the declared section names.
///
/// The longest declared section name followed by `.` wins, so sections with
/// dots in their names resolve correctly.
fn split_key<'a>(config: &BoundConfig, key: &'a str) -> Result<(&'a str, &'a str), InifigError> {
    config
        .schema()
        .sections()
        .iter()
        .filter_map(|decl| {
            let rest = key.strip_prefix(decl.name())?.strip_prefix('.')?;
            let fits = match decl.kind() {
                SectionKind::Fixed => decl.get_option(rest).is_some(),
                SectionKind::Dict => !rest.is_empty(),
            };
            fits.then(|| (&key[..decl.name().len()], rest))
        })
        .max_by_key(|(section, _)| section.len())
        .ok_or_else(|| InifigError::KeyNotFound(key.into()))
}

/// Format a bound value for display.
pub fn format_value(value: &BoundValue) -> String {
    match value {
        BoundValue::Absent => "<not set>".to_string(),
        BoundValue::Plain(s) => s.clone(),
        BoundValue::FilePath(p) => p.display().to_string(),
        BoundValue::List(items) => items.join(", "),
    }
}
