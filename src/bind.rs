//! The binding pipeline: validate a raw store against a schema and coerce values.
//!
//! [`bind`] works on an already-parsed store; the only I/O it performs is the
//! existence check for `FilePath` options. [`load`] adds reading and parsing.
//! Steps:
//!
//! 1. Every required section must be in the store, checked before any option
//! 2. Optional sections missing from the store bind to [`BoundSection::Absent`]
//! 3. Dict sections bind to their raw pairs verbatim
//! 4. Fixed sections: every required option must be present
//! 5. Optional options missing from the section bind to [`BoundValue::Absent`]
//! 6. Present options are coerced per their [`ValueKind`], in declaration order
//!
//! The first violation aborts the whole operation.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::bound::{BoundConfig, BoundSection, BoundValue};
use crate::error::InifigError;
use crate::file;
use crate::locate::SourceLines;
use crate::schema::{OptionDecl, Schema, SectionDecl, SectionKind, ValueKind};
use crate::store::{RawSection, RawStore};

/// Read, parse, and bind the config file at `path`.
///
/// Relative paths are made absolute against the current directory first, so
/// every `FilePath` value in the result is absolute.
pub fn load(schema: &Schema, path: &Path) -> Result<BoundConfig, InifigError> {
    let path = std::path::absolute(path).map_err(|e| InifigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let content = file::read_config(&path)?;
    let store = RawStore::parse(&content, &path)?;
    let source = SourceLines::new(&content);

    let config = bind(schema, store, source, &path)?;
    info!(
        path = %path.display(),
        sections = config.sections().len(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Bind a parsed store to `schema`. `path` is the file the store came from.
pub fn bind(
    schema: &Schema,
    store: RawStore,
    source: SourceLines,
    path: &Path,
) -> Result<BoundConfig, InifigError> {
    check_required_sections(schema, &store, path)?;

    let base_dir = config_dir(path);
    let mut sections = Vec::with_capacity(schema.sections().len());

    for decl in schema.sections() {
        let bound = match store.section(decl.name()) {
            None => {
                debug!(section = %decl.name(), "Optional section absent");
                BoundSection::Absent
            }
            Some(raw) => match decl.kind() {
                SectionKind::Dict => BoundSection::Dict(
                    raw.entries()
                        .iter()
                        .map(|e| (e.key.clone(), e.value.clone().unwrap_or_default()))
                        .collect(),
                ),
                SectionKind::Fixed => bind_fixed(decl, raw, &base_dir, path)?,
            },
        };
        sections.push((decl.name().to_string(), bound));
    }

    Ok(BoundConfig::new(
        path.to_path_buf(),
        schema.clone(),
        store,
        source,
        sections,
    ))
}

fn check_required_sections(
    schema: &Schema,
    store: &RawStore,
    path: &Path,
) -> Result<(), InifigError> {
    match schema
        .sections()
        .iter()
        .find(|s| s.is_required() && !store.has_section(s.name()))
    {
        Some(missing) => Err(InifigError::MissingSection {
            section: missing.name().to_string(),
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

fn bind_fixed(
    decl: &SectionDecl,
    raw: &RawSection,
    base_dir: &Path,
    path: &Path,
) -> Result<BoundSection, InifigError> {
    if let Some(missing) = decl
        .options()
        .iter()
        .find(|o| o.is_required() && !raw.has_option(o.name()))
    {
        return Err(InifigError::MissingOption {
            section: decl.name().to_string(),
            option: missing.name().to_string(),
            path: path.to_path_buf(),
        });
    }

    let mut values = Vec::with_capacity(decl.options().len());
    for option in decl.options() {
        let value = match raw.get(option.name()) {
            None => {
                debug!(section = %decl.name(), option = %option.name(), "Optional option absent");
                BoundValue::Absent
            }
            // Value-less keys coerce from the empty string.
            Some(entry) => coerce(
                option,
                decl.name(),
                entry.value.as_deref().unwrap_or_default(),
                base_dir,
            )?,
        };
        values.push((option.name().to_string(), value));
    }
    Ok(BoundSection::Fixed(values))
}

/// Coerce a raw string per the option's declared kind.
pub(crate) fn coerce(
    option: &OptionDecl,
    section: &str,
    raw: &str,
    base_dir: &Path,
) -> Result<BoundValue, InifigError> {
    match option.kind() {
        ValueKind::Plain => Ok(BoundValue::Plain(raw.to_string())),
        ValueKind::FilePath => {
            let resolved = normalize_path(&base_dir.join(raw));
            match resolved.try_exists() {
                Ok(true) => {}
                Ok(false) => {
                    return Err(InifigError::FileNotFound {
                        path: resolved,
                        section: section.to_string(),
                        option: option.name().to_string(),
                    });
                }
                Err(e) => {
                    return Err(InifigError::Io {
                        path: resolved,
                        source: e,
                    });
                }
            }
            debug!(
                section = %section,
                option = %option.name(),
                path = %resolved.display(),
                "Resolved file path"
            );
            Ok(BoundValue::FilePath(resolved))
        }
        ValueKind::List => Ok(BoundValue::List(split_list(raw))),
    }
}

/// Split on `,` and strip leading spaces from each piece.
///
/// Trailing spaces and empty pieces are kept: `"a,b,"` is `["a", "b", ""]`.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|piece| piece.trim_start_matches(' ').to_string())
        .collect()
}

/// The directory relative `FilePath` values are resolved against.
pub(crate) fn config_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Collapse `.` and `..` segments without touching the filesystem.
///
/// `..` at the root stays at the root; leading `..` of a relative path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
