//! Config persistence: write bound values back to an INI file.
//!
//! The bound values are flattened onto a copy of the raw store the config was
//! loaded from, so sections and keys the schema never declared survive the
//! write. Comments and formatting of the original file do not. Creates parent
//! directories as needed.

use std::path::Path;

use tracing::info;

use crate::bound::{BoundConfig, BoundSection};
use crate::error::InifigError;
use crate::store::RawStore;

/// Pure function: flatten the bound values into a raw store.
///
/// - Absent sections are left as the store has them (they are not in it).
/// - Fixed options are written as [`BoundValue::to_raw`](crate::BoundValue::to_raw)
///   renders them; absent options are removed.
/// - Dict pairs are written verbatim.
///
/// Entries whose raw text already matches are left untouched, so a value-less
/// key stays value-less.
pub fn flatten(config: &BoundConfig) -> RawStore {
    let mut store = config.store().clone();

    for (name, section) in config.sections() {
        match section {
            BoundSection::Absent => {}
            BoundSection::Fixed(values) => {
                for (option, value) in values {
                    match value.to_raw() {
                        Some(raw) => set_if_changed(&mut store, name, option, raw),
                        None => {
                            store.remove(name, option);
                        }
                    }
                }
            }
            BoundSection::Dict(pairs) => {
                for (key, value) in pairs {
                    set_if_changed(&mut store, name, key, value.clone());
                }
            }
        }
    }
    store
}

fn set_if_changed(store: &mut RawStore, section: &str, key: &str, raw: String) {
    let current = store
        .section(section)
        .and_then(|s| s.get(key))
        .map(|e| e.value.as_deref().unwrap_or_default());
    if current != Some(raw.as_str()) {
        store.set(section, key, Some(raw));
    }
}

/// I/O wrapper: flatten `config` and write it to `path`, replacing any existing file.
/// Creates parent directories if needed.
pub fn write(config: &BoundConfig, path: &Path) -> Result<(), InifigError> {
    let content = flatten(config).to_ini_string();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| InifigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, &content).map_err(|e| InifigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), "Wrote configuration");
    Ok(())
}
