//! Raw store: the section/key/value content of an INI file exactly as written.
//!
//! The store is the pre-validation view of a config file. Sections keep their
//! declaration order, and keys keep their order within each section. Nothing
//! here knows about schemas; lookups that miss return `None` rather than an
//! error so callers can decide whether absence matters.
//!
//! # Syntax
//!
//! - `[name]` opens a section. The name is the text between the brackets,
//!   case-sensitive and untrimmed. Anything after the closing `]` is ignored.
//! - `key = value` and `key: value` split at the first `=` or `:`. Both sides
//!   are trimmed. A `;` preceded by whitespace starts an inline comment.
//! - A bare `key` line is a value-less key.
//! - Lines whose first non-blank character is `#` or `;` are comments, even
//!   when indented; blank lines are skipped.
//! - A line starting with whitespace continues the previous key's value.
//! - A repeated section reopens the earlier one; a repeated key overwrites the
//!   earlier value in place.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::InifigError;

/// One `key[ = value]` line of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    /// `None` for a value-less key.
    pub value: Option<String>,
}

/// An ordered `[section]` of raw entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    name: String,
    entries: Vec<RawEntry>,
}

impl RawSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&RawEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, key: &str, value: Option<String>) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(RawEntry {
                key: key.to_string(),
                value,
            }),
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }
}

/// Ordered sections parsed from (or destined for) an INI file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStore {
    sections: Vec<RawSection>,
}

impl RawStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, InifigError> {
        let mut store = RawStore::new();
        // current section, and the key a continuation line extends
        let mut current: Option<usize> = None;
        let mut last_key: Option<String> = None;

        for (i, line) in content.lines().enumerate() {
            let lineno = i + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if line.starts_with(char::is_whitespace)
                && let (Some(idx), Some(key)) = (current, last_key.as_deref())
            {
                let section = &mut store.sections[idx];
                if let Some(entry) = section.entries.iter_mut().find(|e| e.key == key) {
                    entry.value = Some(match entry.value.take() {
                        Some(prev) => format!("{prev}\n{trimmed}"),
                        None => trimmed.to_string(),
                    });
                }
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = match rest.find(']') {
                    Some(end) if end > 0 => &rest[..end],
                    _ => {
                        return Err(InifigError::Parse {
                            path: path.to_path_buf(),
                            line: lineno,
                            reason: format!("malformed section header: {trimmed}"),
                        });
                    }
                };
                current = Some(store.section_index_or_insert(name));
                last_key = None;
                continue;
            }

            let Some(idx) = current else {
                return Err(InifigError::Parse {
                    path: path.to_path_buf(),
                    line: lineno,
                    reason: "option found before any section header".into(),
                });
            };

            let (key, value) = split_entry(trimmed);
            if key.is_empty() {
                return Err(InifigError::Parse {
                    path: path.to_path_buf(),
                    line: lineno,
                    reason: format!("empty option name: {trimmed}"),
                });
            }
            store.sections[idx].set(key, value);
            last_key = Some(key.to_string());
        }

        Ok(store)
    }

    pub fn sections(&self) -> &[RawSection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Set `key` in `section`, creating the section at the end if needed.
    pub fn set(&mut self, section: &str, key: &str, value: Option<String>) {
        let idx = self.section_index_or_insert(section);
        self.sections[idx].set(key, value);
    }

    /// Remove `key` from `section`. Returns whether anything was removed.
    pub fn remove(&mut self, section: &str, key: &str) -> bool {
        self.sections
            .iter_mut()
            .find(|s| s.name == section)
            .is_some_and(|s| s.remove(key))
    }

    /// Render the store as INI text.
    ///
    /// Multi-line values are written as indented continuation lines so that
    /// [`parse`](Self::parse) reads them back unchanged.
    pub fn to_ini_string(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            let _ = writeln!(out, "[{}]", section.name);
            for entry in &section.entries {
                match &entry.value {
                    Some(v) => {
                        let _ = writeln!(out, "{} = {}", entry.key, v.replace('\n', "\n\t"));
                    }
                    None => {
                        let _ = writeln!(out, "{}", entry.key);
                    }
                }
            }
            out.push('\n');
        }
        out
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(RawSection::new(name));
                self.sections.len() - 1
            }
        }
    }
}

/// Split a trimmed entry line into key and optional value.
fn split_entry(line: &str) -> (&str, Option<String>) {
    let Some(pos) = line.find(['=', ':']) else {
        return (line, None);
    };
    let key = line[..pos].trim_end();
    let mut value = line[pos + 1..].trim();

    if let Some(semi) = value.find(';')
        && semi > 0
        && value[..semi].ends_with(char::is_whitespace)
    {
        value = value[..semi].trim_end();
    }
    if value == "\"\"" {
        value = "";
    }
    (key, Some(value.to_string()))
}
