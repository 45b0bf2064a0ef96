//! The bound configuration: a schema populated with validated values.
//!
//! A [`BoundConfig`] is produced by one load operation and owns everything that
//! load saw: the schema it was bound against, the raw store, and the source
//! lines used for line-number lookups. Values are keyed by the same section
//! and option names the schema declares.

use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::bind;
use crate::error::InifigError;
use crate::locate::SourceLines;
use crate::schema::Schema;
use crate::store::RawStore;

/// A single option's bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// Not set in the file, and not required.
    Absent,
    Plain(String),
    /// Resolved against the config directory, normalized, and known to exist.
    FilePath(PathBuf),
    List(Vec<String>),
}

impl BoundValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, BoundValue::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BoundValue::Plain(s) => Some(s),
            BoundValue::FilePath(p) => p.to_str(),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            BoundValue::FilePath(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            BoundValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// The string this value is written back as. `None` for [`Absent`](Self::Absent).
    pub fn to_raw(&self) -> Option<String> {
        match self {
            BoundValue::Absent => None,
            BoundValue::Plain(s) => Some(s.clone()),
            BoundValue::FilePath(p) => Some(p.display().to_string()),
            BoundValue::List(items) => Some(items.join(", ")),
        }
    }
}

impl Serialize for BoundValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BoundValue::Absent => serializer.serialize_none(),
            BoundValue::Plain(s) => serializer.serialize_str(s),
            BoundValue::FilePath(p) => serializer.collect_str(&p.display()),
            BoundValue::List(items) => items.serialize(serializer),
        }
    }
}

/// A section's bound content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundSection {
    /// Not present in the file, and not required.
    Absent,
    /// One value per declared option, in declaration order.
    Fixed(Vec<(String, BoundValue)>),
    /// The section's raw pairs, verbatim and in file order.
    Dict(Vec<(String, String)>),
}

impl BoundSection {
    pub fn is_absent(&self) -> bool {
        matches!(self, BoundSection::Absent)
    }

    /// Value of a declared option. `None` for dict and absent sections.
    pub fn get(&self, option: &str) -> Option<&BoundValue> {
        match self {
            BoundSection::Fixed(values) => values.iter().find(|(k, _)| k == option).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&[(String, String)]> {
        match self {
            BoundSection::Dict(pairs) => Some(pairs),
            _ => None,
        }
    }
}

impl Serialize for BoundSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BoundSection::Absent => serializer.serialize_none(),
            BoundSection::Fixed(values) => {
                let mut map = serializer.serialize_map(Some(values.len()))?;
                for (k, v) in values {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            BoundSection::Dict(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// A schema bound to one config file.
#[derive(Debug, Clone)]
pub struct BoundConfig {
    path: PathBuf,
    schema: Schema,
    store: RawStore,
    source: SourceLines,
    sections: Vec<(String, BoundSection)>,
}

impl BoundConfig {
    pub(crate) fn new(
        path: PathBuf,
        schema: Schema,
        store: RawStore,
        source: SourceLines,
        sections: Vec<(String, BoundSection)>,
    ) -> Self {
        Self {
            path,
            schema,
            store,
            source,
            sections,
        }
    }

    /// Path of the file this configuration was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The raw store as parsed, before any bound values were written back.
    pub fn store(&self) -> &RawStore {
        &self.store
    }

    pub fn source(&self) -> &SourceLines {
        &self.source
    }

    /// Bound sections in schema declaration order.
    pub fn sections(&self) -> &[(String, BoundSection)] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&BoundSection> {
        self.sections.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Bound value of `section.option`, if the option is declared on a fixed section.
    pub fn get(&self, section: &str, option: &str) -> Option<&BoundValue> {
        self.section(section)?.get(option)
    }

    /// Whether the file has a `[section]` with at least one entry.
    pub fn is_section_present_and_non_empty(&self, section: &str) -> bool {
        self.store.section(section).is_some_and(|s| !s.is_empty())
    }

    /// Best-effort 1-indexed line where `option` is set inside `[section]`.
    pub fn line_number(&self, section: &str, option: &str) -> Option<usize> {
        self.source.locate(section, option)
    }

    /// Coerce `raw` per the option's declared kind and bind it.
    ///
    /// A `FilePath` value is resolved against the config file's directory and
    /// must exist. Setting an option of an absent section brings the section
    /// into being with every other option absent.
    pub fn set(&mut self, section: &str, option: &str, raw: &str) -> Result<(), InifigError> {
        let decl = self
            .schema
            .get_option(section, option)
            .ok_or_else(|| InifigError::KeyNotFound(format!("{section}.{option}")))?;
        let value = bind::coerce(decl, section, raw, &bind::config_dir(&self.path))?;
        self.bind_value(section, option, value)
    }

    /// Bind the absent marker to an optional option.
    pub fn unset(&mut self, section: &str, option: &str) -> Result<(), InifigError> {
        let decl = self
            .schema
            .get_option(section, option)
            .ok_or_else(|| InifigError::KeyNotFound(format!("{section}.{option}")))?;
        if decl.is_required() {
            return Err(InifigError::InvalidValue {
                key: format!("{section}.{option}"),
                reason: "required option cannot be unset".into(),
            });
        }
        self.bind_value(section, option, BoundValue::Absent)
    }

    fn bind_value(
        &mut self,
        section: &str,
        option: &str,
        value: BoundValue,
    ) -> Result<(), InifigError> {
        let decl = self
            .schema
            .get_section(section)
            .ok_or_else(|| InifigError::KeyNotFound(section.to_string()))?;
        let (_, bound) = self
            .sections
            .iter_mut()
            .find(|(n, _)| n == section)
            .ok_or_else(|| InifigError::KeyNotFound(section.to_string()))?;

        if bound.is_absent() {
            *bound = BoundSection::Fixed(
                decl.options()
                    .iter()
                    .map(|o| (o.name().to_string(), BoundValue::Absent))
                    .collect(),
            );
        }
        if let BoundSection::Fixed(values) = bound
            && let Some((_, slot)) = values.iter_mut().find(|(k, _)| k == option)
        {
            *slot = value;
            return Ok(());
        }
        Err(InifigError::KeyNotFound(format!("{section}.{option}")))
    }

    /// Render the bound values as pretty-printed JSON, sections in declaration order.
    pub fn to_json(&self) -> Result<String, InifigError> {
        serde_json::to_string_pretty(self).map_err(|e| InifigError::InvalidValue {
            key: "<json>".into(),
            reason: e.to_string(),
        })
    }
}

impl Serialize for BoundConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{app_schema, bind_str};
    use tempfile::TempDir;

    const CONTENT: &str = "\
[General]
name = demo
tags = a, b,c

[Files]
input = data.csv

[Empty]
";

    fn bound(dir: &TempDir) -> BoundConfig {
        std::fs::write(dir.path().join("data.csv"), "x").unwrap();
        bind_str(&app_schema(), dir, CONTENT).unwrap()
    }

    #[test]
    fn value_accessors() {
        assert_eq!(BoundValue::Plain("x".into()).as_str(), Some("x"));
        assert_eq!(BoundValue::List(vec!["a".into()]).as_list(), Some(&["a".to_string()][..]));
        assert_eq!(BoundValue::FilePath("/a/b".into()).as_path(), Some(Path::new("/a/b")));
        assert!(BoundValue::Absent.is_absent());
        assert_eq!(BoundValue::Absent.as_str(), None);
    }

    #[test]
    fn to_raw_flattens_each_kind() {
        assert_eq!(BoundValue::Absent.to_raw(), None);
        assert_eq!(BoundValue::Plain("x".into()).to_raw(), Some("x".into()));
        assert_eq!(
            BoundValue::FilePath("/cfg/data/in.csv".into()).to_raw(),
            Some("/cfg/data/in.csv".into())
        );
        assert_eq!(
            BoundValue::List(vec!["a".into(), "b".into(), "".into()]).to_raw(),
            Some("a, b, ".into())
        );
    }

    #[test]
    fn section_present_and_non_empty() {
        let dir = TempDir::new().unwrap();
        let config = bound(&dir);
        assert!(config.is_section_present_and_non_empty("General"));
        assert!(!config.is_section_present_and_non_empty("Empty"));
        assert!(!config.is_section_present_and_non_empty("Aliases"));
    }

    #[test]
    fn line_number_of_declared_option() {
        let dir = TempDir::new().unwrap();
        let config = bound(&dir);
        assert_eq!(config.line_number("General", "tags"), Some(3));
        assert_eq!(config.line_number("Files", "input"), Some(6));
        assert_eq!(config.line_number("Files", "output"), None);
    }

    #[test]
    fn set_coerces_per_declared_kind() {
        let dir = TempDir::new().unwrap();
        let mut config = bound(&dir);
        config.set("General", "tags", "x, y").unwrap();
        assert_eq!(
            config.get("General", "tags"),
            Some(&BoundValue::List(vec!["x".into(), "y".into()]))
        );
    }

    #[test]
    fn set_file_path_checks_existence() {
        let dir = TempDir::new().unwrap();
        let mut config = bound(&dir);
        let err = config.set("Files", "output", "missing.txt").unwrap_err();
        assert!(matches!(err, InifigError::FileNotFound { .. }));
        assert_eq!(config.get("Files", "output"), Some(&BoundValue::Absent));
    }

    #[test]
    fn set_undeclared_key_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = bound(&dir);
        let err = config.set("General", "nope", "1").unwrap_err();
        assert!(matches!(err, InifigError::KeyNotFound(k) if k == "General.nope"));
    }

    #[test]
    fn set_into_absent_section_creates_it() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("data.csv"), "x").unwrap();
        let mut config = bind_str(&app_schema(), &dir, "[General]\nname = demo\n").unwrap();
        assert!(config.section("Files").unwrap().is_absent());

        config.set("Files", "input", "data.csv").unwrap();
        let files = config.section("Files").unwrap();
        assert_eq!(files.get("input"), Some(&BoundValue::FilePath(dir.path().join("data.csv"))));
        assert_eq!(files.get("output"), Some(&BoundValue::Absent));
    }

    #[test]
    fn unset_optional_and_reject_required() {
        let dir = TempDir::new().unwrap();
        let mut config = bound(&dir);
        config.unset("General", "tags").unwrap();
        assert_eq!(config.get("General", "tags"), Some(&BoundValue::Absent));

        let err = config.unset("General", "name").unwrap_err();
        assert!(matches!(err, InifigError::InvalidValue { .. }));
    }

    #[test]
    fn json_keeps_declaration_order() {
        let dir = TempDir::new().unwrap();
        let config = bound(&dir);
        let json = config.to_json().unwrap();
        let general = json.find("\"General\"").unwrap();
        let files = json.find("\"Files\"").unwrap();
        let aliases = json.find("\"Aliases\"").unwrap();
        assert!(general < files && files < aliases);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["General"]["tags"], serde_json::json!(["a", "b", "c"]));
        assert!(value["Aliases"].is_null());
    }
}
