//! Schema declarations: which sections a config file has and what they hold.
//!
//! A [`Schema`] is an ordered table of [`SectionDecl`]s. Each section is either
//! [`SectionKind::Fixed`], with a known set of typed [`OptionDecl`]s, or
//! [`SectionKind::Dict`], an arbitrary ordered key/value mapping.
//!
//! ```ignore
//! let schema = Schema::builder()
//!     .section(
//!         SectionDecl::fixed("Files")
//!             .required(true)
//!             .option(OptionDecl::file_path("input"))
//!             .option(OptionDecl::list("formats").required(false)),
//!     )
//!     .section(SectionDecl::dict("Aliases"))
//!     .build()?;
//! ```
//!
//! Sections default to optional, options default to required.

use crate::error::InifigError;

/// How a section's content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Named, typed options declared up front.
    Fixed,
    /// Arbitrary key/value pairs taken verbatim.
    Dict,
}

/// How an option's raw string is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The raw string, unchanged.
    Plain,
    /// A path relative to the config file's directory that must exist.
    FilePath,
    /// Comma-separated values with leading spaces stripped.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDecl {
    name: String,
    required: bool,
    kind: ValueKind,
}

impl OptionDecl {
    pub fn new(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            kind,
        }
    }

    pub fn plain(name: &str) -> Self {
        Self::new(name, ValueKind::Plain)
    }

    pub fn file_path(name: &str) -> Self {
        Self::new(name, ValueKind::FilePath)
    }

    pub fn list(name: &str) -> Self {
        Self::new(name, ValueKind::List)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDecl {
    name: String,
    required: bool,
    kind: SectionKind,
    options: Vec<OptionDecl>,
}

impl SectionDecl {
    pub fn fixed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            kind: SectionKind::Fixed,
            options: Vec::new(),
        }
    }

    pub fn dict(name: &str) -> Self {
        Self {
            kind: SectionKind::Dict,
            ..Self::fixed(name)
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Declare an option. Ignored for dict sections, which have no per-option schema.
    pub fn option(mut self, option: OptionDecl) -> Self {
        self.options.push(option);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Declared options in declaration order. Always empty for dict sections.
    pub fn options(&self) -> &[OptionDecl] {
        match self.kind {
            SectionKind::Fixed => self.options.as_slice(),
            SectionKind::Dict => &[],
        }
    }

    pub fn get_option(&self, name: &str) -> Option<&OptionDecl> {
        self.options().iter().find(|o| o.name == name)
    }
}

/// An ordered, validated set of section declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    sections: Vec<SectionDecl>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn sections(&self) -> &[SectionDecl] {
        &self.sections
    }

    pub fn get_section(&self, name: &str) -> Option<&SectionDecl> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Look up an option by `(section, option)`.
    pub fn get_option(&self, section: &str, option: &str) -> Option<&OptionDecl> {
        self.get_section(section)?.get_option(option)
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    sections: Vec<SectionDecl>,
}

impl SchemaBuilder {
    pub fn section(mut self, section: SectionDecl) -> Self {
        self.sections.push(section);
        self
    }

    /// Finish the schema, rejecting duplicate section or option names.
    pub fn build(self) -> Result<Schema, InifigError> {
        for (i, section) in self.sections.iter().enumerate() {
            if self.sections[..i].iter().any(|s| s.name == section.name) {
                return Err(InifigError::DuplicateSection(section.name.clone()));
            }
            for (j, option) in section.options.iter().enumerate() {
                if section.options[..j].iter().any(|o| o.name == option.name) {
                    return Err(InifigError::DuplicateOption {
                        section: section.name.clone(),
                        option: option.name.clone(),
                    });
                }
            }
        }
        Ok(Schema {
            sections: self.sections,
        })
    }
}
