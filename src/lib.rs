//! Declarative, schema-driven binding for sectioned INI configuration files.
//! Declare the shape, point at a file, and get validated, typed values back.
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
//!
//! let config = Inifig::builder()
//!     .schema(schema)
//!     .app_name("myapp")
//!     .load()?;
//!
//! let input = config.get("Files", "input").and_then(BoundValue::as_path);
//! ```
//!
//! # Schema
//!
//! A [`Schema`] is an explicit table of [`SectionDecl`]s. A section is either
//! **fixed**, with named [`OptionDecl`]s, or a **dict**, an arbitrary ordered
//! key/value mapping. Sections and options each carry a required flag;
//! sections default to optional and options default to required.
//!
//! Option values are coerced by their [`ValueKind`]:
//!
//! - **`Plain`**: the raw string.
//! - **`FilePath`**: joined onto the config file's directory, normalized
//!   (`.` and `..` collapsed), and checked to exist.
//! - **`List`**: split on `,` with leading spaces stripped from each piece.
//!   Trailing spaces and empty pieces are kept.
//!
//! # Binding
//!
//! Binding is all-or-nothing. Every required section is checked before any
//! option; within a fixed section every required option is checked before any
//! value is coerced. Optional sections and options missing from the file are
//! bound to an explicit absent marker ([`BoundSection::Absent`],
//! [`BoundValue::Absent`]) and are never coerced, so an optional `FilePath`
//! that is not set never touches the filesystem.
//!
//! The resulting [`BoundConfig`] owns everything one load produced: the
//! schema, the raw store, and the source lines. It answers
//! [`is_section_present_and_non_empty`](BoundConfig::is_section_present_and_non_empty)
//! and [`line_number`](BoundConfig::line_number) for diagnostics.
//!
//! # Line numbers
//!
//! Line lookups scan the raw text of the section for the first non-comment
//! line containing the option name. This is a substring match: an option name
//! that also occurs inside an earlier line of the same section (a longer key,
//! or another key's value) reports that earlier line.
//!
//! # Writing
//!
//! [`write`] flattens the bound values onto the raw store and saves it,
//! creating parent directories as needed. Sections and keys the schema does not
//! declare are kept; comments and formatting are not.
//!
//! # File discovery
//!
//! [`InifigBuilder::path`] loads one file directly. Otherwise the builder
//! searches [`SearchPath`]s (priority-ascending, last wins) for
//! `{app_name}.ini`, the same way for every platform:
//!
//! - **`Platform`**: the OS config directory.
//! - **`Home(".myapp")`**: a dotfile directory under `$HOME`.
//! - **`Cwd`**: the working directory.
//! - **`Path(path)`**: an explicit directory.
//!
//! # Error handling
//!
//! All fallible operations return [`InifigError`]. Errors are user-facing and
//! name the file, section, and option involved. Files must be UTF-8 without a
//! byte-order mark.
//!
//! # Logging
//!
//! Loading, discovery, and writing emit [`tracing`](https://docs.rs/tracing)
//! events. Install a subscriber in the application to see them.

pub mod error;
pub mod types;

mod bind;
mod bound;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod file;
mod locate;
mod ops;
mod persist;
mod schema;
mod store;

#[cfg(test)]
mod fixtures;

pub use bind::{bind, load, normalize_path, split_list};
pub use bound::{BoundConfig, BoundSection, BoundValue};
pub use builder::{Inifig, InifigBuilder};
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use error::InifigError;
pub use locate::SourceLines;
pub use ops::ConfigResult;
pub use persist::{flatten, write};
pub use schema::{OptionDecl, Schema, SchemaBuilder, SectionDecl, SectionKind, ValueKind};
pub use store::{RawEntry, RawSection, RawStore};
pub use types::{ConfigAction, SearchPath};
