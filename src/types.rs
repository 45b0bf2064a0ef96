use std::path::PathBuf;

/// A directory that discovery looks in for the config file.
///
/// Discovery checks each directory for the builder's file name
/// (`{app_name}.ini` unless overridden); the last existing match wins.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// The OS config directory for the app, as reported by `directories`.
    Platform,
    /// A dotfile-style directory under `$HOME`, such as `Home(".myapp")`.
    Home(&'static str),
    /// Whatever directory the process was started in.
    Cwd,
    /// A directory given by the caller.
    Path(PathBuf),
}

/// One check/list/get/set request against a loaded config file.
/// The clap adapter produces these from parsed command-line arguments.
///
/// Keys are dotted `section.option` pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Validate the file against the schema.
    Check,
    List,
    Get { key: String },
    Set { key: String, value: String },
}
