use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InifigError {
    #[error("No section '{section}' in config file {path}")]
    MissingSection { section: String, path: PathBuf },

    #[error("No option '{option}' in section '{section}' of config file {path}")]
    MissingOption {
        section: String,
        option: String,
        path: PathBuf,
    },

    #[error("File {path} referenced by '{section}.{option}' does not exist")]
    FileNotFound {
        path: PathBuf,
        section: String,
        option: String,
    },

    #[error("{path} must be UTF-8 encoded without a byte-order mark")]
    Encoding { path: PathBuf },

    #[error("Failed to parse {path} (line {line}): {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Section '{0}' is declared more than once")]
    DuplicateSection(String),

    #[error("Option '{option}' is declared more than once in section '{section}'")]
    DuplicateOption { section: String, option: String },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("No config file named '{file_name}' found in any search path")]
    ConfigNotFound { file_name: String },

    #[error("No config path: call .path() or .app_name() on the builder")]
    NoConfigPath,

    #[error("No schema: call .schema() on the builder")]
    NoSchema,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_section_formats_correctly() {
        let err = InifigError::MissingSection {
            section: "Files".into(),
            path: "/etc/myapp/app.ini".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Files"));
        assert!(msg.contains("app.ini"));
    }

    #[test]
    fn missing_option_names_section_and_option() {
        let err = InifigError::MissingOption {
            section: "Files".into(),
            option: "input".into(),
            path: "/etc/myapp/app.ini".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'input'"));
        assert!(msg.contains("'Files'"));
        assert!(msg.contains("/etc/myapp/app.ini"));
    }

    #[test]
    fn file_not_found_carries_resolved_path() {
        let err = InifigError::FileNotFound {
            path: "/cfg/data/in.csv".into(),
            section: "Files".into(),
            option: "input".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/cfg/data/in.csv"));
        assert!(msg.contains("Files.input"));
    }

    #[test]
    fn encoding_names_file() {
        let err = InifigError::Encoding {
            path: "/cfg/bom.ini".into(),
        };
        assert!(err.to_string().contains("/cfg/bom.ini"));
    }

    #[test]
    fn no_config_path_formats() {
        let err = InifigError::NoConfigPath;
        assert!(err.to_string().contains("app_name"));
    }
}
