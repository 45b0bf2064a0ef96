//! Config file discovery and reading.
//!
//! # Discovery
//!
//! Each [`SearchPath`] variant resolves to one directory. The list is in
//! **priority-ascending** order (last = highest), and the highest-priority
//! directory that contains `{file_name}` wins. Unresolvable entries (no home
//! directory, unreadable CWD) are skipped.
//!
//! # Reading
//!
//! [`read_config`] accepts only UTF-8 without a byte-order mark. Anything else
//! is an [`InifigError::Encoding`] naming the file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::InifigError;
use crate::types::SearchPath;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Resolve a [`SearchPath`] to a concrete directory.
///
/// `app_name` is used by `SearchPath::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
pub fn resolve_search_path(sp: &SearchPath, app_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Find the highest-priority `{dir}/{file_name}` that exists.
pub fn find_config_file(
    search_paths: &[SearchPath],
    file_name: &str,
    app_name: &str,
) -> Result<PathBuf, InifigError> {
    let found = search_paths
        .iter()
        .rev()
        .filter_map(|sp| resolve_search_path(sp, app_name))
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file());

    match found {
        Some(path) => {
            debug!(path = %path.display(), "Discovered config file");
            Ok(path)
        }
        None => Err(InifigError::ConfigNotFound {
            file_name: file_name.to_string(),
        }),
    }
}

/// Read a config file as UTF-8 text, rejecting a byte-order mark.
pub fn read_config(path: &Path) -> Result<String, InifigError> {
    let bytes = std::fs::read(path).map_err(|e| InifigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode(bytes, path)
}

fn decode(bytes: Vec<u8>, path: &Path) -> Result<String, InifigError> {
    if bytes.starts_with(BOM) {
        return Err(InifigError::Encoding {
            path: path.to_path_buf(),
        });
    }
    String::from_utf8(bytes).map_err(|_| InifigError::Encoding {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_resolves() {
        let sp = SearchPath::Path(PathBuf::from("/etc/myapp"));
        assert_eq!(
            resolve_search_path(&sp, "myapp"),
            Some(PathBuf::from("/etc/myapp"))
        );
    }

    #[test]
    fn cwd_resolves() {
        let resolved = resolve_search_path(&SearchPath::Cwd, "myapp");
        assert_eq!(resolved, std::env::current_dir().ok());
    }

    #[test]
    fn highest_priority_wins() {
        let low = TempDir::new().unwrap();
        let high = TempDir::new().unwrap();
        fs::write(low.path().join("app.ini"), "[a]\n").unwrap();
        fs::write(high.path().join("app.ini"), "[b]\n").unwrap();

        let paths = vec![
            SearchPath::Path(low.path().to_path_buf()),
            SearchPath::Path(high.path().to_path_buf()),
        ];
        let found = find_config_file(&paths, "app.ini", "app").unwrap();
        assert_eq!(found, high.path().join("app.ini"));
    }

    #[test]
    fn falls_back_to_lower_priority() {
        let low = TempDir::new().unwrap();
        let high = TempDir::new().unwrap();
        fs::write(low.path().join("app.ini"), "[a]\n").unwrap();

        let paths = vec![
            SearchPath::Path(low.path().to_path_buf()),
            SearchPath::Path(high.path().to_path_buf()),
        ];
        let found = find_config_file(&paths, "app.ini", "app").unwrap();
        assert_eq!(found, low.path().join("app.ini"));
    }

    #[test]
    fn directory_with_config_name_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("app.ini")).unwrap();
        let paths = vec![SearchPath::Path(dir.path().to_path_buf())];
        assert!(find_config_file(&paths, "app.ini", "app").is_err());
    }

    #[test]
    fn nothing_found_names_file() {
        let dir = TempDir::new().unwrap();
        let paths = vec![SearchPath::Path(dir.path().to_path_buf())];
        let err = find_config_file(&paths, "app.ini", "app").unwrap_err();
        match err {
            InifigError::ConfigNotFound { file_name } => assert_eq!(file_name, "app.ini"),
            other => panic!("Expected ConfigNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn read_plain_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "[s]\nname = café\n").unwrap();
        assert_eq!(read_config(&path).unwrap(), "[s]\nname = café\n");
    }

    #[test]
    fn bom_rejected() {
        let err = decode(b"\xEF\xBB\xBF[s]\n".to_vec(), Path::new("/cfg/app.ini")).unwrap_err();
        assert!(matches!(err, InifigError::Encoding { path } if path == Path::new("/cfg/app.ini")));
    }

    #[test]
    fn invalid_utf8_rejected() {
        let err = decode(vec![b'[', 0xFF, b']'], Path::new("/cfg/app.ini")).unwrap_err();
        assert!(matches!(err, InifigError::Encoding { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_config(&dir.path().join("nope.ini")).unwrap_err();
        assert!(matches!(err, InifigError::Io { .. }));
    }
}
