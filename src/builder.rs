use std::path::PathBuf;

use crate::bind;
use crate::bound::BoundConfig;
use crate::error::InifigError;
use crate::file;
use crate::ops::{self, ConfigResult};
use crate::schema::Schema;
use crate::types::{ConfigAction, SearchPath};

/// Entry point for building an inifig configuration.
pub struct Inifig;

impl Inifig {
    pub fn builder() -> InifigBuilder {
        InifigBuilder::new()
    }
}

/// Builder for locating, loading, and binding a config file.
///
/// The file is either given explicitly with [`path()`](Self::path) or
/// discovered from [`search_paths()`](Self::search_paths) using the file name
/// derived from [`app_name()`](Self::app_name).
pub struct InifigBuilder {
    schema: Option<Schema>,
    path: Option<PathBuf>,
    app_name: Option<String>,
    file_name: Option<String>,
    search_paths: Option<Vec<SearchPath>>,
}

impl InifigBuilder {
    fn new() -> Self {
        Self {
            schema: None,
            path: None,
            app_name: None,
            file_name: None,
            search_paths: None,
        }
    }

    /// Set the schema the file is bound against. Required.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Load this file and skip discovery.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the application name. This derives sensible defaults:
    /// - `file_name` → `"{app_name}.ini"`
    /// - `search_paths` → `[SearchPath::Platform]`
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the config file name (default: `"{app_name}.ini"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Replace the default search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has the
    /// highest priority. See [`SearchPath`] for the available variants.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path without replacing the defaults.
    /// If no paths have been set yet, starts from the default `[Platform]`.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths
            .get_or_insert_with(|| vec![SearchPath::Platform])
            .push(path);
        self
    }

    fn effective_app_name(&self) -> Result<&str, InifigError> {
        self.app_name.as_deref().ok_or(InifigError::NoConfigPath)
    }

    fn effective_file_name(&self) -> Result<String, InifigError> {
        if let Some(name) = &self.file_name {
            return Ok(name.clone());
        }
        let app = self.effective_app_name()?;
        Ok(format!("{app}.ini"))
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        if let Some(paths) = &self.search_paths {
            return paths.clone();
        }
        vec![SearchPath::Platform]
    }

    /// The explicit path, or the highest-priority discovered file.
    fn effective_path(&self) -> Result<PathBuf, InifigError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let app_name = self.effective_app_name()?;
        let file_name = self.effective_file_name()?;
        file::find_config_file(&self.effective_search_paths(), &file_name, app_name)
    }

    /// Locate, parse, and bind the configuration.
    pub fn load(self) -> Result<BoundConfig, InifigError> {
        let schema = self.schema.as_ref().ok_or(InifigError::NoSchema)?;
        let path = self.effective_path()?;
        bind::load(schema, &path)
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &ConfigAction) -> Result<(), InifigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (check / list / get / set).
    pub fn handle(self, action: &ConfigAction) -> Result<ConfigResult, InifigError> {
        let mut config = self.load()?;
        match action {
            ConfigAction::Check => Ok(ops::check(&config)),
            ConfigAction::List => Ok(ops::list_values(&config)),
            ConfigAction::Get { key } => ops::get_value(&config, key),
            ConfigAction::Set { key, value } => ops::set_value(&mut config, key, value),
        }
    }
}
