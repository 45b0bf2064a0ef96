#[cfg(test)]
pub mod test {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::bind;
    use crate::bound::BoundConfig;
    use crate::error::InifigError;
    use crate::schema::{OptionDecl, Schema, SectionDecl};

    /// Schema used across module tests:
    ///
    /// ```text
    /// [General]   required fixed: name (plain), tags (optional list)
    /// [Files]     optional fixed: input (file path), output (optional file path)
    /// [Aliases]   optional dict
    /// ```
    pub fn app_schema() -> Schema {
        Schema::builder()
            .section(
                SectionDecl::fixed("General")
                    .required(true)
                    .option(OptionDecl::plain("name"))
                    .option(OptionDecl::list("tags").required(false)),
            )
            .section(
                SectionDecl::fixed("Files")
                    .option(OptionDecl::file_path("input"))
                    .option(OptionDecl::file_path("output").required(false)),
            )
            .section(SectionDecl::dict("Aliases"))
            .build()
            .unwrap()
    }

    /// Write `content` to `{dir}/{name}` and return the full path.
    pub fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Write `content` to `{dir}/app.ini` and load it against `schema`.
    pub fn bind_str(
        schema: &Schema,
        dir: &TempDir,
        content: &str,
    ) -> Result<BoundConfig, InifigError> {
        let path = write_config(dir, "app.ini", content);
        bind::load(schema, &path)
    }

    #[test]
    fn app_schema_builds() {
        let schema = app_schema();
        assert_eq!(schema.sections().len(), 3);
        assert!(schema.get_section("General").unwrap().is_required());
        assert!(!schema.get_section("Files").unwrap().is_required());
    }
}
