//! Configuration loading
//!
//! The settings in `defaults/durlex.default.toml` are compiled into the crate and always form the
//! bottom layer. [`Loader`] stacks TOML files and single-key overrides above them, and
//! [`Loader::load`] turns the merged result into a [`Loaded`] value.
//!
//! Besides output and representation knobs, a configuration can declare extra alias tables
//! (`[[tables]]`) with string tokens. [`Loader::load`] compiles them right away with the same
//! rules as the built-in tables, so an ambiguous table or a reused table name is a load error
//! rather than a surprise on first lookup.

use crate::alias::AliasTable;
use crate::compile::compile_with;
use crate::error::CompileError;
use crate::recognizer::{Recognizer, Representation};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/durlex.default.toml");

/// Names of the tables that ship with the crate. Configured tables may not reuse them.
pub const BUILTIN_TABLES: [&str; 3] = ["units", "directions", "signs"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DurlexConfig {
    pub output: OutputConfig,
    pub recognizer: RecognizerConfig,
    #[serde(default)]
    pub tables: Vec<AliasTable<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognizerConfig {
    pub representation: Representation,
}

impl DurlexConfig {
    /// Compile every configured alias table in the configured representation.
    ///
    /// Stops at the first table whose name is already taken, by a built-in table or an earlier
    /// configured one, or whose aliases don't compile.
    pub fn compile_tables(&self) -> Result<Vec<Recognizer<String>>, LoadError> {
        let mut names: HashSet<&str> = BUILTIN_TABLES.into_iter().collect();
        let mut compiled = Vec::with_capacity(self.tables.len());
        for table in &self.tables {
            if !names.insert(table.name()) {
                return Err(LoadError::DuplicateTable(table.name().to_string()));
            }
            compiled.push(compile_with(table, self.recognizer.representation)?);
        }
        tracing::debug!(count = compiled.len(), "compiled configured alias tables");
        Ok(compiled)
    }
}

/// Anything that can go wrong between reading configuration and having usable recognizers.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid alias table: {0}")]
    Compile(#[from] CompileError),
    #[error("alias table name `{0}` is already taken")]
    DuplicateTable(String),
}

/// A configuration whose alias tables have all been compiled.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub config: DurlexConfig,
    /// Configured tables, in declaration order.
    pub tables: Vec<Recognizer<String>>,
}

impl Loaded {
    /// The configured table called `name`, if any.
    pub fn table(&self, name: &str) -> Option<&Recognizer<String>> {
        self.tables.iter().find(|table| table.name() == name)
    }
}

/// Stacks configuration sources, lowest precedence first.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the compiled-in defaults.
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Stack a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Stack a TOML file, skipping it when it doesn't exist.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin `key` to `value` above every file, e.g. `output.format` from `--format`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the stacked sources into a [`DurlexConfig`] without compiling its tables.
    pub fn build(self) -> Result<DurlexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    /// Merge the stacked sources and compile the configured alias tables.
    pub fn load(self) -> Result<Loaded, LoadError> {
        let config = self.build()?;
        let tables = config.compile_tables()?;
        Ok(Loaded { config, tables })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults on their own.
pub fn load_defaults() -> Result<DurlexConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoMatch;
    use crate::recognizer::Classify;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file to be created");
        file.write_all(contents.as_bytes())
            .expect("temp file to be written");
        file
    }

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.recognizer.representation, Representation::Trie);
        assert!(config.tables.is_empty());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("recognizer.representation", "table")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.recognizer.representation, Representation::Table);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/durlex.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/durlex.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn compiles_configured_tables() {
        let file = write_config(
            r#"
            [[tables]]
            name = "weekdays"
            tokens = [
                { token = "Monday", aliases = ["monday", "mon"] },
                { token = "Tuesday", aliases = ["tuesday", "tue", "tues"] },
            ]
            "#,
        );

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        let tables = config.compile_tables().expect("tables to compile");

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name(), "weekdays");
        assert_eq!(
            tables[0].classify(b"tues 10am"),
            Ok(("Tuesday".to_string(), 4))
        );
        assert_eq!(
            tables[0].classify(b"monday"),
            Ok(("Monday".to_string(), 6))
        );
        assert_eq!(tables[0].classify(b"wed"), Err(NoMatch));
    }

    #[test]
    fn rejects_ambiguous_configured_tables() {
        let file = write_config(
            r#"
            [[tables]]
            name = "clash"
            tokens = [
                { token = "Seconds", aliases = ["s"] },
                { token = "Minutes", aliases = ["s"] },
            ]
            "#,
        );

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        let err = config.compile_tables().unwrap_err();

        assert!(matches!(
            err,
            LoadError::Compile(CompileError::DuplicateAlias { ref table, .. }) if table == "clash"
        ));
    }

    #[test]
    fn load_fails_on_an_ambiguous_table() {
        let file = write_config(
            r#"
            [[tables]]
            name = "clash"
            tokens = [
                { token = "A", aliases = ["s"] },
                { token = "B", aliases = ["s"] },
            ]
            "#,
        );

        let err = Loader::new().with_file(file.path()).load().unwrap_err();

        insta::assert_snapshot!(
            err.to_string(),
            @r#"invalid alias table: table `clash`: alias "s" is declared for both "A" and "B""#
        );
    }

    #[rstest::rstest]
    #[case("units")]
    #[case("directions")]
    #[case("signs")]
    fn rejects_tables_named_like_a_builtin(#[case] name: &str) {
        let file = write_config(&format!(
            r#"
            [[tables]]
            name = "{name}"
            tokens = [{{ token = "Z", aliases = ["zz"] }}]
            "#
        ));

        let err = Loader::new().with_file(file.path()).load().unwrap_err();

        assert!(matches!(err, LoadError::DuplicateTable(ref taken) if taken == name));
    }

    #[test]
    fn rejects_repeated_table_names() {
        let file = write_config(
            r#"
            [[tables]]
            name = "weekdays"
            tokens = [{ token = "Monday", aliases = ["mon"] }]

            [[tables]]
            name = "weekdays"
            tokens = [{ token = "Tuesday", aliases = ["tue"] }]
            "#,
        );

        let err = Loader::new().with_file(file.path()).load().unwrap_err();

        assert_eq!(err.to_string(), "alias table name `weekdays` is already taken");
    }

    #[test]
    fn builtin_table_names_match_the_tables() {
        use crate::direction::{direction_table, sign_table};
        use crate::units::unit_table;

        assert_eq!(
            BUILTIN_TABLES,
            [unit_table().name(), direction_table().name(), sign_table().name()]
        );
    }

    #[test]
    fn loaded_tables_are_found_by_name() {
        let file = write_config(
            r#"
            [[tables]]
            name = "weekdays"
            tokens = [{ token = "Monday", aliases = ["monday", "mon"] }]
            "#,
        );

        let loaded = Loader::new()
            .with_file(file.path())
            .set_override("recognizer.representation", "table")
            .expect("override to apply")
            .load()
            .expect("config to load");
        let weekdays = loaded.table("weekdays").expect("weekdays to be loaded");

        assert_eq!(weekdays.representation(), Representation::Table);
        assert_eq!(weekdays.classify(b"mon"), Ok(("Monday".to_string(), 3)));
        assert!(loaded.table("units").is_none());
    }
}
