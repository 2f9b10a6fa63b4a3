//! Generation options and `gormgen.toml` loading.

use std::path::{Path, PathBuf};

use gormgen_schema::TableFilter;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options that control what the emitter writes.
///
/// Prefix lists are ordered: the first matching prefix wins.
///
/// ```
/// use gormgen_codegen::GenerationConfig;
///
/// let config = GenerationConfig::new("models")
///     .strip_prefixes(["t_", "tb_"])
///     .json_tag(true);
///
/// assert_eq!(config.struct_source_name("t_order"), "order");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Go package name written in the `package` clause.
    pub package_name: String,
    /// Prefixes removed from raw table names before naming the struct.
    pub table_prefixes_to_strip: Vec<String>,
    /// When non-empty, only tables starting with one of these are emitted.
    pub table_name_filter_prefixes: Vec<String>,
    /// Emit the `gorm:"..."` tag.
    pub emit_persistence_tags: bool,
    /// Include `type:<raw type>;` in the gorm tag.
    pub emit_type_in_tag: bool,
    /// Include `not null;` in the gorm tag for non-nullable columns.
    pub emit_not_null_in_tag: bool,
    pub emit_json_tag: bool,
    pub emit_toml_tag: bool,
    pub emit_yaml_tag: bool,
    pub emit_xml_tag: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            table_prefixes_to_strip: Vec::new(),
            table_name_filter_prefixes: Vec::new(),
            emit_persistence_tags: true,
            emit_type_in_tag: false,
            emit_not_null_in_tag: false,
            emit_json_tag: true,
            emit_toml_tag: false,
            emit_yaml_tag: false,
            emit_xml_tag: false,
        }
    }
}

impl GenerationConfig {
    /// Create a config for a package with default tag options.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    /// Parse a `gormgen.toml` document.
    pub fn from_toml_str(content: &str, filename: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::parse(source, content, filename))
    }

    /// Read and parse a `gormgen.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Set the prefixes stripped from table names.
    pub fn strip_prefixes(mut self, prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.table_prefixes_to_strip = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the table name inclusion prefixes.
    pub fn filter_prefixes(
        mut self,
        prefixes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.table_name_filter_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn persistence_tags(mut self, enabled: bool) -> Self {
        self.emit_persistence_tags = enabled;
        self
    }

    pub fn type_in_tag(mut self, enabled: bool) -> Self {
        self.emit_type_in_tag = enabled;
        self
    }

    pub fn not_null_in_tag(mut self, enabled: bool) -> Self {
        self.emit_not_null_in_tag = enabled;
        self
    }

    pub fn json_tag(mut self, enabled: bool) -> Self {
        self.emit_json_tag = enabled;
        self
    }

    pub fn toml_tag(mut self, enabled: bool) -> Self {
        self.emit_toml_tag = enabled;
        self
    }

    pub fn yaml_tag(mut self, enabled: bool) -> Self {
        self.emit_yaml_tag = enabled;
        self
    }

    pub fn xml_tag(mut self, enabled: bool) -> Self {
        self.emit_xml_tag = enabled;
        self
    }

    /// Turn on every tag and tag option.
    pub fn all_tags(self) -> Self {
        self.persistence_tags(true)
            .type_in_tag(true)
            .not_null_in_tag(true)
            .json_tag(true)
            .toml_tag(true)
            .yaml_tag(true)
            .xml_tag(true)
    }

    /// Turn off every tag.
    pub fn no_tags(self) -> Self {
        self.persistence_tags(false)
            .json_tag(false)
            .toml_tag(false)
            .yaml_tag(false)
            .xml_tag(false)
    }

    /// The inclusion filter built from `table_name_filter_prefixes`.
    pub fn table_filter(&self) -> TableFilter {
        TableFilter::new(self.table_name_filter_prefixes.iter().cloned())
    }

    /// Remove the first matching strip prefix from a raw table name.
    ///
    /// At most one prefix is removed. A prefix that would consume the whole
    /// name is skipped.
    pub fn struct_source_name<'a>(&self, table_name: &'a str) -> &'a str {
        self.table_prefixes_to_strip
            .iter()
            .filter_map(|prefix| table_name.strip_prefix(prefix.as_str()))
            .find(|rest| !rest.is_empty())
            .unwrap_or(table_name)
    }
}

/// Errors loading a `gormgen.toml` file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create the file or drop the --config flag"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(gormgen::config_parse_error))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    fn parse(source: toml::de::Error, src: &str, filename: &str) -> Self {
        let span = source.span().map(SourceSpan::from);
        ConfigError::Parse {
            filename: filename.to_string(),
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        }
    }
}
