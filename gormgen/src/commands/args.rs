//! Arguments shared by the commands.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use gormgen_codegen::GenerationConfig;
use gormgen_mysql::{MySqlSchemaReader, SchemaReader, connect_options};
use gormgen_schema::{Table, TableFilter};

use super::UnwrapOrExit;

/// Database connection arguments.
#[derive(Args)]
pub struct ConnectionArgs {
    /// Database user
    #[arg(short, long, default_value = "root")]
    pub user: String,

    /// Database password
    #[arg(short = 'k', long, default_value = "root")]
    pub password: String,

    /// Database host and port
    #[arg(short = 'H', long, default_value = "localhost:3306")]
    pub host: String,

    /// Database (schema) name
    #[arg(short, long)]
    pub name: String,
}

impl ConnectionArgs {
    /// Read every table accepted by `filter`.
    pub fn read_tables(&self, filter: &TableFilter) -> Result<Vec<Table>> {
        let options = connect_options(&self.user, &self.password, &self.host)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("Failed to start async runtime")?;

        runtime.block_on(async {
            let reader = MySqlSchemaReader::connect(options)
                .await
                .wrap_err_with(|| format!("Failed to connect to {}", self.host))?;
            reader
                .read_schema(&self.name, filter)
                .await
                .wrap_err_with(|| format!("Failed to read schema '{}'", self.name))
        })
    }
}

/// Struct tags that can be switched on with `--tags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tag {
    /// gorm column tag
    Gorm,
    /// Add the raw column type to the gorm tag
    GormType,
    /// Add `not null` to the gorm tag
    NotNull,
    Json,
    Toml,
    Yaml,
    Xml,
}

/// Options controlling what is generated and where it goes.
#[derive(Args)]
pub struct GenerationArgs {
    /// Output file (defaults to models/<name>.go)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Go package name (defaults to the output directory name)
    #[arg(long)]
    pub pkg: Option<String>,

    /// Prefixes stripped from table names, first match wins
    #[arg(
        long,
        value_delimiter = ',',
        default_values = ["t_", "tab_", "tb_"],
        conflicts_with = "config"
    )]
    pub remove_prefix: Vec<String>,

    /// Only generate tables whose name starts with one of these prefixes
    #[arg(long, value_delimiter = ',', conflicts_with = "config")]
    pub include_prefix: Vec<String>,

    /// Struct tags to emit
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values = ["gorm", "json"],
        conflicts_with = "config"
    )]
    pub tags: Vec<Tag>,

    /// Read generation options from a gormgen.toml file instead of
    /// --remove-prefix, --include-prefix and --tags
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Formatter run on the generated file
    #[arg(long, default_value = "goimports")]
    pub format_tool: String,

    /// Write the generated code without running the formatter
    #[arg(long)]
    pub no_format: bool,

    /// Print generated code instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerationArgs {
    /// Output path, defaulting to `models/<name>.go`.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Path::new("models").join(format!("{}.go", name)))
    }

    /// Formatter to run, if any.
    pub fn formatter(&self) -> Option<&str> {
        (!self.no_format).then_some(self.format_tool.as_str())
    }

    /// Build the generation config from `--config` or from the flags.
    ///
    /// `--pkg` always wins; an empty package name falls back to the output
    /// directory name.
    pub fn generation_config(&self, output: &Path) -> GenerationConfig {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_file(path).unwrap_or_exit(),
            None => self.flag_config(),
        };

        if let Some(pkg) = &self.pkg {
            config.package_name = pkg.clone();
        }
        if config.package_name.trim().is_empty() {
            config.package_name = default_package(output);
        }
        config
    }

    fn flag_config(&self) -> GenerationConfig {
        let has = |tag: Tag| self.tags.contains(&tag);

        GenerationConfig::default()
            .strip_prefixes(self.remove_prefix.iter().filter(|p| !p.is_empty()).cloned())
            .filter_prefixes(self.include_prefix.iter().filter(|p| !p.is_empty()).cloned())
            .persistence_tags(has(Tag::Gorm))
            .type_in_tag(has(Tag::GormType))
            .not_null_in_tag(has(Tag::NotNull))
            .json_tag(has(Tag::Json))
            .toml_tag(has(Tag::Toml))
            .yaml_tag(has(Tag::Yaml))
            .xml_tag(has(Tag::Xml))
    }
}

/// Package name derived from the directory the output file is written to.
pub fn default_package(output: &Path) -> String {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let dir = std::path::absolute(&dir).unwrap_or(dir);

    let name: String = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let name = name.trim_start_matches(|c: char| c.is_numeric() || c == '_');

    if name.is_empty() {
        "models".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerationArgs,
    }

    fn parse(args: &[&str]) -> GenerationArgs {
        TestCli::parse_from(std::iter::once("gormgen").chain(args.iter().copied())).args
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        let config = args.generation_config(Path::new("models/shop.go"));

        assert_eq!(config.package_name, "models");
        assert_eq!(config.table_prefixes_to_strip, ["t_", "tab_", "tb_"]);
        assert!(config.emit_persistence_tags);
        assert!(config.emit_json_tag);
        assert!(!config.emit_yaml_tag);
        assert_eq!(args.formatter(), Some("goimports"));
        assert_eq!(args.output_path("shop"), Path::new("models/shop.go"));
    }

    #[test]
    fn test_tags_flag() {
        let args = parse(&["--tags", "gorm,gorm-type,not-null,yaml"]);
        let config = args.generation_config(Path::new("dao/x.go"));

        assert!(config.emit_persistence_tags);
        assert!(config.emit_type_in_tag);
        assert!(config.emit_not_null_in_tag);
        assert!(config.emit_yaml_tag);
        assert!(!config.emit_json_tag);
        assert_eq!(config.package_name, "dao");
    }

    #[test]
    fn test_pkg_and_prefix_flags() {
        let args = parse(&[
            "--pkg",
            "entity",
            "--remove-prefix",
            "sys_",
            "--include-prefix",
            "sys_,app_",
            "--no-format",
        ]);
        let config = args.generation_config(Path::new("out.go"));

        assert_eq!(config.package_name, "entity");
        assert_eq!(config.table_prefixes_to_strip, ["sys_"]);
        assert_eq!(config.table_name_filter_prefixes, ["sys_", "app_"]);
        assert_eq!(args.formatter(), None);
    }

    #[test]
    fn test_config_file_with_pkg_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gormgen.toml");
        std::fs::write(
            &path,
            "package_name = \"dao\"\nemit_yaml_tag = true\nemit_json_tag = false\n",
        )
        .unwrap();

        let config_arg = path.display().to_string();
        let args = parse(&["--config", &config_arg]);
        let config = args.generation_config(Path::new("models/x.go"));
        assert_eq!(config.package_name, "dao");
        assert!(config.emit_yaml_tag);
        assert!(config.table_prefixes_to_strip.is_empty());

        let args = parse(&["--config", &config_arg, "--pkg", "entity"]);
        assert_eq!(
            args.generation_config(Path::new("models/x.go")).package_name,
            "entity"
        );
    }

    #[test]
    fn test_config_conflicts_with_generation_flags() {
        let base = ["gormgen", "--config", "gormgen.toml"];
        for extra in [
            ["--tags", "yaml"],
            ["--remove-prefix", "sys_"],
            ["--include-prefix", "app_"],
        ] {
            let argv = base.iter().chain(extra.iter());
            assert!(TestCli::try_parse_from(argv).is_err(), "{extra:?}");
        }

        let allowed = ["--pkg", "dao", "--no-format"];
        assert!(TestCli::try_parse_from(base.iter().chain(allowed.iter())).is_ok());
    }

    #[test]
    fn test_default_package() {
        assert_eq!(default_package(Path::new("models/shop.go")), "models");
        assert_eq!(default_package(Path::new("internal/My-Models/a.go")), "my_models");
        assert_eq!(default_package(Path::new("gen/2024/a.go")), "models");
    }
}
