mod args;
mod completions;
mod dump;
mod generate;
mod render;

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use dump::DumpCommand;
use eyre::Result;
use generate::GenerateCommand;
use render::RenderCommand;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for Result<T, gormgen_codegen::ConfigError> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for gormgen_codegen::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "gormgen")]
#[command(version)]
#[command(about = "Generate gorm model structs from a MySQL schema")]
pub(crate) struct Cli {
    /// Log every table and column as it is processed
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        init_logging(self.verbose);

        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Render(cmd) => cmd.run(),
            Commands::Dump(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[derive(Subcommand)]
enum Commands {
    /// Read a MySQL schema and generate Go structs
    Generate(GenerateCommand),

    /// Generate Go structs from a JSON schema snapshot
    Render(RenderCommand),

    /// Save a MySQL schema as a JSON snapshot
    Dump(DumpCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_requires_database_name() {
        assert!(Cli::try_parse_from(["gormgen", "generate"]).is_err());
        assert!(Cli::try_parse_from(["gormgen", "generate", "-n", "shop", "-v"]).is_ok());
    }

    #[test]
    fn test_render_takes_schema_file() {
        let cli = Cli::try_parse_from(["gormgen", "render", "-s", "shop.json", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Render(ref cmd) if cmd.generation.dry_run));
    }
}
