use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use gormgen_schema::{Schema, TableFilter};

use super::args::ConnectionArgs;
use crate::reports::{DumpReport, Report, TerminalOutput};

#[derive(Args)]
pub struct DumpCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Snapshot file (defaults to <name>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only save tables whose name starts with one of these prefixes
    #[arg(long, value_delimiter = ',')]
    pub include_prefix: Vec<String>,
}

impl DumpCommand {
    /// Run the dump command
    pub fn run(&self) -> Result<()> {
        let filter = TableFilter::new(
            self.include_prefix
                .iter()
                .filter(|p| !p.is_empty())
                .cloned(),
        );
        let tables = self.connection.read_tables(&filter)?;
        let schema = Schema::new(tables).database(&self.connection.name);

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", self.connection.name)));
        schema
            .save(&path)
            .wrap_err_with(|| format!("Failed to save {}", path.display()))?;

        let report = DumpReport {
            database: self.connection.name.clone(),
            path,
            table_count: schema.tables.len(),
            column_count: schema.tables.iter().map(|t| t.columns.len()).sum(),
        };
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
