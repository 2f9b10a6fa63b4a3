use std::path::Path;

use clap::Args;
use eyre::Result;
use gormgen_codegen::{GenerationConfig, StructEmitter};
use gormgen_schema::Table;
use log::info;

use super::{
    UnwrapOrExit,
    args::{ConnectionArgs, GenerationArgs},
};
use crate::{
    output::write_go_file,
    reports::{GenerateReport, GenerationResult, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let output = self.generation.output_path(&self.connection.name);
        let config = self.generation.generation_config(&output);

        let tables = self.connection.read_tables(&config.table_filter())?;
        info!("read {} tables from {}", tables.len(), self.connection.name);

        let source = format!("{}/{}", self.connection.host, self.connection.name);
        emit_and_write(&tables, config, &self.generation, &output, source)
    }
}

/// Emit `tables`, then write or preview the result and print a report.
pub(super) fn emit_and_write(
    tables: &[Table],
    config: GenerationConfig,
    args: &GenerationArgs,
    output: &Path,
    source: String,
) -> Result<()> {
    let emitter = StructEmitter::new(config);
    let (code, emitted) = emitter.emit_to_string(tables).unwrap_or_exit();

    let result = if args.dry_run {
        GenerationResult::Preview {
            path: output.to_path_buf(),
            code,
        }
    } else {
        write_go_file(&code, output, args.formatter())?;
        GenerationResult::Written(output.to_path_buf())
    };

    let report = GenerateReport {
        source,
        emitted,
        result,
    };
    report.render(&mut TerminalOutput::new());

    Ok(())
}
