use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use gormgen_schema::Schema;

use super::{args::GenerationArgs, generate::emit_and_write};

#[derive(Args)]
pub struct RenderCommand {
    /// JSON snapshot written by `gormgen dump`
    #[arg(short, long)]
    pub schema: PathBuf,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let schema = Schema::open(&self.schema)
            .wrap_err_with(|| format!("Failed to load {}", self.schema.display()))?;

        let output = self.generation.output_path(&self.output_name(&schema));
        let config = self.generation.generation_config(&output);

        emit_and_write(
            &schema.tables,
            config,
            &self.generation,
            &output,
            self.schema.display().to_string(),
        )
    }

    /// Name used for the default output file: the snapshot's database, or
    /// the snapshot's file stem.
    fn output_name(&self, schema: &Schema) -> String {
        schema
            .database
            .clone()
            .or_else(|| {
                self.schema
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "models".to_string())
    }
}
