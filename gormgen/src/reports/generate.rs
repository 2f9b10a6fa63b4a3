//! Generate command report data structures.

use std::path::PathBuf;

use gormgen_codegen::{EmitReport, EmittedStruct};

use super::output::{Output, Report};

/// Report data from one generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Where the tables came from (`host/database` or a snapshot path).
    pub source: String,

    /// What the emitter produced.
    pub emitted: EmitReport,

    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// The file was written to disk.
    Written(PathBuf),
    /// Dry-run preview of the file that would be written.
    Preview { path: PathBuf, code: String },
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in self.emitted.warnings() {
            out.warning(&format!("{} (at {})", warning.message, warning.location()));
        }

        if let GenerationResult::Preview { path, code } = &self.result {
            out.divider(&path.display().to_string());
            out.preformatted(code);
            out.divider("Summary");
        }

        out.key_value("Source", &self.source);
        out.newline();

        out.section(&format!("Structs ({})", self.emitted.structs.len()));
        for item in &self.emitted.structs {
            out.added_item(&struct_line(item));
        }

        if !self.emitted.skipped.is_empty() {
            out.newline();
            out.section(&format!("Skipped ({})", self.emitted.skipped.len()));
            for table in &self.emitted.skipped {
                out.list_item(table);
            }
        }

        out.newline();
        match &self.result {
            GenerationResult::Written(path) => {
                out.key_value("Generated", &path.display().to_string());
            }
            GenerationResult::Preview { path, .. } => {
                out.key_value("Would generate", &path.display().to_string());
            }
        }
    }
}

fn struct_line(item: &EmittedStruct) -> String {
    let mut line = format!("{} -> {} ({} fields", item.table, item.name, item.field_count);
    for hook in &item.hooks {
        line.push_str(", ");
        line.push_str(hook);
    }
    line.push(')');
    line
}
