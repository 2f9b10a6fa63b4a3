//! Dump command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from saving a schema snapshot.
#[derive(Debug)]
pub struct DumpReport {
    pub database: String,
    pub path: PathBuf,
    pub table_count: usize,
    pub column_count: usize,
}

impl Report for DumpReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Database", &self.database);
        out.key_value(
            "Read",
            &format!("{} tables, {} columns", self.table_count, self.column_count),
        );
        out.key_value("Saved", &self.path.display().to_string());
    }
}
