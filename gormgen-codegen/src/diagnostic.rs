//! Non-fatal findings reported while emitting.
//!
//! Fatal problems are [`GenerationError`](crate::GenerationError)s. Anything
//! the emitter can work around (an unmapped column type, a table with no
//! columns) becomes a [`Diagnostic`] in the [`EmitReport`](crate::EmitReport).

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Output was produced but needs manual attention.
    Warning,
    /// Informational message about the run.
    Info,
}

impl Severity {
    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message tied to a table and optionally a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Raw name of the table the message is about.
    pub table: String,
    /// Raw name of the column, for column-level findings.
    pub column: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            table: table.into(),
            column: None,
            message: message.into(),
        }
    }

    /// Create a new info diagnostic.
    pub fn info(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            table: table.into(),
            column: None,
            message: message.into(),
        }
    }

    /// Attach the column this diagnostic is about.
    pub fn at(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// `table` or `table.column`.
    pub fn location(&self) -> String {
        match &self.column {
            Some(column) => format!("{}.{}", self.table, column),
            None => self.table.clone(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.severity, self.message, self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_with_column() {
        let diag = Diagnostic::warning("t_user", "unmapped type").at("tags");
        assert!(diag.severity.is_warning());
        assert_eq!(diag.location(), "t_user.tags");
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::info("t_log", "table has no columns");
        assert_eq!(diag.to_string(), "info: table has no columns (at t_log)");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
