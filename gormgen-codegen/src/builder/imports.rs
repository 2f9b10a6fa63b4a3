//! Go import collection.

use std::collections::BTreeSet;

use super::CodeBuilder;

/// Tracks Go import paths and renders them as a grouped import block.
///
/// Standard library packages (no dot in the first path element) come first,
/// then a blank line, then everything else. Each group is sorted.
///
/// ```
/// use gormgen_codegen::builder::{CodeBuilder, ImportCollector};
///
/// let mut imports = ImportCollector::new();
/// imports.add("github.com/jinzhu/gorm");
/// imports.add("time");
///
/// let mut builder = CodeBuilder::go();
/// imports.render(&mut builder);
/// assert_eq!(
///     builder.build(),
///     "import (\n\t\"time\"\n\n\t\"github.com/jinzhu/gorm\"\n)\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    std: BTreeSet<String>,
    external: BTreeSet<String>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import path. Duplicates are ignored.
    pub fn add(&mut self, path: &str) {
        let first = path.split('/').next().unwrap_or_default();
        if first.contains('.') {
            self.external.insert(path.to_string());
        } else {
            self.std.insert(path.to_string());
        }
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        self.std.extend(other.std.iter().cloned());
        self.external.extend(other.external.iter().cloned());
    }

    /// Check if a path is already imported.
    pub fn contains(&self, path: &str) -> bool {
        self.std.contains(path) || self.external.contains(path)
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.std.is_empty() && self.external.is_empty()
    }

    /// Write the import block. Writes nothing when empty.
    pub fn render(&self, builder: &mut CodeBuilder) {
        if self.is_empty() {
            return;
        }

        builder.push_block("import (", ")", |b| {
            for path in &self.std {
                b.push_line(&format!("\"{}\"", path));
            }
            if !self.std.is_empty() && !self.external.is_empty() {
                b.push_blank();
            }
            for path in &self.external {
                b.push_line(&format!("\"{}\"", path));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(imports: &ImportCollector) -> String {
        let mut builder = CodeBuilder::go();
        imports.render(&mut builder);
        builder.build()
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(render(&ImportCollector::new()), "");
    }

    #[test]
    fn test_deduplicates() {
        let mut imports = ImportCollector::new();
        imports.add("time");
        imports.add("time");
        assert_eq!(render(&imports), "import (\n\t\"time\"\n)\n");
    }

    #[test]
    fn test_groups_are_sorted() {
        let mut imports = ImportCollector::new();
        imports.add("time");
        imports.add("database/sql");
        imports.add("gorm.io/gorm");
        imports.add("github.com/jinzhu/gorm");

        assert_eq!(
            render(&imports),
            "import (\n\t\"database/sql\"\n\t\"time\"\n\n\t\"github.com/jinzhu/gorm\"\n\t\"gorm.io/gorm\"\n)\n"
        );
    }

    #[test]
    fn test_merge() {
        let mut a = ImportCollector::new();
        a.add("time");
        let mut b = ImportCollector::new();
        b.add("github.com/jinzhu/gorm");

        a.merge(&b);
        assert!(a.contains("time"));
        assert!(a.contains("github.com/jinzhu/gorm"));
    }
}
