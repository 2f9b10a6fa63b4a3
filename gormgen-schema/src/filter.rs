//! Inclusion filter over raw table names.

/// Selects tables whose raw name starts with one of a list of prefixes.
///
/// An empty filter accepts every table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFilter {
    prefixes: Vec<String>,
}

impl TableFilter {
    /// Create a filter from an ordered list of prefixes.
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A filter that accepts everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Check whether a raw table name passes the filter.
    pub fn matches(&self, table_name: &str) -> bool {
        self.prefixes.is_empty() || self.prefixes.iter().any(|p| table_name.starts_with(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_accepts_all() {
        let filter = TableFilter::all();
        assert!(filter.matches("t_order"));
        assert!(filter.matches(""));
    }

    #[test]
    fn test_prefix_match() {
        let filter = TableFilter::new(["t_", "tb_"]);
        assert!(filter.matches("t_order"));
        assert!(filter.matches("tb_user"));
        assert!(!filter.matches("order"));
        assert!(!filter.matches("tab_user"));
    }
}
