//! Table and column definitions.

use serde::{Deserialize, Serialize};

/// A table read from the catalog.
///
/// `columns` are kept in ordinal position order and are never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Raw catalog name.
    pub name: String,
    /// Table comment, possibly empty.
    #[serde(default)]
    pub comment: String,
    /// Columns in ordinal position order.
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table with no comment and no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            columns: Vec::new(),
        }
    }

    /// Set the table comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Append a column. Its `table_name` is set to this table's name.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(Column {
            table_name: self.name.clone(),
            ..column
        });
        self
    }

    /// Append several columns in order.
    pub fn columns(self, columns: impl IntoIterator<Item = Column>) -> Self {
        columns.into_iter().fold(self, Table::column)
    }

    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }
}

/// A column read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Raw name of the owning table.
    #[serde(default)]
    pub table_name: String,
    /// Raw catalog name.
    pub name: String,
    /// Full column type, e.g. `int(11) unsigned`.
    pub raw_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub comment: String,
}

impl Column {
    /// Create a non-null column not yet attached to a table.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            table_name: String::new(),
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: false,
            primary_key: false,
            auto_increment: false,
            comment: String::new(),
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Set the column comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_keep_insertion_order() {
        let table = Table::new("t_order").columns([
            Column::new("id", "int unsigned"),
            Column::new("create_at", "int"),
            Column::new("order_no", "varchar(64)"),
        ]);

        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "create_at", "order_no"]);
    }

    #[test]
    fn test_column_is_attached_to_table() {
        let table = Table::new("t_user").column(Column::new("id", "bigint"));
        assert_eq!(table.columns[0].table_name, "t_user");
    }

    #[test]
    fn test_column_flags() {
        let column = Column::new("id", "int")
            .primary_key()
            .auto_increment()
            .comment("key");
        assert!(column.primary_key);
        assert!(column.auto_increment);
        assert!(!column.nullable);
        assert_eq!(column.comment, "key");
    }

    #[test]
    fn test_deserialize_defaults() {
        let column: Column =
            serde_json::from_str(r#"{"name": "id", "raw_type": "int(11)"}"#).unwrap();
        assert_eq!(column.name, "id");
        assert!(!column.nullable);
        assert!(column.comment.is_empty());
    }
}
