//! Joining catalog rows into tables.

use gormgen_schema::{Column, Table, TableFilter};
use indexmap::IndexMap;

/// One row of the table listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub comment: String,
}

/// One row of the column listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub table_name: String,
    pub name: String,
    pub column_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub comment: String,
}

impl From<ColumnRow> for Column {
    fn from(row: ColumnRow) -> Self {
        Column {
            table_name: row.table_name,
            name: row.name,
            raw_type: row.column_type,
            nullable: row.nullable,
            primary_key: row.primary_key,
            auto_increment: row.auto_increment,
            comment: row.comment,
        }
    }
}

/// Attach column rows to their tables.
///
/// Tables keep the order of `tables`; columns keep the order of `columns`,
/// which the caller sorts by ordinal position. Tables rejected by `filter`
/// are dropped, along with columns whose table is not kept.
pub fn assemble_schema(
    tables: Vec<TableRow>,
    columns: Vec<ColumnRow>,
    filter: &TableFilter,
) -> Vec<Table> {
    let mut by_name: IndexMap<String, Table> = tables
        .into_iter()
        .filter(|row| filter.matches(&row.name))
        .map(|row| {
            let table = Table::new(row.name.clone()).comment(row.comment);
            (row.name, table)
        })
        .collect();

    for row in columns {
        if let Some(table) = by_name.get_mut(&row.table_name) {
            table.columns.push(row.into());
        }
    }

    by_name.into_values().collect()
}
