//! Catalog readers for gormgen.
//!
//! A [`SchemaReader`] turns a live database into the plain
//! [`Table`](gormgen_schema::Table) values the emitter consumes. Only the
//! MySQL `information_schema` layout is supported.

mod assemble;
mod error;
mod mysql;

use async_trait::async_trait;
use gormgen_schema::{Table, TableFilter};

pub use assemble::{ColumnRow, TableRow, assemble_schema};
pub use error::ReaderError;
pub use mysql::{MySqlSchemaReader, connect_options};

/// Reads table and column metadata from a database catalog.
///
/// Implementations return tables in catalog order with columns in ordinal
/// position order, already filtered by `filter`.
#[async_trait]
pub trait SchemaReader {
    async fn read_schema(
        &self,
        database: &str,
        filter: &TableFilter,
    ) -> Result<Vec<Table>, ReaderError>;
}
