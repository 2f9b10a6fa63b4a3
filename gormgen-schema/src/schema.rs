//! JSON snapshots of an extracted schema.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, Table};

/// All tables extracted from one database in a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Database the tables were read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Tables in catalog order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            database: None,
            tables,
        }
    }

    /// Set the source database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Parse and validate a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Read and validate a JSON snapshot from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_string()?).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that every column belongs to the table it is listed under.
    ///
    /// Columns with an empty `table_name` are accepted; hand-written
    /// snapshots usually leave it out.
    pub fn validate(&self) -> Result<()> {
        for table in &self.tables {
            if let Some(column) = table
                .columns
                .iter()
                .find(|c| !c.table_name.is_empty() && c.table_name != table.name)
            {
                return Err(Error::OrphanColumn {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    claimed: column.table_name.clone(),
                });
            }
        }
        Ok(())
    }
}
