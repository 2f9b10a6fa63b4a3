use async_trait::async_trait;
use gormgen_schema::{Table, TableFilter};
use log::debug;
use sqlx::{
    MySqlPool, Row,
    mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlRow},
};

use crate::{
    ReaderError, SchemaReader,
    assemble::{ColumnRow, TableRow, assemble_schema},
};

// Text columns are cast to CHAR: MySQL 8 reports some information_schema
// columns with a binary collation, which does not decode as a string.
const TABLES_QUERY: &str = "SELECT
        CAST(TABLE_NAME AS CHAR) AS name,
        CAST(COALESCE(TABLE_COMMENT, '') AS CHAR) AS comment
    FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = ?";

const COLUMNS_QUERY: &str = "SELECT
        CAST(TABLE_NAME AS CHAR) AS table_name,
        CAST(COLUMN_NAME AS CHAR) AS col_name,
        CAST(COLUMN_TYPE AS CHAR) AS col_type,
        (CASE IS_NULLABLE WHEN 'NO' THEN 0 ELSE 1 END) AS nullable,
        (CASE COLUMN_KEY WHEN 'PRI' THEN 1 ELSE 0 END) AS primary_key,
        (CASE EXTRA WHEN 'auto_increment' THEN 1 ELSE 0 END) AS auto_incr,
        CAST(COALESCE(COLUMN_COMMENT, '') AS CHAR) AS comment
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = ?
    ORDER BY TABLE_NAME, ORDINAL_POSITION";

/// Build connection options from a user, password and `host[:port]`.
///
/// No database is selected; the schema name is passed to each query.
pub fn connect_options(
    user: &str,
    password: &str,
    host: &str,
) -> Result<MySqlConnectOptions, ReaderError> {
    let (host, port) = split_host(host)?;
    let options = MySqlConnectOptions::new()
        .host(host)
        .username(user)
        .password(password);

    Ok(match port {
        Some(port) => options.port(port),
        None => options,
    })
}

/// Split `host[:port]`. IPv6 addresses take a port only in `[addr]:port`
/// form; a bare address such as `::1` is used as is.
fn split_host(host: &str) -> Result<(&str, Option<u16>), ReaderError> {
    let invalid = || ReaderError::InvalidHost(host.to_string());

    if let Some(bracketed) = host.strip_prefix('[') {
        let (addr, rest) = bracketed.split_once(']').ok_or_else(invalid)?;
        return match rest {
            "" => Ok((addr, None)),
            _ => rest
                .strip_prefix(':')
                .and_then(|port| port.parse().ok())
                .map(|port| (addr, Some(port)))
                .ok_or_else(invalid),
        };
    }
    if host.matches(':').count() > 1 {
        return Ok((host, None));
    }

    match host.rsplit_once(':') {
        Some((name, port)) => port
            .parse()
            .map(|port| (name, Some(port)))
            .map_err(|_| invalid()),
        None => Ok((host, None)),
    }
}

/// Reads a schema from MySQL's `information_schema`.
pub struct MySqlSchemaReader {
    pool: MySqlPool,
}

impl MySqlSchemaReader {
    pub async fn connect(options: MySqlConnectOptions) -> Result<Self, ReaderError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await
            .map_err(ReaderError::Connection)?;

        Ok(Self { pool })
    }

    async fn table_rows(&self, database: &str) -> Result<Vec<TableRow>, ReaderError> {
        let rows = sqlx::query(TABLES_QUERY)
            .bind(database)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| ReaderError::Query {
                what: "tables",
                source,
            })?;

        rows.iter()
            .map(table_row)
            .collect::<Result<_, sqlx::Error>>()
            .map_err(|source| ReaderError::Query {
                what: "tables",
                source,
            })
    }

    async fn column_rows(&self, database: &str) -> Result<Vec<ColumnRow>, ReaderError> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(database)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| ReaderError::Query {
                what: "columns",
                source,
            })?;

        rows.iter()
            .map(column_row)
            .collect::<Result<_, sqlx::Error>>()
            .map_err(|source| ReaderError::Query {
                what: "columns",
                source,
            })
    }
}

fn table_row(row: &MySqlRow) -> Result<TableRow, sqlx::Error> {
    Ok(TableRow {
        name: row.try_get("name")?,
        comment: row.try_get("comment")?,
    })
}

fn column_row(row: &MySqlRow) -> Result<ColumnRow, sqlx::Error> {
    Ok(ColumnRow {
        table_name: row.try_get("table_name")?,
        name: row.try_get("col_name")?,
        column_type: row.try_get("col_type")?,
        nullable: row.try_get::<i64, _>("nullable")? != 0,
        primary_key: row.try_get::<i64, _>("primary_key")? != 0,
        auto_increment: row.try_get::<i64, _>("auto_incr")? != 0,
        comment: row.try_get("comment")?,
    })
}

#[async_trait]
impl SchemaReader for MySqlSchemaReader {
    async fn read_schema(
        &self,
        database: &str,
        filter: &TableFilter,
    ) -> Result<Vec<Table>, ReaderError> {
        let tables = self.table_rows(database).await?;
        let columns = self.column_rows(database).await?;
        debug!(
            "read {} tables and {} columns from {}",
            tables.len(),
            columns.len(),
            database
        );

        Ok(assemble_schema(tables, columns, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_host() {
        assert_eq!(
            split_host("localhost:3306").unwrap(),
            ("localhost", Some(3306))
        );
        assert_eq!(split_host("db.internal").unwrap(), ("db.internal", None));
    }

    #[test]
    fn test_split_host_ipv6() {
        assert_eq!(split_host("[::1]:3307").unwrap(), ("::1", Some(3307)));
        assert_eq!(split_host("[fe80::1]").unwrap(), ("fe80::1", None));
        assert_eq!(split_host("::1").unwrap(), ("::1", None));
        assert!(split_host("[::1").is_err());
        assert!(split_host("[::1]3306").is_err());
    }

    #[test]
    fn test_split_host_rejects_bad_port() {
        let err = split_host("localhost:mysql").unwrap_err();
        assert!(matches!(err, ReaderError::InvalidHost(ref h) if h == "localhost:mysql"));
    }

    #[test]
    fn test_connect_options_accepts_host_and_port() {
        assert!(connect_options("root", "p@ss:word", "127.0.0.1:3307").is_ok());
        assert!(connect_options("root", "root", "127.0.0.1:").is_err());
    }
}
