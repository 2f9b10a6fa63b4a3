//! Type mapping between MySQL column types and Go types.

use serde::Serialize;

/// Go types a column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GoType {
    String,
    Int64,
    Uint64,
    Int,
    Uint,
    Bool,
    Byte,
    Uint8,
    Float64,
    Time,
    /// `interface{}`, emitted for column types with no mapping.
    Opaque,
}

impl GoType {
    /// Get the Go spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoType::String => "string",
            GoType::Int64 => "int64",
            GoType::Uint64 => "uint64",
            GoType::Int => "int",
            GoType::Uint => "uint",
            GoType::Bool => "bool",
            GoType::Byte => "byte",
            GoType::Uint8 => "uint8",
            GoType::Float64 => "float64",
            GoType::Time => "time.Time",
            GoType::Opaque => "interface{}",
        }
    }

    /// Package that must be imported to use this type, if any.
    pub fn import_path(&self) -> Option<&'static str> {
        match self {
            GoType::Time => Some("time"),
            _ => None,
        }
    }

    /// Returns false for the `interface{}` placeholder.
    pub fn is_mapped(&self) -> bool {
        !matches!(self, GoType::Opaque)
    }
}

impl std::fmt::Display for GoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the base type name from a raw column type.
///
/// The base is everything before the first `(` or whitespace, lower-cased:
/// `"INT(11) unsigned"` has base `"int"`.
pub fn base_type(raw_type: &str) -> String {
    raw_type
        .trim()
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Map a raw MySQL column type (as found in `COLUMN_TYPE`) to a Go type.
///
/// Never fails: unknown types map to [`GoType::Opaque`].
///
/// ```
/// use gormgen_core::{GoType, map_type};
///
/// assert_eq!(map_type("int(11) unsigned"), GoType::Uint);
/// assert_eq!(map_type("tinyint(1)"), GoType::Bool);
/// assert_eq!(map_type("enum('a','b')"), GoType::Opaque);
/// ```
pub fn map_type(raw_type: &str) -> GoType {
    let unsigned = raw_type.contains("unsigned");

    match base_type(raw_type).as_str() {
        "varchar" | "nvarchar" | "text" | "longtext" | "char" | "tinytext" => GoType::String,
        "bigint" if unsigned => GoType::Uint64,
        "bigint" => GoType::Int64,
        "int" | "smallint" | "mediumint" if unsigned => GoType::Uint,
        "int" | "smallint" | "mediumint" => GoType::Int,
        // Display width 1 marks a boolean regardless of signedness.
        "tinyint" if raw_type.contains("(1)") => GoType::Bool,
        "tinyint" if unsigned => GoType::Uint8,
        "tinyint" => GoType::Byte,
        "decimal" | "float" | "double" => GoType::Float64,
        "datetime" | "date" | "timestamp" | "year" => GoType::Time,
        _ => GoType::Opaque,
    }
}
