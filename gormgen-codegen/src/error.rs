use miette::Diagnostic;
use thiserror::Error;

/// Result type for emission.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that stop a generation run.
///
/// Name problems are detected before anything is written, so only
/// [`GenerationError::WriteFailure`] can leave partial output behind.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerationError {
    #[error("failed to write generated code")]
    #[diagnostic(
        code(gormgen::write_failure),
        help("the output may be incomplete; rerun the generation from scratch")
    )]
    WriteFailure(#[source] std::io::Error),

    #[error("columns '{first}' and '{second}' of table '{table}' both map to field '{identifier}'")]
    #[diagnostic(
        code(gormgen::identifier_collision),
        help("rename one of the columns so the Go field names differ")
    )]
    IdentifierCollision {
        table: String,
        first: String,
        second: String,
        identifier: String,
    },

    #[error("column '{column}' of table '{table}' maps to field '{identifier}', which is also a generated method")]
    #[diagnostic(
        code(gormgen::method_collision),
        help("rename the column; Go does not allow a field and a method with the same name")
    )]
    MethodCollision {
        table: String,
        column: String,
        identifier: String,
    },

    #[error("tables '{first}' and '{second}' both map to struct '{identifier}'")]
    #[diagnostic(
        code(gormgen::type_name_collision),
        help("adjust the stripped prefixes or filter one of the tables out")
    )]
    TypeNameCollision {
        first: String,
        second: String,
        identifier: String,
    },

    #[error("'{raw}' in table '{table}' does not contain a usable Go identifier")]
    #[diagnostic(
        code(gormgen::invalid_identifier),
        help("names need at least one letter that is not preceded only by digits")
    )]
    InvalidIdentifier { table: String, raw: String },

    #[error("package name is required")]
    #[diagnostic(
        code(gormgen::missing_package),
        help("set package_name in the config or pass --pkg")
    )]
    MissingPackageName,

    #[error("'{name}' is not a valid Go package name")]
    #[diagnostic(
        code(gormgen::invalid_package),
        help("use letters, digits and underscores, starting with a letter, and avoid Go keywords")
    )]
    InvalidPackageName { name: String },
}

impl From<std::io::Error> for GenerationError {
    fn from(source: std::io::Error) -> Self {
        GenerationError::WriteFailure(source)
    }
}
