use thiserror::Error;

/// Errors from reading a database catalog.
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("invalid host '{0}', expected host or host:port")]
    InvalidHost(String),

    #[error("failed to connect to the database")]
    Connection(#[source] sqlx::Error),

    #[error("failed to query {what}")]
    Query {
        what: &'static str,
        #[source]
        source: sqlx::Error,
    },
}
