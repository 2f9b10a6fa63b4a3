//! Schema model for gormgen.
//!
//! A schema reader fills these types from the database catalog; the emitter
//! only reads them. The model is deliberately plain data so a catalog
//! extraction can be saved as JSON and rendered later without a database.
//!
//! ```text
//! information_schema → gormgen-mysql → gormgen-schema → gormgen-codegen
//! ```

mod error;
mod filter;
mod schema;
mod table;

pub use error::{Error, Result};
pub use filter::TableFilter;
pub use schema::Schema;
pub use table::{Column, Table};
