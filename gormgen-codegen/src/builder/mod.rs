//! Text building blocks for emitted Go source.
//!
//! - [`CodeBuilder`] - line-oriented buffer with indentation
//! - [`ImportCollector`] - deduplicated, grouped Go import paths
//! - [`Indent`] - indentation configuration

mod code_builder;
mod imports;
mod indent;

pub use code_builder::CodeBuilder;
pub use imports::ImportCollector;
pub use indent::Indent;
