//! Go struct emission for gormgen.
//!
//! Takes the tables produced by a schema reader and writes a Go source file
//! with one gorm model struct per table.
//!
//! # Module Organization
//!
//! - [`builder`] - Text building blocks (CodeBuilder, ImportCollector, Indent)
//! - [`config`] - Generation options and `gormgen.toml` loading
//! - [`plan`] - Resolving tables into struct plans (names, types, tags, hooks)
//! - [`emitter`] - Rendering plans into a Go file

pub mod builder;
pub mod config;
mod diagnostic;
pub mod emitter;
mod error;
pub mod go;
pub mod plan;
pub mod tags;

pub use config::{ConfigError, GenerationConfig};
pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{EmitReport, EmittedStruct, GENERATED_HEADER, StructEmitter};
pub use error::{GenerationError, Result};
