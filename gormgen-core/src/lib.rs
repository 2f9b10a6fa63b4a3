//! Naming and type rules for gormgen.
//!
//! This crate holds the two pure transformations every other gormgen crate
//! builds on:
//!
//! - [`normalize`] turns a raw catalog identifier into an exported Go
//!   identifier, keeping well-known initialisms fully upper-cased.
//! - [`map_type`] turns a raw MySQL column type into a [`GoType`].

mod initialisms;
mod naming;
mod type_mapper;

pub use initialisms::{INITIALISMS, is_initialism};
pub use naming::normalize;
pub use type_mapper::{GoType, base_type, map_type};
