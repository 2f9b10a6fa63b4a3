//! Report data structures for commands.
//!
//! Commands collect what happened into a report, then render it to an
//! [`Output`](output::Output) target.

mod dump;
mod generate;
mod output;

pub use dump::DumpReport;
pub use generate::{GenerateReport, GenerationResult};
pub use output::{Report, TerminalOutput};
