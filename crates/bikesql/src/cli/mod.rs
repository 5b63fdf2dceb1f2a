//! Command implementations and output rendering for the `bikesql` binary.

pub mod commands;
pub mod output;

pub use output::{OutputFormat, OutputWriter};
