//! Command-line interface
//!
//! clap derive parsing, styled status output and logging setup for the
//! `fieldcut` binary.

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
