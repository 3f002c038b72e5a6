/// DicomSleuth CLI: argument parsing, configuration, and terminal output.
///
/// This crate contains all command-line code. Business logic lives in
/// `dicomsleuth-core`.
pub mod args;
pub mod commands;
pub mod report;
pub mod settings;

pub use args::{Cli, Commands};
pub use commands::run;
