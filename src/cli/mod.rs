//! CLI surface: argument parsing and subcommand handlers.

mod args;
pub mod commands;

pub use args::{Args, Command, RunSettings, DEFAULT_CONFIDENCE, DEFAULT_MODEL};
