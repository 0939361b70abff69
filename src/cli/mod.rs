//! CLI command handlers

pub mod commands;

pub use commands::{export, export_survey, resolve, tables, ResolveTarget};
