//! CLI command implementations

mod commands;

pub use commands::{analyze, chat, export, history, preview, sample};
