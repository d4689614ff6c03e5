//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the codec layer.

pub mod convert;
pub mod setup;

pub use convert::{handle_convert_command, ConvertCommands};
pub use setup::{handle_init, handle_show_config};
