//! Configuration module for fieldcrypt
//!
//! This module provides configuration management including:
//! - Configuration directory resolution
//! - Settings persistence
//! - Shared key resolution

pub mod paths;
pub mod settings;

pub use paths::FieldCryptPaths;
pub use settings::Settings;
