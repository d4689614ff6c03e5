//! Path management for fieldcrypt
//!
//! ## Path Resolution Order
//!
//! 1. `FIELDCRYPT_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory for `fieldcrypt`
//!    (`~/.config/fieldcrypt` on Linux, `%APPDATA%\fieldcrypt\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FieldCryptError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "FIELDCRYPT_CONFIG_DIR";

/// Manages all paths used by fieldcrypt
#[derive(Debug, Clone)]
pub struct FieldCryptPaths {
    base_dir: PathBuf,
}

impl FieldCryptPaths {
    /// Create a new FieldCryptPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FieldCryptError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FieldCryptPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), FieldCryptError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            FieldCryptError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if fieldcrypt has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FieldCryptError> {
    ProjectDirs::from("", "", "fieldcrypt")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FieldCryptError::Config("Could not determine home directory".into()))
}
