//! User settings for fieldcrypt
//!
//! Holds the shared encryption key (if stored on disk) and the log level.
//! The key can also come from the environment or the command line; see
//! [`Settings::resolve_key`] for the precedence.

use serde::{Deserialize, Serialize};

use super::paths::FieldCryptPaths;
use crate::crypto::{SecretKey, SharedKey};
use crate::error::FieldCryptError;

/// Environment variable supplying the shared encryption key
pub const ENCRYPTION_KEY_ENV: &str = "FIELDCRYPT_ENCRYPTION_KEY";

/// User settings for fieldcrypt
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Shared encryption key; absent or empty disables encryption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,

    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            encryption_key: None,
            log_level: default_log_level(),
        }
    }
}

// Keep the key out of Debug output
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("schema_version", &self.schema_version)
            .field("encryption_key", &self.encryption_key.as_ref().map(|_| "[REDACTED]"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FieldCryptPaths) -> Result<Self, FieldCryptError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FieldCryptError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FieldCryptError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FieldCryptPaths) -> Result<(), FieldCryptError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FieldCryptError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            FieldCryptError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolve the shared key
    ///
    /// Precedence: `explicit` (command line), then [`ENCRYPTION_KEY_ENV`],
    /// then the settings file. The first source that is set wins, even when
    /// it is empty, so an empty variable can switch encryption off.
    pub fn resolve_key(&self, explicit: Option<String>) -> Option<SecretKey> {
        let from_env = std::env::var(ENCRYPTION_KEY_ENV).ok();
        self.resolve_key_from(explicit, from_env)
    }

    fn resolve_key_from(&self, explicit: Option<String>, from_env: Option<String>) -> Option<SecretKey> {
        explicit
            .or(from_env)
            .or_else(|| self.encryption_key.clone())
            .map(SecretKey::new)
    }

    /// Build the process key slot from the resolved key
    pub fn key_provider(&self, explicit: Option<String>) -> SharedKey {
        let keys = SharedKey::new();
        match self.resolve_key(explicit) {
            Some(key) if !key.is_empty() => {
                if !matches!(key.len(), 16 | 24 | 32) {
                    tracing::warn!(
                        key_len = key.len(),
                        "encryption key must be 16, 24 or 32 bytes; conversions will fail"
                    );
                }
                keys.set(key);
            }
            _ => tracing::info!("no encryption key configured; attributes are stored in clear"),
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyProvider;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert!(settings.encryption_key.is_none());
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FieldCryptPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.encryption_key = Some("MySuperSecretKey".into());
        settings.log_level = "debug".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.encryption_key.as_deref(), Some("MySuperSecretKey"));
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FieldCryptPaths::with_base_dir(temp_dir.path().to_path_buf());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.encryption_key.is_none());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FieldCryptPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FieldCryptError::Config(_)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"encryption_key":"k"}"#).unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_key_precedence() {
        let settings = Settings {
            encryption_key: Some("from-file".into()),
            ..Settings::default()
        };

        let key = settings.resolve_key_from(Some("explicit".into()), Some("from-env".into()));
        assert_eq!(key.unwrap().as_bytes(), b"explicit");

        let key = settings.resolve_key_from(None, Some("from-env".into()));
        assert_eq!(key.unwrap().as_bytes(), b"from-env");

        let key = settings.resolve_key_from(None, None);
        assert_eq!(key.unwrap().as_bytes(), b"from-file");

        let key = settings.resolve_key_from(None, Some(String::new()));
        assert!(key.unwrap().is_empty());
    }

    #[test]
    fn test_key_provider_from_explicit_key() {
        let settings = Settings::default();
        assert!(settings.key_provider(Some("MySuperSecretKey".into())).is_enabled());
        assert!(!settings.key_provider(Some(String::new())).is_enabled());
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = Settings {
            encryption_key: Some("MySuperSecretKey".into()),
            ..Settings::default()
        };
        assert!(!format!("{:?}", settings).contains("MySuperSecretKey"));
    }
}
