//! Setup and configuration CLI commands

use crate::config::paths::FieldCryptPaths;
use crate::config::settings::{Settings, ENCRYPTION_KEY_ENV};
use crate::crypto::cipher::CIPHER_INSTANCE_NAME;
use crate::crypto::{AesEcbInitializer, CipherInitializer, CipherMode, KeyProvider, SharedKey};
use crate::error::FieldCryptResult;

/// Write the settings file if it does not exist yet
pub fn handle_init(paths: &FieldCryptPaths, settings: &Settings) -> FieldCryptResult<()> {
    if paths.is_initialized() {
        println!("Already initialized: {}", paths.settings_file().display());
        return Ok(());
    }

    settings.save(paths)?;
    println!("Created {}", paths.settings_file().display());
    println!();
    println!("Set 'encryption_key' in that file, or export {},", ENCRYPTION_KEY_ENV);
    println!("to a 16, 24 or 32 byte key to enable encryption.");
    Ok(())
}

/// Show paths and encryption status; the key itself is never printed
pub fn handle_show_config(paths: &FieldCryptPaths, settings: &Settings, keys: &SharedKey) {
    println!("fieldcrypt Configuration");
    println!("========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Log level:          {}", settings.log_level);
    println!("  Cipher:             {}", CIPHER_INSTANCE_NAME);
    println!("  Encryption enabled: {}", keys.is_enabled());
    if let Some(key) = keys.current().filter(|k| !k.is_empty()) {
        let usable = AesEcbInitializer::new()
            .prepare(CipherMode::Encrypt, key.as_bytes())
            .is_ok();
        println!("  Key length:         {} bytes", key.len());
        println!("  Key usable:         {}", if usable { "yes" } else { "no (need 16, 24 or 32 bytes)" });
    }
}
