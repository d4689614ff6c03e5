//! The encrypt-on-write / decrypt-on-read attribute converter
//!
//! A persistence layer calls [`CryptoConverter::to_storage`] before writing a
//! text column and [`CryptoConverter::from_storage`] after reading it. When the
//! shared key is empty or absent, both directions pass the canonical string
//! through untouched.
//!
//! The enabled/disabled decision is made per call. A value written while the
//! key was enabled and read while it is disabled (or the reverse) is not
//! readable: the stored text is then handed to the wrong path and fails.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};

use super::adapter::{AttributeAdapter, DateAdapter, DateTimeAdapter, TextAdapter};
use crate::crypto::{AesEcbInitializer, CipherInitializer, CipherMode, KeyProvider, SecretKey};
use crate::error::{ConversionError, CryptoError, Direction};

/// Converter for opaque text attributes
pub type StringCryptoConverter = CryptoConverter<TextAdapter>;

/// Converter for calendar date attributes
pub type LocalDateCryptoConverter = CryptoConverter<DateAdapter>;

/// Converter for date-time attributes
pub type LocalDateTimeCryptoConverter = CryptoConverter<DateTimeAdapter>;

/// Generic attribute converter over one [`AttributeAdapter`]
///
/// Holds no per-call state: every conversion prepares its own transform, so a
/// converter can be shared across threads.
#[derive(Clone)]
pub struct CryptoConverter<A: AttributeAdapter> {
    adapter: A,
    keys: Arc<dyn KeyProvider>,
    cipher: Arc<dyn CipherInitializer>,
}

impl<A: AttributeAdapter + Default> CryptoConverter<A> {
    /// Create a converter using AES/ECB/PKCS5Padding
    pub fn new(keys: Arc<dyn KeyProvider>) -> Self {
        Self::with_initializer(keys, Arc::new(AesEcbInitializer::new()))
    }

    /// Create a converter with a custom cipher initializer
    pub fn with_initializer(keys: Arc<dyn KeyProvider>, cipher: Arc<dyn CipherInitializer>) -> Self {
        Self {
            adapter: A::default(),
            keys,
            cipher,
        }
    }
}

impl<A: AttributeAdapter> CryptoConverter<A> {
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Convert an attribute value into its column text
    ///
    /// Encrypts and base64-encodes the canonical string when the key is
    /// enabled and the value is present, otherwise returns the canonical
    /// string unchanged.
    ///
    /// # Errors
    ///
    /// Any cipher failure, wrapped in a [`ConversionError`].
    pub fn to_storage(&self, value: Option<&A::Value>) -> Result<Option<String>, ConversionError> {
        if let Some(key) = self.active_key() {
            if self.adapter.is_present(value) {
                tracing::debug!(attribute = A::NAME, "encrypting attribute");
                return self
                    .encrypt(&key, value)
                    .map(Some)
                    .map_err(|cause| ConversionError::new(Direction::ToStorage, cause));
            }
        }

        tracing::trace!(attribute = A::NAME, "storing attribute without encryption");
        Ok(self.adapter.to_canonical(value))
    }

    /// Convert column text back into an attribute value
    ///
    /// Decrypts when the key is enabled and the text is non-empty, otherwise
    /// parses the text as canonical.
    ///
    /// # Errors
    ///
    /// Base64, cipher, UTF-8 or format failures, wrapped in a
    /// [`ConversionError`]. No partially parsed value is ever returned.
    pub fn from_storage(&self, text: Option<&str>) -> Result<Option<A::Value>, ConversionError> {
        let wrap = |cause| ConversionError::new(Direction::FromStorage, cause);

        if let Some(key) = self.active_key() {
            if let Some(stored) = text.filter(|t| !t.is_empty()) {
                tracing::debug!(attribute = A::NAME, "decrypting attribute");
                return self.decrypt(&key, stored).map_err(wrap);
            }
        }

        tracing::trace!(attribute = A::NAME, "reading attribute without decryption");
        self.adapter.parse_canonical(text).map_err(wrap)
    }

    fn active_key(&self) -> Option<Arc<SecretKey>> {
        self.keys.current().filter(|key| !key.is_empty())
    }

    fn encrypt(&self, key: &SecretKey, value: Option<&A::Value>) -> Result<String, CryptoError> {
        let transform = self.cipher.prepare(CipherMode::Encrypt, key.as_bytes())?;
        let plaintext = self.adapter.to_canonical(value).unwrap_or_default();
        let ciphertext = transform.finish(plaintext.as_bytes())?;
        Ok(STANDARD.encode(ciphertext))
    }

    fn decrypt(&self, key: &SecretKey, stored: &str) -> Result<Option<A::Value>, CryptoError> {
        let transform = self.cipher.prepare(CipherMode::Decrypt, key.as_bytes())?;
        let ciphertext = STANDARD
            .decode(stored)
            .map_err(|e| CryptoError::CryptoExecution(format!("invalid base64 column text: {}", e)))?;
        let plaintext = transform.finish(&ciphertext)?;
        let canonical = String::from_utf8(plaintext)
            .map_err(|_| CryptoError::format(A::NAME, "decrypted bytes are not valid UTF-8"))?;
        self.adapter.parse_canonical(Some(&canonical))
    }
}
