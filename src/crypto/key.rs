//! Shared encryption key handling
//!
//! A process holds one secret that decides whether attribute encryption is
//! active. The key is handed to codecs through the [`KeyProvider`] capability
//! instead of living in a global.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key material that zeros its contents on drop
///
/// The raw UTF-8 bytes of the string are the AES key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    inner: String,
}

impl SecretKey {
    /// Create a new SecretKey
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// An empty key means encryption is disabled
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for SecretKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

/// Supplies the shared key to codecs
pub trait KeyProvider: Send + Sync {
    /// The key in effect right now, if any
    fn current(&self) -> Option<Arc<SecretKey>>;

    /// Whether conversions performed now would encrypt
    fn is_enabled(&self) -> bool {
        self.current().is_some_and(|key| !key.is_empty())
    }
}

impl<K: KeyProvider + ?Sized> KeyProvider for Arc<K> {
    fn current(&self) -> Option<Arc<SecretKey>> {
        (**self).current()
    }
}

/// A key fixed for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct StaticKey {
    key: Option<Arc<SecretKey>>,
}

impl StaticKey {
    pub fn new(key: impl Into<SecretKey>) -> Self {
        Self {
            key: Some(Arc::new(key.into())),
        }
    }

    /// A provider with encryption turned off
    pub fn disabled() -> Self {
        Self { key: None }
    }
}

impl KeyProvider for StaticKey {
    fn current(&self) -> Option<Arc<SecretKey>> {
        self.key.clone()
    }
}

/// A key slot that can be replaced or cleared at runtime
///
/// Writers publish a whole new key atomically; readers never observe a
/// partially updated value and never block. Clones share the same slot.
#[derive(Clone)]
pub struct SharedKey {
    slot: Arc<ArcSwapOption<SecretKey>>,
}

impl SharedKey {
    /// Create an empty (disabled) slot
    pub fn new() -> Self {
        Self {
            slot: Arc::new(ArcSwapOption::empty()),
        }
    }

    /// Create a slot holding `key`
    pub fn with_key(key: impl Into<SecretKey>) -> Self {
        let shared = Self::new();
        shared.set(key);
        shared
    }

    /// Publish a new key
    pub fn set(&self, key: impl Into<SecretKey>) {
        self.slot.store(Some(Arc::new(key.into())));
        tracing::debug!("encryption key replaced");
    }

    /// Remove the key, disabling encryption
    pub fn clear(&self) {
        self.slot.store(None);
        tracing::debug!("encryption key cleared");
    }
}

impl Default for SharedKey {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyProvider for SharedKey {
    fn current(&self) -> Option<Arc<SecretKey>> {
        self.slot.load_full()
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedKey")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
