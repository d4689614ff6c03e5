//! Cryptographic primitives for fieldcrypt
//!
//! Provides the AES transform initializer and the shared key slot that
//! decides whether attribute encryption is active.

pub mod cipher;
pub mod key;

pub use cipher::{AesEcbInitializer, CipherInitializer, CipherMode, Transform};
pub use key::{KeyProvider, SecretKey, SharedKey, StaticKey};
