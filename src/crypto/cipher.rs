//! AES cipher initialization
//!
//! Builds single-use cipher transforms for one direction and one key. The
//! production initializer is AES in ECB mode with PKCS#7 padding, keyed
//! directly by the raw bytes of the configured key string (no derivation).

use std::fmt;
use std::str::FromStr;

use aes::cipher::{
    block_padding::Pkcs7, BlockCipher, BlockDecryptMut, BlockEncryptMut, InvalidLength, KeyInit,
};
use aes::{Aes128, Aes192, Aes256};

use crate::error::CryptoError;

/// The algorithm descriptor of the production transform
pub const CIPHER_INSTANCE_NAME: &str = "AES/ECB/PKCS5Padding";

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Direction a transform runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    Encrypt,
    Decrypt,
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherMode::Encrypt => write!(f, "encrypt"),
            CipherMode::Decrypt => write!(f, "decrypt"),
        }
    }
}

impl FromStr for CipherMode {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" => Ok(CipherMode::Encrypt),
            "decrypt" => Ok(CipherMode::Decrypt),
            other => Err(CryptoError::CryptoSetup(format!(
                "unsupported cipher mode '{}'",
                other
            ))),
        }
    }
}

/// Accepts the JCE mode constants (1 = encrypt, 2 = decrypt)
impl TryFrom<i32> for CipherMode {
    type Error = CryptoError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CipherMode::Encrypt),
            2 => Ok(CipherMode::Decrypt),
            other => Err(CryptoError::CryptoSetup(format!(
                "unsupported cipher mode {}",
                other
            ))),
        }
    }
}

/// A configured cipher that processes exactly one input
///
/// Consuming `self` keeps a transform from being reused across conversions.
pub trait Transform {
    /// Run the whole input through the cipher, including padding
    fn finish(self: Box<Self>, input: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Creates transforms for a mode and raw key material
pub trait CipherInitializer: Send + Sync {
    fn prepare(&self, mode: CipherMode, key: &[u8]) -> Result<Box<dyn Transform>, CryptoError>;
}

/// AES/ECB/PKCS#7 with AES-128, AES-192 or AES-256 picked by key length
#[derive(Debug, Clone, Copy, Default)]
pub struct AesEcbInitializer;

impl AesEcbInitializer {
    pub fn new() -> Self {
        Self
    }

    /// Name of the algorithm this initializer configures
    pub fn algorithm(&self) -> &'static str {
        CIPHER_INSTANCE_NAME
    }
}

impl CipherInitializer for AesEcbInitializer {
    fn prepare(&self, mode: CipherMode, key: &[u8]) -> Result<Box<dyn Transform>, CryptoError> {
        match key.len() {
            16 => ecb_transform::<Aes128>(mode, key),
            24 => ecb_transform::<Aes192>(mode, key),
            32 => ecb_transform::<Aes256>(mode, key),
            len => Err(CryptoError::CryptoSetup(format!(
                "invalid AES key length: {} bytes (expected 16, 24 or 32)",
                len
            ))),
        }
    }
}

fn ecb_transform<C>(mode: CipherMode, key: &[u8]) -> Result<Box<dyn Transform>, CryptoError>
where
    C: BlockCipher + BlockEncryptMut + BlockDecryptMut + KeyInit + 'static,
{
    let invalid_key = |_: InvalidLength| CryptoError::CryptoSetup("invalid AES key".to_string());

    let transform: Box<dyn Transform> = match mode {
        CipherMode::Encrypt => Box::new(EcbEncrypt(
            ecb::Encryptor::<C>::new_from_slice(key).map_err(invalid_key)?,
        )),
        CipherMode::Decrypt => Box::new(EcbDecrypt(
            ecb::Decryptor::<C>::new_from_slice(key).map_err(invalid_key)?,
        )),
    };
    Ok(transform)
}

struct EcbEncrypt<C: BlockCipher + BlockEncryptMut>(ecb::Encryptor<C>);

impl<C: BlockCipher + BlockEncryptMut> Transform for EcbEncrypt<C> {
    fn finish(self: Box<Self>, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let EcbEncrypt(encryptor) = *self;
        Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(input))
    }
}

struct EcbDecrypt<C: BlockCipher + BlockDecryptMut>(ecb::Decryptor<C>);

impl<C: BlockCipher + BlockDecryptMut> Transform for EcbDecrypt<C> {
    fn finish(self: Box<Self>, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if input.is_empty() || input.len() % BLOCK_SIZE != 0 {
            return Err(CryptoError::CryptoExecution(format!(
                "input length {} is not a multiple of the block size",
                input.len()
            )));
        }

        let EcbDecrypt(decryptor) = *self;
        decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(input)
            .map_err(|_| {
                CryptoError::CryptoExecution("bad padding: wrong key or corrupted data".to_string())
            })
    }
}
