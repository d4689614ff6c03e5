//! fieldcrypt - transparent field-level encryption for persisted attributes
//!
//! Plain application values are encrypted before they are written to a text
//! column and decrypted after they are read, without the record model knowing.
//! Encryption is active only while a non-empty shared key is configured.
//!
//! # Architecture
//!
//! - `crypto`: AES transform initializer and the shared key slot
//! - `codec`: type adapters and the generic attribute converter
//! - `config`: configuration paths, settings and key resolution
//! - `error`: error taxonomy
//! - `cli`, `logging`: support for the `fieldcrypt` binary
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use fieldcrypt::codec::LocalDateCryptoConverter;
//! use fieldcrypt::crypto::SharedKey;
//!
//! let keys = SharedKey::with_key("MySuperSecretKey");
//! let converter = LocalDateCryptoConverter::new(Arc::new(keys));
//!
//! let birth_date = NaiveDate::from_ymd_opt(2017, 3, 28).unwrap();
//! let column = converter.to_storage(Some(&birth_date)).unwrap();
//! let read_back = converter.from_storage(column.as_deref()).unwrap();
//! assert_eq!(read_back, Some(birth_date));
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;

pub use error::{ConversionError, CryptoError, FieldCryptError, FieldCryptResult};
