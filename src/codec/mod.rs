//! Attribute encryption codecs
//!
//! - `adapter`: value ⇄ canonical string per attribute type
//! - `converter`: the generic encrypt-on-write / decrypt-on-read converter
//! - `attribute`: kind-based selection for configuration-driven callers

pub mod adapter;
pub mod attribute;
pub mod converter;

pub use adapter::{AttributeAdapter, DateAdapter, DateTimeAdapter, TextAdapter};
pub use attribute::{AttributeKind, ColumnCodec};
pub use converter::{
    CryptoConverter, LocalDateCryptoConverter, LocalDateTimeCryptoConverter, StringCryptoConverter,
};
