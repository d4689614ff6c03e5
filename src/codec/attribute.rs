//! Per-attribute converter selection
//!
//! Callers that pick the adapter from configuration (a column mapping, a CLI
//! flag) name it with an [`AttributeKind`] and convert canonical strings
//! through a [`ColumnCodec`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::adapter::{AttributeAdapter, DateAdapter, DateTimeAdapter, TextAdapter};
use super::converter::{
    CryptoConverter, LocalDateCryptoConverter, LocalDateTimeCryptoConverter, StringCryptoConverter,
};
use crate::crypto::{AesEcbInitializer, CipherInitializer, KeyProvider};
use crate::error::{ConversionError, Direction};

/// The value type stored in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Opaque text
    #[default]
    Text,
    /// Calendar date
    Date,
    /// Date-time without zone
    #[serde(alias = "date-time")]
    DateTime,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Text => TextAdapter::NAME,
            AttributeKind::Date => DateAdapter::NAME,
            AttributeKind::DateTime => DateTimeAdapter::NAME,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttributeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "string" => Ok(AttributeKind::Text),
            "date" => Ok(AttributeKind::Date),
            "datetime" | "date-time" => Ok(AttributeKind::DateTime),
            _ => Err(format!(
                "Invalid attribute kind: '{}'. Use text, date or datetime",
                s
            )),
        }
    }
}

/// All three converters sharing one key provider and cipher initializer
#[derive(Clone)]
pub struct ColumnCodec {
    text: StringCryptoConverter,
    date: LocalDateCryptoConverter,
    datetime: LocalDateTimeCryptoConverter,
}

impl ColumnCodec {
    pub fn new(keys: Arc<dyn KeyProvider>) -> Self {
        Self::with_initializer(keys, Arc::new(AesEcbInitializer::new()))
    }

    pub fn with_initializer(keys: Arc<dyn KeyProvider>, cipher: Arc<dyn CipherInitializer>) -> Self {
        Self {
            text: CryptoConverter::with_initializer(keys.clone(), cipher.clone()),
            date: CryptoConverter::with_initializer(keys.clone(), cipher.clone()),
            datetime: CryptoConverter::with_initializer(keys, cipher),
        }
    }

    pub fn text(&self) -> &StringCryptoConverter {
        &self.text
    }

    pub fn date(&self) -> &LocalDateCryptoConverter {
        &self.date
    }

    pub fn datetime(&self) -> &LocalDateTimeCryptoConverter {
        &self.datetime
    }

    /// Convert a canonical string of the given kind into column text
    ///
    /// The input is validated by the adapter first, so a malformed date fails
    /// with a format error even when encryption is disabled.
    pub fn encode(&self, kind: AttributeKind, canonical: Option<&str>) -> Result<Option<String>, ConversionError> {
        match kind {
            AttributeKind::Text => encode_with(&self.text, canonical),
            AttributeKind::Date => encode_with(&self.date, canonical),
            AttributeKind::DateTime => encode_with(&self.datetime, canonical),
        }
    }

    /// Convert column text back into the canonical string of the given kind
    pub fn decode(&self, kind: AttributeKind, stored: Option<&str>) -> Result<Option<String>, ConversionError> {
        match kind {
            AttributeKind::Text => decode_with(&self.text, stored),
            AttributeKind::Date => decode_with(&self.date, stored),
            AttributeKind::DateTime => decode_with(&self.datetime, stored),
        }
    }
}

fn encode_with<A: AttributeAdapter>(
    converter: &CryptoConverter<A>,
    canonical: Option<&str>,
) -> Result<Option<String>, ConversionError> {
    let value = converter
        .adapter()
        .parse_canonical(canonical)
        .map_err(|cause| ConversionError::new(Direction::ToStorage, cause))?;
    converter.to_storage(value.as_ref())
}

fn decode_with<A: AttributeAdapter>(
    converter: &CryptoConverter<A>,
    stored: Option<&str>,
) -> Result<Option<String>, ConversionError> {
    let value = converter.from_storage(stored)?;
    Ok(converter.adapter().to_canonical(value.as_ref()))
}
