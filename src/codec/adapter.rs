//! Type adapters between attribute values and their canonical strings
//!
//! Each adapter knows whether a value is worth converting, how to print it in a
//! fixed locale-independent form, and how to read that form back. Absent
//! values are `None` on both sides.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CryptoError;

/// Canonical calendar date format (ISO-8601)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical date-time format (ISO-8601, fraction only when non-zero)
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Date-time without seconds, accepted when parsing
const DATE_TIME_MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Value ⇄ canonical string mapping for one attribute type
pub trait AttributeAdapter {
    /// The in-memory attribute type
    type Value;

    /// Short type name used in errors and logs
    const NAME: &'static str;

    /// Whether the value carries content that should be encrypted
    fn is_present(&self, value: Option<&Self::Value>) -> bool;

    fn to_canonical(&self, value: Option<&Self::Value>) -> Option<String>;

    /// Parse canonical text back into a value
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Format`] when non-empty text does not match the
    /// canonical format.
    fn parse_canonical(&self, text: Option<&str>) -> Result<Option<Self::Value>, CryptoError>;
}

/// Opaque text: stored as-is, empty strings are not encrypted
#[derive(Debug, Clone, Copy, Default)]
pub struct TextAdapter;

impl AttributeAdapter for TextAdapter {
    type Value = String;
    const NAME: &'static str = "text";

    fn is_present(&self, value: Option<&String>) -> bool {
        value.is_some_and(|v| !v.is_empty())
    }

    fn to_canonical(&self, value: Option<&String>) -> Option<String> {
        value.cloned()
    }

    fn parse_canonical(&self, text: Option<&str>) -> Result<Option<String>, CryptoError> {
        Ok(text.map(str::to_owned))
    }
}

/// Calendar date, canonical form `2017-03-28`
#[derive(Debug, Clone, Copy, Default)]
pub struct DateAdapter;

impl AttributeAdapter for DateAdapter {
    type Value = NaiveDate;
    const NAME: &'static str = "date";

    fn is_present(&self, value: Option<&NaiveDate>) -> bool {
        value.is_some()
    }

    fn to_canonical(&self, value: Option<&NaiveDate>) -> Option<String> {
        value.map(|date| date.format(DATE_FORMAT).to_string())
    }

    fn parse_canonical(&self, text: Option<&str>) -> Result<Option<NaiveDate>, CryptoError> {
        match text {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(Some)
                .map_err(|e| CryptoError::format(Self::NAME, e.to_string())),
        }
    }
}

/// Date-time without zone, canonical form `2017-03-28T16:25:46`
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeAdapter;

impl AttributeAdapter for DateTimeAdapter {
    type Value = NaiveDateTime;
    const NAME: &'static str = "datetime";

    fn is_present(&self, value: Option<&NaiveDateTime>) -> bool {
        value.is_some()
    }

    fn to_canonical(&self, value: Option<&NaiveDateTime>) -> Option<String> {
        value.map(|datetime| datetime.format(DATE_TIME_FORMAT).to_string())
    }

    fn parse_canonical(&self, text: Option<&str>) -> Result<Option<NaiveDateTime>, CryptoError> {
        let text = match text {
            None | Some("") => return Ok(None),
            Some(text) => text,
        };

        NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
            .or_else(|e| NaiveDateTime::parse_from_str(text, DATE_TIME_MINUTES_FORMAT).map_err(|_| e))
            .map(Some)
            .map_err(|e| CryptoError::format(Self::NAME, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_text_presence() {
        let adapter = TextAdapter;
        assert!(adapter.is_present(Some(&"value".to_string())));
        assert!(!adapter.is_present(Some(&String::new())));
        assert!(!adapter.is_present(None));
    }

    #[test]
    fn test_text_is_identity() {
        let adapter = TextAdapter;
        assert_eq!(
            adapter.to_canonical(Some(&"ma_chaine".to_string())),
            Some("ma_chaine".to_string())
        );
        assert_eq!(adapter.to_canonical(None), None);
        assert_eq!(adapter.parse_canonical(Some("")).unwrap(), Some(String::new()));
        assert_eq!(adapter.parse_canonical(None).unwrap(), None);
    }

    #[test]
    fn test_date_canonical_form() {
        let adapter = DateAdapter;
        assert_eq!(
            adapter.to_canonical(Some(&date(2017, 3, 28))),
            Some("2017-03-28".to_string())
        );
        assert_eq!(adapter.to_canonical(None), None);
    }

    #[test]
    fn test_date_parse() {
        let adapter = DateAdapter;
        assert_eq!(
            adapter.parse_canonical(Some("2017-03-28")).unwrap(),
            Some(date(2017, 3, 28))
        );
        assert_eq!(adapter.parse_canonical(Some("")).unwrap(), None);
        assert_eq!(adapter.parse_canonical(None).unwrap(), None);
    }

    #[test]
    fn test_date_parse_rejects_malformed() {
        let err = DateAdapter.parse_canonical(Some("28/03/2017")).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().starts_with("invalid date format"));

        assert!(DateAdapter.parse_canonical(Some("2017-02-30")).is_err());
    }

    #[test]
    fn test_datetime_canonical_form() {
        let adapter = DateTimeAdapter;
        let value = date(2017, 3, 28).and_hms_opt(16, 25, 46).unwrap();
        assert_eq!(
            adapter.to_canonical(Some(&value)),
            Some("2017-03-28T16:25:46".to_string())
        );
    }

    #[test]
    fn test_datetime_keeps_fraction() {
        let adapter = DateTimeAdapter;
        let value = date(2017, 3, 28).and_hms_milli_opt(16, 25, 46, 500).unwrap();
        let canonical = adapter.to_canonical(Some(&value)).unwrap();
        assert_eq!(canonical, "2017-03-28T16:25:46.500");
        assert_eq!(adapter.parse_canonical(Some(&canonical)).unwrap(), Some(value));
    }

    #[test]
    fn test_datetime_parse_without_seconds() {
        let parsed = DateTimeAdapter.parse_canonical(Some("2017-03-28T16:25")).unwrap();
        assert_eq!(parsed, Some(date(2017, 3, 28).and_hms_opt(16, 25, 0).unwrap()));
    }

    #[test]
    fn test_datetime_parse_rejects_malformed() {
        let err = DateTimeAdapter
            .parse_canonical(Some("2017-03-28 16:25:46"))
            .unwrap_err();
        assert!(err.is_format());
        assert_eq!(DateTimeAdapter.parse_canonical(Some("")).unwrap(), None);
    }
}
