//! Error types for fieldcrypt
//!
//! The codec layer reports three kinds of failure ([`CryptoError`]) and always
//! surfaces them wrapped in a single [`ConversionError`]. Application-level
//! concerns (settings, files) use [`FieldCryptError`].

use std::fmt;

use thiserror::Error;

/// A failure inside the cipher or a type adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid algorithm, mode, or key material when preparing a transform
    #[error("cipher setup failed: {0}")]
    CryptoSetup(String),

    /// Padding/block-size or encoding failure while running a transform
    #[error("cipher execution failed: {0}")]
    CryptoExecution(String),

    /// A canonical string does not parse into the target type
    #[error("invalid {kind} format: {reason}")]
    Format { kind: &'static str, reason: String },
}

impl CryptoError {
    /// Create a format error for the given adapter
    pub fn format(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            kind,
            reason: reason.into(),
        }
    }

    /// Check if this is a setup error
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::CryptoSetup(_))
    }

    /// Check if this is an execution error
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::CryptoExecution(_))
    }

    /// Check if this is a format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// Which side of the codec a conversion was running on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToStorage,
    FromStorage,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToStorage => write!(f, "to storage"),
            Direction::FromStorage => write!(f, "from storage"),
        }
    }
}

/// The single error returned by the codec boundary
///
/// Carries the underlying [`CryptoError`] as its source. The message never
/// includes the attribute value or the key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("attribute conversion {direction} failed")]
pub struct ConversionError {
    direction: Direction,
    #[source]
    cause: CryptoError,
}

impl ConversionError {
    pub fn new(direction: Direction, cause: CryptoError) -> Self {
        Self { direction, cause }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The underlying failure
    pub fn cause(&self) -> &CryptoError {
        &self.cause
    }

    pub fn into_cause(self) -> CryptoError {
        self.cause
    }
}

/// The main error type for fieldcrypt operations outside the codec
#[derive(Error, Debug)]
pub enum FieldCryptError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A codec conversion failed
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl FieldCryptError {
    /// Check if this is a conversion error
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion(_))
    }
}

impl From<std::io::Error> for FieldCryptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FieldCryptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fieldcrypt operations
pub type FieldCryptResult<T> = Result<T, FieldCryptError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = FieldCryptError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_conversion_error_keeps_cause() {
        let cause = CryptoError::CryptoSetup("invalid key length 5".into());
        let err = ConversionError::new(Direction::ToStorage, cause.clone());

        assert_eq!(err.to_string(), "attribute conversion to storage failed");
        assert_eq!(err.cause(), &cause);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "cipher setup failed: invalid key length 5");
    }

    #[test]
    fn test_format_error_display() {
        let err = CryptoError::format("date", "input contains invalid characters");
        assert_eq!(
            err.to_string(),
            "invalid date format: input contains invalid characters"
        );
        assert!(err.is_format());
        assert!(!err.is_setup());
    }

    #[test]
    fn test_from_conversion_error() {
        let err: FieldCryptError = ConversionError::new(
            Direction::FromStorage,
            CryptoError::CryptoExecution("bad padding".into()),
        )
        .into();
        assert!(err.is_conversion());
        assert_eq!(err.to_string(), "attribute conversion from storage failed");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FieldCryptError = io_err.into();
        assert!(matches!(err, FieldCryptError::Io(_)));
    }
}
