//! Error types for the gesture settings controller.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for gesture settings operations
#[derive(Debug, Error)]
pub enum GestureSettingsError {
    /// Failed to push the gesture mode to hardware
    /// Preserves the underlying error source for full error chain transparency
    #[error("Failed to update gesture mode: {0}")]
    HardwareUpdateFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Logging setup error
    #[error("Logging setup error: {0}")]
    LoggingError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for gesture settings operations
pub type Result<T> = std::result::Result<T, GestureSettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GestureSettingsError::HardwareUpdateFailed(StringError::new("sysfs write"));
        assert_eq!(error.to_string(), "Failed to update gesture mode: sysfs write");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: GestureSettingsError = io_error.into();
        assert!(matches!(error, GestureSettingsError::IoError(_)));
    }

    #[test]
    fn test_error_source_preserved() {
        let error = GestureSettingsError::HardwareUpdateFailed(StringError::new("sysfs write"));
        let source = std::error::Error::source(&error);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), "sysfs write");
    }
}
