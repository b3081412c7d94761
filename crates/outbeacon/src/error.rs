//! Unified error type for the outbeacon binding.
//!
//! Only initialization has a defined native error path; the fire-and-forget
//! relays have no error signaling at all, so the remaining variants cover
//! the binding's own failure modes (dropped responses, bad configuration).

use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for all outbeacon operations.
#[derive(Debug, Error)]
pub enum OutbeaconError {
    /// The native SDK rejected initialization.
    ///
    /// The message is whatever opaque error value the native layer supplied.
    #[error("Native SDK initialization failed: {0}")]
    InitFailed(String),

    /// A pending native response was dropped before it was settled.
    ///
    /// Happens when the delegate is torn down while a query is in flight, or
    /// when a re-issued `initialize` supersedes a still-pending one.
    #[error("Pending native response was dropped before completion")]
    ResponseDropped,

    /// Detector configuration failed validation.
    #[error("Invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A configuration file could not be read.
    #[error("Failed to read configuration {}: {source}", path.display())]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed as TOML.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

/// A specialized [`Result`] type for outbeacon operations.
pub type Result<T> = std::result::Result<T, OutbeaconError>;

impl OutbeaconError {
    /// Returns `true` if this error came from the native init path.
    #[inline]
    #[must_use]
    pub fn is_init_error(&self) -> bool {
        matches!(self, Self::InitFailed(_))
    }

    /// Returns `true` if this error is related to configuration.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. } | Self::ConfigRead { .. } | Self::ConfigParse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_error_classification() {
        assert!(OutbeaconError::InitFailed("bad key".into()).is_init_error());
        assert!(!OutbeaconError::ResponseDropped.is_init_error());
    }

    #[test]
    fn test_config_error_classification() {
        let err = OutbeaconError::InvalidConfig {
            field: "api_key",
            message: "must not be empty".into(),
        };
        assert!(err.is_config_error());
        assert!(OutbeaconError::ConfigParse("bad toml".into()).is_config_error());
        assert!(!OutbeaconError::InitFailed("x".into()).is_config_error());
    }

    #[test]
    fn test_error_display_messages() {
        let err = OutbeaconError::InitFailed("credentials rejected".into());
        assert!(format!("{err}").contains("credentials rejected"));

        let err = OutbeaconError::InvalidConfig {
            field: "scan_ms",
            message: "must be greater than zero".into(),
        };
        let rendered = format!("{err}");
        assert!(rendered.contains("scan_ms"));
        assert!(rendered.contains("greater than zero"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<OutbeaconError>();
        assert_sync::<OutbeaconError>();
    }
}
