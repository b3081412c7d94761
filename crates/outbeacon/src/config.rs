//! Declarative detector configuration.
//!
//! Lets host applications keep SDK credentials and scan cadence in a TOML
//! file and apply them in one call via
//! [`BeaconDetector::apply`](crate::BeaconDetector::apply).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OutbeaconError, Result};
use crate::types::DetectionMode;

/// Scan cadence selected by a [`DetectorConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// One of the native presets.
    Preset(DetectionMode),
    /// Explicit scan/idle intervals in milliseconds.
    Custom {
        /// How long each scan burst runs.
        scan_ms: u32,
        /// How long the radio idles between bursts.
        idle_ms: u32,
    },
}

/// Detector configuration.
///
/// Cadence is optional: set `preset` for one of the native presets, or
/// `scan_ms` together with `idle_ms` for an explicit cadence, but not both.
///
/// ```toml
/// api_key = "pk_live_..."
/// api_secret = "sk_live_..."
/// preset = "walk"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// API key issued for the application.
    pub api_key: String,

    /// API secret paired with the key.
    pub api_secret: String,

    /// Preset scan cadence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<DetectionMode>,

    /// Custom scan interval in milliseconds. Requires `idle_ms`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_ms: Option<u32>,

    /// Custom idle interval in milliseconds. Requires `scan_ms`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_ms: Option<u32>,
}

impl DetectorConfig {
    /// Create a configuration with credentials only.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            preset: None,
            scan_ms: None,
            idle_ms: None,
        }
    }

    /// Load and validate a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// parsed configuration is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            OutbeaconError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the configuration is
    /// invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| OutbeaconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate credentials and cadence selection.
    ///
    /// # Errors
    ///
    /// Returns [`OutbeaconError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(invalid("api_key", "must not be empty"));
        }
        if self.api_secret.trim().is_empty() {
            return Err(invalid("api_secret", "must not be empty"));
        }
        if self.preset.is_some() && (self.scan_ms.is_some() || self.idle_ms.is_some()) {
            return Err(invalid(
                "preset",
                "cannot be combined with scan_ms/idle_ms",
            ));
        }
        match (self.scan_ms, self.idle_ms) {
            (Some(0), _) => return Err(invalid("scan_ms", "must be greater than zero")),
            (_, Some(0)) => return Err(invalid("idle_ms", "must be greater than zero")),
            (Some(_), None) => return Err(invalid("idle_ms", "required when scan_ms is set")),
            (None, Some(_)) => return Err(invalid("scan_ms", "required when idle_ms is set")),
            _ => {}
        }
        Ok(())
    }

    /// The cadence this configuration selects, if any.
    ///
    /// Assumes the configuration passed [`validate`](Self::validate).
    #[must_use]
    pub const fn cadence(&self) -> Option<Cadence> {
        if let Some(preset) = self.preset {
            return Some(Cadence::Preset(preset));
        }
        match (self.scan_ms, self.idle_ms) {
            (Some(scan_ms), Some(idle_ms)) => Some(Cadence::Custom { scan_ms, idle_ms }),
            _ => None,
        }
    }
}

fn invalid(field: &'static str, message: &str) -> OutbeaconError {
    OutbeaconError::InvalidConfig {
        field,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_preset_config() {
        let config = DetectorConfig::from_toml_str(
            r#"
            api_key = "pk"
            api_secret = "sk"
            preset = "looking"
            "#,
        )
        .unwrap();
        assert_eq!(config.cadence(), Some(Cadence::Preset(DetectionMode::Looking)));
    }

    #[test]
    fn test_parses_custom_cadence() {
        let config = DetectorConfig::from_toml_str(
            r#"
            api_key = "pk"
            api_secret = "sk"
            scan_ms = 3000
            idle_ms = 9000
            "#,
        )
        .unwrap();
        assert_eq!(
            config.cadence(),
            Some(Cadence::Custom {
                scan_ms: 3000,
                idle_ms: 9000
            })
        );
    }

    #[test]
    fn test_credentials_only_config_has_no_cadence() {
        let config = DetectorConfig::new("pk", "sk");
        config.validate().unwrap();
        assert_eq!(config.cadence(), None);
    }

    #[test]
    fn test_rejects_empty_credentials() {
        let err = DetectorConfig::new("", "sk").validate().unwrap_err();
        assert!(format!("{err}").contains("api_key"));

        let err = DetectorConfig::new("pk", "  ").validate().unwrap_err();
        assert!(format!("{err}").contains("api_secret"));
    }

    #[test]
    fn test_rejects_preset_combined_with_custom() {
        let mut config = DetectorConfig::new("pk", "sk");
        config.preset = Some(DetectionMode::Stay);
        config.scan_ms = Some(1000);
        config.idle_ms = Some(1000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_half_specified_or_zero_cadence() {
        let mut config = DetectorConfig::new("pk", "sk");
        config.scan_ms = Some(1000);
        assert!(config.validate().is_err());

        config.idle_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = DetectorConfig::from_toml_str("api_key = ").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = DetectorConfig::new("pk", "sk");
        config.preset = Some(DetectionMode::Walk);

        let rendered = toml::to_string(&config).unwrap();
        let parsed = DetectorConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
