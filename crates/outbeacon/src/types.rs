//! Shared data types for beacon detections.
//!
//! These mirror the records the native SDK reports through the delegate:
//! one immutable [`Detection`] snapshot per event, plus the enums used to
//! configure scan cadence.

use serde::{Deserialize, Serialize};

/// Coarse distance classification derived from RSSI by the native SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Proximity {
    /// Strong signal, beacon is close by.
    Near,
    /// Weak signal, beacon is at the edge of reliable range.
    Far,
    /// Barely detectable signal.
    VeryFar,
    /// The native SDK could not classify the signal.
    Unknown,
}

/// Preset detection cadence understood by the native SDK.
///
/// Presets trade scan frequency against battery use. For explicit control
/// over scan/idle intervals use
/// [`BeaconDetector::set_custom_mode`](crate::BeaconDetector::set_custom_mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Frequent scanning for a user in motion.
    Walk,
    /// Moderate cadence for a user browsing nearby.
    Looking,
    /// Relaxed cadence for a stationary user.
    Stay,
}

/// Venue metadata attached to a detection by the native SDK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Display name of the venue.
    pub name: String,

    /// Screen-reader text for the venue, if provided.
    pub accessibility_text: Option<String>,

    /// Venue latitude in decimal degrees.
    pub latitude: f64,

    /// Venue longitude in decimal degrees.
    pub longitude: f64,

    /// Street address, if provided.
    pub address: Option<String>,

    /// Venue URL, if provided.
    pub url: Option<String>,
}

/// A single beacon detection event.
///
/// Immutable snapshot of what the native SDK saw; there is no persisted
/// identity beyond the match token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Match token identifying the detected beacon.
    pub token: String,

    /// Received signal strength in dBm.
    pub rssi: i16,

    /// Proximity classification computed natively from RSSI.
    pub proximity: Proximity,

    /// Venue metadata, when the beacon is registered to one.
    pub venue: Option<Venue>,

    /// Opaque application-defined payload attached to the beacon.
    pub payload: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_detection() -> Detection {
        Detection {
            token: "tok-1f2e".to_string(),
            rssi: -64,
            proximity: Proximity::Near,
            venue: Some(Venue {
                name: "North Entrance".to_string(),
                accessibility_text: Some("North entrance, street level".to_string()),
                latitude: 35.6595,
                longitude: 139.7005,
                address: Some("1-2-3 Example St".to_string()),
                url: Some("https://example.com/venues/north".to_string()),
            }),
            payload: Some("{\"campaign\":42}".to_string()),
        }
    }

    #[test]
    fn test_proximity_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Proximity::VeryFar).unwrap(),
            "\"very-far\""
        );
        assert_eq!(serde_json::to_string(&Proximity::Near).unwrap(), "\"near\"");
        let parsed: Proximity = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(parsed, Proximity::Unknown);
    }

    #[test]
    fn test_detection_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DetectionMode::Walk).unwrap(), "\"walk\"");
        let parsed: DetectionMode = serde_json::from_str("\"stay\"").unwrap();
        assert_eq!(parsed, DetectionMode::Stay);
    }

    #[test]
    fn test_detection_round_trips_through_json() {
        let detection = sample_detection();
        let json = serde_json::to_string(&detection).unwrap();
        let parsed: Detection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, detection);
    }

    #[test]
    fn test_detection_without_venue_or_payload() {
        let json = r#"{"token":"tok-9","rssi":-88,"proximity":"far","venue":null,"payload":null}"#;
        let parsed: Detection = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.token, "tok-9");
        assert_eq!(parsed.proximity, Proximity::Far);
        assert!(parsed.venue.is_none());
        assert!(parsed.payload.is_none());
    }
}
