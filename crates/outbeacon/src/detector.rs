//! The detector facade.
//!
//! [`BeaconDetector`] is the single entry point of the binding: it relays
//! calls to the [`NativeBridge`] it was constructed with and turns the
//! native delegate callbacks into awaitable results and detection streams.

use std::sync::Arc;

use tracing::debug;

use crate::bridge::NativeBridge;
use crate::config::{Cadence, DetectorConfig};
use crate::delegate::BeaconDelegate;
use crate::error::Result;
use crate::events::{settled, DetectionStream};
use crate::types::DetectionMode;

/// Typed facade over the native beacon-detection SDK.
///
/// Construct one per bridge and clone it freely; all clones share a single
/// delegate allocation. `initialize` must complete before detection or
/// queries produce meaningful results; the facade does not enforce that
/// ordering, matching the native contract.
#[derive(Clone)]
pub struct BeaconDetector {
    bridge: Arc<dyn NativeBridge>,
    delegate: BeaconDelegate,
}

impl BeaconDetector {
    /// Create a detector bound to `bridge`.
    #[must_use]
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        Self {
            bridge,
            delegate: BeaconDelegate::new(),
        }
    }

    /// Initialize the native SDK with API credentials.
    ///
    /// Resolves once the native side reports the outcome: `Ok(())` on
    /// success, [`InitFailed`](crate::OutbeaconError::InitFailed) carrying
    /// the native error otherwise, exactly once per call. Re-issuing
    /// `initialize` while a previous call is pending supersedes it; the
    /// superseded call resolves with
    /// [`ResponseDropped`](crate::OutbeaconError::ResponseDropped).
    ///
    /// # Errors
    ///
    /// Returns the native initialization error, or `ResponseDropped` if the
    /// response channel was torn down first.
    pub async fn initialize(&self, key: &str, secret: &str) -> Result<()> {
        debug!("initializing native SDK");
        let rx = self.delegate.arm_init();
        self.bridge.init(key, secret, self.delegate.clone());
        settled(rx).await?
    }

    /// Validate `config`, initialize, and apply its cadence.
    ///
    /// # Errors
    ///
    /// Returns a validation error before touching the bridge, or whatever
    /// [`initialize`](Self::initialize) returns.
    pub async fn apply(&self, config: &DetectorConfig) -> Result<()> {
        config.validate()?;
        self.initialize(&config.api_key, &config.api_secret).await?;
        match config.cadence() {
            Some(Cadence::Preset(mode)) => self.set_mode(mode),
            Some(Cadence::Custom { scan_ms, idle_ms }) => self.set_custom_mode(scan_ms, idle_ms),
            None => {}
        }
        Ok(())
    }

    /// Start beacon detection. Fire-and-forget.
    pub fn start_detection(&self) {
        self.bridge.start_detection();
    }

    /// Stop beacon detection. Fire-and-forget.
    pub fn stop_detection(&self) {
        self.bridge.stop_detection();
    }

    /// Select a preset scan cadence. Fire-and-forget.
    pub fn set_mode(&self, mode: DetectionMode) {
        self.bridge.set_mode(mode);
    }

    /// Set an explicit scan/idle cadence in milliseconds. Fire-and-forget.
    pub fn set_custom_mode(&self, scan_ms: u32, idle_ms: u32) {
        self.bridge.set_custom_mode(scan_ms, idle_ms);
    }

    /// Subscribe to beacon detections.
    ///
    /// Each call creates an independent subscription that observes every
    /// detection reported from that point on, in emission order, for as long
    /// as the process runs. Dropping the stream ends only that subscription.
    #[must_use]
    pub fn detections(&self) -> DetectionStream {
        self.delegate.subscribe()
    }

    /// Whether detection is currently running.
    ///
    /// Queries of the same kind issued concurrently are answered in the
    /// order they were issued.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseDropped`](crate::OutbeaconError::ResponseDropped)
    /// if the delegate is torn down before the native side answers.
    pub async fn is_detecting(&self) -> Result<bool> {
        let rx = self.delegate.expect_is_detecting();
        self.bridge.query_is_detecting();
        settled(rx).await
    }

    /// Whether the device supports Bluetooth LE.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseDropped`](crate::OutbeaconError::ResponseDropped)
    /// if the delegate is torn down before the native side answers.
    pub async fn is_bluetooth_supported(&self) -> Result<bool> {
        let rx = self.delegate.expect_bluetooth_supported();
        self.bridge.query_bluetooth_supported();
        settled(rx).await
    }

    /// Whether Bluetooth is currently enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseDropped`](crate::OutbeaconError::ResponseDropped)
    /// if the delegate is torn down before the native side answers.
    pub async fn is_bluetooth_enabled(&self) -> Result<bool> {
        let rx = self.delegate.expect_bluetooth_enabled();
        self.bridge.query_bluetooth_enabled();
        settled(rx).await
    }
}
