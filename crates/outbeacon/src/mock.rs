//! Mock native bridge for tests.
//!
//! [`MockBridge`] records every relayed call and lets tests play the native
//! side: complete initialization, answer capability queries, and emit
//! detections through the delegate it was handed. Enabled for this crate's
//! tests and, behind the `mock-bridge` feature, for downstream test suites.

use std::sync::Mutex;

use crate::bridge::NativeBridge;
use crate::delegate::BeaconDelegate;
use crate::types::{Detection, DetectionMode};

/// A call relayed to the native bridge, as recorded by [`MockBridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    /// `init` with the given credentials.
    Init {
        /// API key.
        key: String,
        /// API secret.
        secret: String,
    },
    /// `start_detection`.
    StartDetection,
    /// `stop_detection`.
    StopDetection,
    /// `set_mode` with the given preset.
    SetMode(DetectionMode),
    /// `set_custom_mode` with the given intervals.
    SetCustomMode {
        /// Scan interval in milliseconds.
        scan_ms: u32,
        /// Idle interval in milliseconds.
        idle_ms: u32,
    },
    /// `query_is_detecting`.
    QueryIsDetecting,
    /// `query_bluetooth_supported`.
    QueryBluetoothSupported,
    /// `query_bluetooth_enabled`.
    QueryBluetoothEnabled,
}

/// In-memory [`NativeBridge`] test double.
#[derive(Debug, Default)]
pub struct MockBridge {
    calls: Mutex<Vec<BridgeCall>>,
    delegate: Mutex<Option<BeaconDelegate>>,
}

impl MockBridge {
    /// Create a mock bridge with an empty call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call relayed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// The delegate received through `init`.
    ///
    /// # Panics
    ///
    /// Panics if `init` has not been called yet.
    #[must_use]
    pub fn delegate(&self) -> BeaconDelegate {
        self.delegate
            .lock()
            .expect("mock delegate slot poisoned")
            .clone()
            .expect("init has not been called")
    }

    /// Simulate the native init callback.
    pub fn complete_init(&self, result: Result<(), String>) {
        self.delegate().on_init(result);
    }

    /// Simulate a native beacon detection.
    pub fn emit_detection(&self, detection: Detection) {
        self.delegate().on_beacon_detected(detection);
    }

    /// Simulate the native answer to an `is_detecting` query.
    pub fn respond_is_detecting(&self, value: bool) {
        self.delegate().on_is_detecting(value);
    }

    /// Simulate the native answer to an `is_bluetooth_supported` query.
    pub fn respond_is_bluetooth_supported(&self, value: bool) {
        self.delegate().on_is_bluetooth_supported(value);
    }

    /// Simulate the native answer to an `is_bluetooth_enabled` query.
    pub fn respond_is_bluetooth_enabled(&self, value: bool) {
        self.delegate().on_is_bluetooth_enabled(value);
    }

    fn record(&self, call: BridgeCall) {
        self.calls.lock().expect("mock call log poisoned").push(call);
    }
}

impl NativeBridge for MockBridge {
    fn init(&self, key: &str, secret: &str, delegate: BeaconDelegate) {
        *self.delegate.lock().expect("mock delegate slot poisoned") = Some(delegate);
        self.record(BridgeCall::Init {
            key: key.to_string(),
            secret: secret.to_string(),
        });
    }

    fn start_detection(&self) {
        self.record(BridgeCall::StartDetection);
    }

    fn stop_detection(&self) {
        self.record(BridgeCall::StopDetection);
    }

    fn set_mode(&self, mode: DetectionMode) {
        self.record(BridgeCall::SetMode(mode));
    }

    fn set_custom_mode(&self, scan_ms: u32, idle_ms: u32) {
        self.record(BridgeCall::SetCustomMode { scan_ms, idle_ms });
    }

    fn query_is_detecting(&self) {
        self.record(BridgeCall::QueryIsDetecting);
    }

    fn query_bluetooth_supported(&self) {
        self.record(BridgeCall::QueryBluetoothSupported);
    }

    fn query_bluetooth_enabled(&self) {
        self.record(BridgeCall::QueryBluetoothEnabled);
    }
}
