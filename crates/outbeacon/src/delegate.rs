//! The callback surface handed to the native layer.
//!
//! [`BeaconDelegate`] is a cheaply cloneable handle around one shared state
//! allocation. The native side invokes the `on_*` callbacks, possibly from
//! plain threads outside the async runtime; none of them block or await.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{OutbeaconError, Result};
use crate::events::{DetectionSink, DetectionStream, InitSlot, ResponseQueue};
use crate::types::Detection;

#[derive(Debug)]
struct DelegateState {
    init: InitSlot,
    detecting: ResponseQueue<bool>,
    bluetooth_supported: ResponseQueue<bool>,
    bluetooth_enabled: ResponseQueue<bool>,
    detections: DetectionSink,
}

/// Delegate through which the native layer reports events.
///
/// Passed to [`NativeBridge::init`](crate::NativeBridge::init); the native
/// side keeps a clone and invokes the callbacks below. All clones share the
/// same state, which is allocated exactly once per
/// [`BeaconDetector`](crate::BeaconDetector).
#[derive(Debug, Clone)]
pub struct BeaconDelegate {
    inner: Arc<DelegateState>,
}

impl BeaconDelegate {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(DelegateState {
                init: InitSlot::new(),
                detecting: ResponseQueue::new(),
                bluetooth_supported: ResponseQueue::new(),
                bluetooth_enabled: ResponseQueue::new(),
                detections: DetectionSink::new(),
            }),
        }
    }

    /// `true` if both handles point at the same state allocation.
    pub(crate) fn shares_state_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // -------------------------------------------------------------------
    // Native-facing callbacks
    // -------------------------------------------------------------------

    /// Report the outcome of initialization.
    ///
    /// `Err` carries the opaque error value the native SDK supplied. A call
    /// with no initialization pending is ignored.
    pub fn on_init(&self, result: std::result::Result<(), String>) {
        let settled = self
            .inner
            .init
            .settle(result.map_err(OutbeaconError::InitFailed));
        if !settled {
            warn!("on_init with no pending initialization; ignoring");
        }
    }

    /// Report a beacon detection.
    pub fn on_beacon_detected(&self, detection: Detection) {
        let delivered = self.inner.detections.emit(&detection);
        if delivered == 0 {
            debug!(token = %detection.token, "detection emitted with no subscribers");
        }
    }

    /// Answer a pending [`is_detecting`](crate::BeaconDetector::is_detecting) query.
    pub fn on_is_detecting(&self, value: bool) {
        if !self.inner.detecting.resolve(value) {
            warn!("on_is_detecting with no pending query; ignoring");
        }
    }

    /// Answer a pending [`is_bluetooth_supported`](crate::BeaconDetector::is_bluetooth_supported) query.
    pub fn on_is_bluetooth_supported(&self, value: bool) {
        if !self.inner.bluetooth_supported.resolve(value) {
            warn!("on_is_bluetooth_supported with no pending query; ignoring");
        }
    }

    /// Answer a pending [`is_bluetooth_enabled`](crate::BeaconDetector::is_bluetooth_enabled) query.
    pub fn on_is_bluetooth_enabled(&self, value: bool) {
        if !self.inner.bluetooth_enabled.resolve(value) {
            warn!("on_is_bluetooth_enabled with no pending query; ignoring");
        }
    }

    // -------------------------------------------------------------------
    // Facade-facing registration
    // -------------------------------------------------------------------

    pub(crate) fn arm_init(&self) -> oneshot::Receiver<Result<()>> {
        self.inner.init.arm()
    }

    pub(crate) fn expect_is_detecting(&self) -> oneshot::Receiver<bool> {
        self.inner.detecting.push()
    }

    pub(crate) fn expect_bluetooth_supported(&self) -> oneshot::Receiver<bool> {
        self.inner.bluetooth_supported.push()
    }

    pub(crate) fn expect_bluetooth_enabled(&self) -> oneshot::Receiver<bool> {
        self.inner.bluetooth_enabled.push()
    }

    pub(crate) fn subscribe(&self) -> DetectionStream {
        self.inner.detections.subscribe()
    }
}
