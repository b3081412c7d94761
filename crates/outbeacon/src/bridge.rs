//! The native-SDK boundary.
//!
//! The platform glue that owns the real beacon SDK handle implements
//! [`NativeBridge`]; this crate only relays calls to it and awaits the
//! results it reports back through the [`BeaconDelegate`] callbacks.

use crate::delegate::BeaconDelegate;
use crate::types::DetectionMode;

/// Handle to the native beacon-detection SDK.
///
/// Every method is a non-blocking relay: the native side acknowledges
/// nothing directly and reports results, if any, by invoking the delegate it
/// received in [`init`](Self::init). Implementations must be callable from
/// any thread.
pub trait NativeBridge: Send + Sync {
    /// Initialize the SDK with API credentials.
    ///
    /// The native side must keep `delegate` and call
    /// [`BeaconDelegate::on_init`] exactly once with the outcome, then use
    /// the same delegate for all later notifications.
    fn init(&self, key: &str, secret: &str, delegate: BeaconDelegate);

    /// Start beacon detection.
    fn start_detection(&self);

    /// Stop beacon detection.
    fn stop_detection(&self);

    /// Select a preset scan cadence.
    fn set_mode(&self, mode: DetectionMode);

    /// Set an explicit scan/idle cadence in milliseconds.
    fn set_custom_mode(&self, scan_ms: u32, idle_ms: u32);

    /// Ask whether detection is currently running.
    ///
    /// Answered via [`BeaconDelegate::on_is_detecting`].
    fn query_is_detecting(&self);

    /// Ask whether the device supports Bluetooth LE.
    ///
    /// Answered via [`BeaconDelegate::on_is_bluetooth_supported`].
    fn query_bluetooth_supported(&self);

    /// Ask whether Bluetooth is currently enabled.
    ///
    /// Answered via [`BeaconDelegate::on_is_bluetooth_enabled`].
    fn query_bluetooth_enabled(&self);
}
