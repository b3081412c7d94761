//! # outbeacon
//!
//! Typed async binding to the Outbeacon native beacon-detection SDK.
//!
//! The native SDK does all the actual work (beacon scanning, RSSI
//! computation, proximity classification); this crate relays calls to a
//! [`NativeBridge`] handle supplied by the platform glue and turns the
//! native callback notifications into awaitable results and a
//! [`futures::Stream`] of [`Detection`] records.
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`detector`] - the [`BeaconDetector`] facade, the single entry point
//! - [`bridge`] - the [`NativeBridge`] trait implemented by platform glue
//! - [`delegate`] - the [`BeaconDelegate`] callback surface the native
//!   layer invokes
//! - [`events`] - one-shot and multi-shot sinks bridging callbacks to
//!   futures and streams
//! - [`types`] - detection records, venue metadata, proximity and mode enums
//! - [`config`] - declarative detector configuration
//! - [`error`] - unified error types for the crate
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use outbeacon::{BeaconDetector, DetectionMode, NativeBridge};
//!
//! async fn run(bridge: Arc<dyn NativeBridge>) -> outbeacon::Result<()> {
//!     let detector = BeaconDetector::new(bridge);
//!     detector.initialize("api-key", "api-secret").await?;
//!     detector.set_mode(DetectionMode::Walk);
//!     detector.start_detection();
//!
//!     let mut detections = detector.detections();
//!     while let Some(detection) = detections.next().await {
//!         println!("{} at {} dBm", detection.token, detection.rssi);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod bridge;
pub mod config;
pub mod delegate;
pub mod detector;
pub mod error;
pub mod events;
#[cfg(any(test, feature = "mock-bridge"))]
pub mod mock;
pub mod types;

// Re-export primary types for convenience
pub use bridge::NativeBridge;
pub use config::{Cadence, DetectorConfig};
pub use delegate::BeaconDelegate;
pub use detector::BeaconDetector;
pub use error::{OutbeaconError, Result};
pub use events::DetectionStream;
#[cfg(any(test, feature = "mock-bridge"))]
pub use mock::{BridgeCall, MockBridge};
pub use types::{Detection, DetectionMode, Proximity, Venue};
