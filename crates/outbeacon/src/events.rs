//! Callback-to-future bridging primitives.
//!
//! The native layer reports results by invoking delegate callbacks from
//! outside the async runtime. This module provides the sinks that turn those
//! callbacks into awaitable values:
//!
//! - [`InitSlot`] - a single pending one-shot, settled exactly once per arm
//! - [`ResponseQueue`] - a FIFO of pending one-shots for id-less queries
//! - [`DetectionSink`] / [`DetectionStream`] - multi-shot fan-out to any
//!   number of independent subscribers
//!
//! All sink operations are non-blocking and never await, so they are safe to
//! call from plain native callback threads.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::{mpsc, oneshot};

use crate::error::{OutbeaconError, Result};
use crate::types::Detection;

/// A single pending one-shot result.
///
/// Arming the slot while a previous arm is still pending drops the old
/// sender, which resolves the superseded future with
/// [`OutbeaconError::ResponseDropped`].
#[derive(Debug, Default)]
pub(crate) struct InitSlot {
    pending: Mutex<Option<oneshot::Sender<Result<()>>>>,
}

impl InitSlot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Arm the slot and return the receiving half.
    pub(crate) fn arm(&self) -> oneshot::Receiver<Result<()>> {
        let (tx, rx) = oneshot::channel();
        *self.pending.lock().expect("init slot lock poisoned") = Some(tx);
        rx
    }

    /// Settle the pending one-shot, if any.
    ///
    /// Returns `false` when nothing was armed (a duplicate or unsolicited
    /// native callback).
    pub(crate) fn settle(&self, result: Result<()>) -> bool {
        let sender = self.pending.lock().expect("init slot lock poisoned").take();
        match sender {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }
}

/// Await an armed receiver, mapping a dropped sender to [`OutbeaconError::ResponseDropped`].
pub(crate) async fn settled<T>(rx: oneshot::Receiver<T>) -> Result<T> {
    rx.await.map_err(|_| OutbeaconError::ResponseDropped)
}

/// FIFO queue of pending one-shot resolvers.
///
/// The native callbacks for capability queries carry no request identifier,
/// so responses are matched to requests purely by order: each response
/// settles the oldest pending resolver.
#[derive(Debug)]
pub(crate) struct ResponseQueue<T> {
    pending: Mutex<VecDeque<oneshot::Sender<T>>>,
}

impl<T> ResponseQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Enqueue a resolver and return the receiving half.
    pub(crate) fn push(&self) -> oneshot::Receiver<T> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .expect("response queue lock poisoned")
            .push_back(tx);
        rx
    }

    /// Settle the oldest pending resolver with `value`.
    ///
    /// Resolvers whose callers have gone away are skipped. Returns `false`
    /// when no live resolver was waiting.
    pub(crate) fn resolve(&self, mut value: T) -> bool {
        let mut pending = self.pending.lock().expect("response queue lock poisoned");
        while let Some(tx) = pending.pop_front() {
            if let Err(unsent) = tx.send(value) {
                // Caller dropped its future; try the next one in line.
                value = unsent;
                continue;
            }
            return true;
        }
        false
    }
}

/// Multi-shot fan-out of detection records.
///
/// Each [`subscribe`](Self::subscribe) call creates an independent unbounded
/// subscription that observes every detection emitted from that point on.
/// Dropped subscriptions are pruned on the next emit.
#[derive(Debug, Default)]
pub(crate) struct DetectionSink {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Detection>>>,
}

impl DetectionSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a new subscription.
    pub(crate) fn subscribe(&self) -> DetectionStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .expect("detection sink lock poisoned")
            .push(tx);
        DetectionStream { rx }
    }

    /// Deliver `detection` to every live subscriber.
    ///
    /// Returns how many subscribers received it.
    pub(crate) fn emit(&self, detection: &Detection) -> usize {
        let mut subscribers = self.subscribers.lock().expect("detection sink lock poisoned");
        subscribers.retain(|tx| tx.send(detection.clone()).is_ok());
        subscribers.len()
    }
}

/// Lazy, unbounded stream of [`Detection`] records.
///
/// Produced by [`BeaconDetector::detections`](crate::BeaconDetector::detections).
/// The stream never ends on its own; it yields for as long as the delegate
/// that feeds it is alive.
#[derive(Debug)]
pub struct DetectionStream {
    rx: mpsc::UnboundedReceiver<Detection>,
}

impl Stream for DetectionStream {
    type Item = Detection;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Detection>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Proximity;
    use futures::StreamExt;

    fn detection(token: &str) -> Detection {
        Detection {
            token: token.to_string(),
            rssi: -70,
            proximity: Proximity::Far,
            venue: None,
            payload: None,
        }
    }

    #[tokio::test]
    async fn test_init_slot_settles_exactly_once() {
        let slot = InitSlot::new();
        let rx = slot.arm();

        assert!(slot.settle(Ok(())));
        // Nothing left to settle.
        assert!(!slot.settle(Ok(())));

        assert!(settled(rx).await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_init_slot_rearm_drops_previous() {
        let slot = InitSlot::new();
        let first = slot.arm();
        let second = slot.arm();

        assert!(slot.settle(Ok(())));

        let first = settled(first).await;
        assert!(matches!(first, Err(OutbeaconError::ResponseDropped)));
        assert!(settled(second).await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_response_queue_resolves_in_fifo_order() {
        let queue = ResponseQueue::new();
        let first = queue.push();
        let second = queue.push();

        assert!(queue.resolve(true));
        assert!(queue.resolve(false));

        assert!(settled(first).await.unwrap());
        assert!(!settled(second).await.unwrap());
    }

    #[tokio::test]
    async fn test_response_queue_skips_cancelled_callers() {
        let queue = ResponseQueue::new();
        drop(queue.push());
        let live = queue.push();

        assert!(queue.resolve(true));
        assert!(settled(live).await.unwrap());
    }

    #[test]
    fn test_response_queue_ignores_unsolicited_response() {
        let queue: ResponseQueue<bool> = ResponseQueue::new();
        assert!(!queue.resolve(true));
    }

    #[tokio::test]
    async fn test_sink_delivers_in_emission_order() {
        let sink = DetectionSink::new();
        let mut stream = sink.subscribe();

        let inputs = vec![detection("a"), detection("b"), detection("c")];
        for d in &inputs {
            assert_eq!(sink.emit(d), 1);
        }

        for expected in &inputs {
            let got = stream.next().await.unwrap();
            assert_eq!(&got, expected);
        }
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_only_later_records() {
        let sink = DetectionSink::new();
        let mut early = sink.subscribe();

        sink.emit(&detection("before"));
        let mut late = sink.subscribe();
        sink.emit(&detection("after"));

        assert_eq!(early.next().await.unwrap().token, "before");
        assert_eq!(early.next().await.unwrap().token, "after");
        assert_eq!(late.next().await.unwrap().token, "after");
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let sink = DetectionSink::new();
        let keep = sink.subscribe();
        drop(sink.subscribe());

        assert_eq!(sink.emit(&detection("x")), 1);
        drop(keep);
        assert_eq!(sink.emit(&detection("y")), 0);
    }
}
