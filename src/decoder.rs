//! Decode-event streams from camera or video sources
//!
//! Camera plumbing lives outside this crate; a backend implements
//! [`DecodeSource`] and pushes decoded text through the sink half of a
//! subscription until the receiving side stops it. [`ScannerController`]
//! guarantees that at most one stream is live at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use crate::error::Error;

/// One decoded barcode/QR event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeEvent {
    /// Barcode format name reported by the reader
    pub format: String,
    /// Decoded text payload
    pub text: String,
}

/// Sender half of a decode subscription, handed to the backend
pub struct DecodeSink {
    sender: mpsc::Sender<DecodeEvent>,
    stopped: Arc<AtomicBool>,
}

impl DecodeSink {
    /// Deliver an event into the subscription
    ///
    /// Returns `false` once the subscription has been stopped; the backend
    /// should then shut its stream down. Events delivered against a
    /// stopped subscription are discarded silently.
    pub async fn deliver(&self, event: DecodeEvent) -> bool {
        if self.stopped.load(Ordering::SeqCst) {
            return false;
        }
        self.sender.send(event).await.is_ok()
    }

    /// Whether the receiving side has stopped the subscription
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// A cancellable stream of decode events from one device
pub struct DecodeSubscription {
    receiver: mpsc::Receiver<DecodeEvent>,
    stopped: Arc<AtomicBool>,
    device_id: String,
}

impl DecodeSubscription {
    /// Create a connected sink/subscription pair for `device_id`
    pub fn channel(device_id: &str, capacity: usize) -> (DecodeSink, DecodeSubscription) {
        let (sender, receiver) = mpsc::channel(capacity);
        let stopped = Arc::new(AtomicBool::new(false));

        let sink = DecodeSink {
            sender,
            stopped: stopped.clone(),
        };
        let subscription = DecodeSubscription {
            receiver,
            stopped,
            device_id: device_id.to_string(),
        };
        (sink, subscription)
    }

    /// Next decode event; `None` once the stream is stopped or the backend
    /// has gone away
    pub async fn next(&mut self) -> Option<DecodeEvent> {
        if self.is_stopped() {
            return None;
        }
        self.receiver.recv().await
    }

    /// Stop the stream
    ///
    /// Idempotent. Pending buffered events are dropped and the backend's
    /// next `deliver` returns `false`.
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.receiver.close();
    }

    /// Whether the stream has been stopped
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Identifier of the device feeding this stream
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

impl Drop for DecodeSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A camera or video source that can produce decode events
pub trait DecodeSource {
    /// Device identifiers available for scanning, in discovery order
    fn list_devices(&self) -> Result<Vec<String>, Error>;

    /// Start decoding from `device_id` until the subscription is stopped
    fn subscribe(&self, device_id: &str) -> Result<DecodeSubscription, Error>;
}

/// Owns the single active decode stream for a scan screen
///
/// Switching devices stops the previous stream before the next one starts,
/// so two devices never race to deliver events into the same scan cycle.
pub struct ScannerController<S: DecodeSource> {
    source: S,
    active: Option<DecodeSubscription>,
}

impl<S: DecodeSource> ScannerController<S> {
    /// Create a controller with no active stream
    pub fn new(source: S) -> Self {
        Self {
            source,
            active: None,
        }
    }

    /// Start scanning on the first available device
    pub fn start(&mut self) -> Result<(), Error> {
        let device = self
            .source
            .list_devices()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::decoder("no video input devices available"))?;
        self.select_device(&device)
    }

    /// Switch the active stream to `device_id`, stopping any previous one
    /// first
    pub fn select_device(&mut self, device_id: &str) -> Result<(), Error> {
        self.stop();
        self.active = Some(self.source.subscribe(device_id)?);
        Ok(())
    }

    /// Next event from the active stream; `None` when no stream is active
    /// or the stream has ended
    pub async fn next_event(&mut self) -> Option<DecodeEvent> {
        match self.active.as_mut() {
            Some(subscription) => subscription.next().await,
            None => None,
        }
    }

    /// Stop the active stream, if any (leaving the scan screen)
    pub fn stop(&mut self) {
        if let Some(mut subscription) = self.active.take() {
            subscription.stop();
            debug!("stopped decode stream on {}", subscription.device_id());
        }
    }

    /// Identifier of the currently active device
    pub fn active_device(&self) -> Option<&str> {
        self.active.as_ref().map(DecodeSubscription::device_id)
    }
}
