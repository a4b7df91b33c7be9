//! The gateway's receive path: validate, decode, remember the latest.

use std::sync::atomic::{AtomicU64, Ordering};

use protocol::{decode, PeerAddress, SensorReading, WireError};
use serde::Serialize;
use tokio::sync::watch;

/// A decoded reading and the radio address it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Received {
    pub reading: SensorReading,
    pub from: PeerAddress,
}

#[derive(Debug, thiserror::Error)]
#[error("dropped datagram from {from}: {source}")]
pub struct CaptureError {
    pub from: PeerAddress,
    #[source]
    pub source: WireError,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CaptureStats {
    pub accepted: u64,
    pub rejected: u64,
}

/// Single-slot holder for the most recent reading.
///
/// [`Capture::on_datagram`] is the only writer. Consumers hold a
/// [`watch::Receiver`] from [`Capture::subscribe`]; `has_changed` on it is
/// the freshness flag and the slot is simply overwritten by whichever node
/// transmitted last.
#[derive(Debug)]
pub struct Capture {
    slot: watch::Sender<Option<Received>>,
    accepted: AtomicU64,
    rejected: AtomicU64,
}

impl Capture {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot,
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    /// Reception handler. Anything that is not exactly one encoded reading
    /// is dropped without touching the slot.
    pub fn on_datagram(&self, from: PeerAddress, data: &[u8]) -> Result<Received, CaptureError> {
        tracing::debug!(len = data.len(), %from, "Received");

        let reading = decode(data).map_err(|source| {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(len = data.len(), %from, "dropping malformed datagram");
            CaptureError { from, source }
        })?;

        if !reading.is_valid() {
            tracing::warn!(location = reading.location_id, %from, "node reported a failed sample");
        }
        tracing::info!(
            location = reading.location_id,
            temp = reading.temperature,
            humidity = reading.humidity,
            pressure = reading.pressure,
            %from,
            "reading"
        );

        let received = Received { reading, from };
        self.slot.send_replace(Some(received));
        self.accepted.fetch_add(1, Ordering::Relaxed);

        Ok(received)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Received>> {
        self.slot.subscribe()
    }

    pub fn latest(&self) -> Option<Received> {
        *self.slot.borrow()
    }

    pub fn stats(&self) -> CaptureStats {
        CaptureStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

impl Default for Capture {
    fn default() -> Self {
        Self::new()
    }
}
