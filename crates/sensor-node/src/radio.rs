use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use protocol::PeerAddress;

/// Result reported by the radio's send-completion callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SendStatus {
    Delivered,
    Failed,
}

impl From<u8> for SendStatus {
    /// ESP-NOW reports `0` for a delivered frame and anything else on failure.
    fn from(code: u8) -> Self {
        match code {
            0 => SendStatus::Delivered,
            _ => SendStatus::Failed,
        }
    }
}

/// Send-completion notification, set from the radio callback and awaited by
/// the transmitter.
///
/// On target this lives in a `static` so the C callback can reach it:
///
/// ```ignore
/// static SEND_DONE: SendDone = SendDone::new();
///
/// extern "C" fn on_sent(_mac: *const u8, status: u8) {
///     SEND_DONE.signal(SendStatus::from(status));
/// }
/// ```
pub type SendDone = Signal<CriticalSectionRawMutex, SendStatus>;

/// A connectionless datagram radio in the controller role.
///
/// Implementations report completion of `send` by signalling the
/// [`SendDone`] they were built with, possibly from interrupt context and
/// possibly never.
pub trait Radio {
    type Error: core::fmt::Debug;

    /// Bring the radio up on `channel`.
    fn init(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Register the one peer we talk to. No encryption key.
    fn add_peer(&mut self, peer: PeerAddress, channel: u8) -> Result<(), Self::Error>;

    /// Queue one datagram. `Ok` only means the radio accepted it.
    fn send(&mut self, peer: PeerAddress, payload: &[u8]) -> Result<(), Self::Error>;
}

impl<R: Radio + ?Sized> Radio for &mut R {
    type Error = R::Error;

    fn init(&mut self, channel: u8) -> Result<(), Self::Error> {
        (**self).init(channel)
    }

    fn add_peer(&mut self, peer: PeerAddress, channel: u8) -> Result<(), Self::Error> {
        (**self).add_peer(peer, channel)
    }

    fn send(&mut self, peer: PeerAddress, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).send(peer, payload)
    }
}
