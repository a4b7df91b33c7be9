use std::io;
use std::net::SocketAddr;

use protocol::frame::{Frame, ACK_DELIVERED, MAX_FRAME_LEN};
use protocol::PeerAddress;
use tokio::net::UdpSocket;

use crate::capture::Capture;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("radio link socket: {0}")]
    Io(#[from] io::Error),
}

/// Receive side of the emulated air interface.
///
/// Listens on one UDP socket for frames from any sender. Frames on our
/// channel and addressed to us are acknowledged to the sender and handed to
/// [`Capture::on_datagram`]; everything else is dropped unanswered. No peer
/// is registered up front and senders are never filtered.
pub struct UdpLink {
    socket: UdpSocket,
    channel: u8,
    address: PeerAddress,
}

impl UdpLink {
    pub async fn bind(
        addr: SocketAddr,
        channel: u8,
        address: PeerAddress,
    ) -> Result<Self, LinkError> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self {
            socket,
            channel,
            address,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, LinkError> {
        Ok(self.socket.local_addr()?)
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn address(&self) -> PeerAddress {
        self.address
    }

    /// Feed every received frame to `capture` until the socket fails.
    pub async fn run(&self, capture: &Capture) -> Result<(), LinkError> {
        let mut buf = [0u8; MAX_FRAME_LEN + 1];

        loop {
            let (len, peer) = self.socket.recv_from(&mut buf).await?;

            let frame = match Frame::parse(&buf[..len]) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::debug!(%peer, "ignoring unframed datagram: {e}");
                    continue;
                }
            };

            if frame.channel != self.channel {
                tracing::trace!(channel = frame.channel, src = %frame.src, "off-channel frame");
                continue;
            }

            if frame.dst != self.address {
                tracing::trace!(dst = %frame.dst, src = %frame.src, "frame for another station");
                continue;
            }

            // acked on arrival, before the payload is looked at
            if let Err(e) = self.socket.send_to(&[ACK_DELIVERED], peer).await {
                tracing::debug!(%peer, "ack not sent: {e}");
            }

            if let Err(e) = capture.on_datagram(frame.src, frame.payload) {
                tracing::debug!(src = %e.from, "frame not captured: {}", e.source);
            }
        }
    }
}
