//! Radio frame used when the air interface is emulated over UDP.
//!
//! `channel (1) | destination (6) | source (6) | payload`. On real hardware
//! the radio stack supplies all three header fields itself; on a host they
//! travel in front of the payload so the gateway can filter and attribute
//! exactly as it would over the air.
//!
//! A receiver that accepts a frame addressed to it answers the sender with a
//! single status byte, standing in for the link-layer acknowledgement.
//! [`ACK_DELIVERED`] means the frame arrived; no reply means it did not.

use bytes::{Buf, BufMut};

use crate::{PeerAddress, WireError, MAX_PAYLOAD_LEN};

pub const FRAME_HEADER_LEN: usize = 13;
pub const MAX_FRAME_LEN: usize = FRAME_HEADER_LEN + MAX_PAYLOAD_LEN;

/// Status byte sent back for a frame that reached its destination.
pub const ACK_DELIVERED: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub channel: u8,
    pub dst: PeerAddress,
    pub src: PeerAddress,
    pub payload: &'a [u8],
}

fn get_address(bytes: &mut &[u8]) -> PeerAddress {
    let mut address = [0u8; 6];
    bytes.copy_to_slice(&mut address);
    PeerAddress::from(address)
}

impl<'a> Frame<'a> {
    pub fn parse(mut bytes: &'a [u8]) -> Result<Self, WireError> {
        if bytes.len() < FRAME_HEADER_LEN {
            return Err(WireError::Truncated {
                needed: FRAME_HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let channel = bytes.get_u8();
        let dst = get_address(&mut bytes);
        let src = get_address(&mut bytes);

        if bytes.len() > MAX_PAYLOAD_LEN {
            return Err(WireError::PayloadTooLarge {
                size: bytes.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        Ok(Self {
            channel,
            dst,
            src,
            payload: bytes,
        })
    }

    /// Write the frame into `buf`, returning the number of bytes used.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        if self.payload.len() > MAX_PAYLOAD_LEN {
            return Err(WireError::PayloadTooLarge {
                size: self.payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        let needed = FRAME_HEADER_LEN + self.payload.len();
        if buf.len() < needed {
            return Err(WireError::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }

        let mut out = &mut buf[..needed];
        out.put_u8(self.channel);
        out.put_slice(self.dst.as_bytes());
        out.put_slice(self.src.as_bytes());
        out.put_slice(self.payload);

        Ok(needed)
    }
}
