//! Wire format shared by the sensor node and the gateway.
//!
//! A reading travels as one radio datagram of exactly [`READING_LEN`] bytes:
//!
//! | offset | size | field        |
//! |--------|------|--------------|
//! | 0      | 1    | location id  |
//! | 1      | 4    | temperature  |
//! | 5      | 4    | humidity     |
//! | 9      | 4    | pressure     |
//!
//! Floats are IEEE-754 little-endian. There is no envelope, version tag or
//! checksum; the only length information is the datagram's own length.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod frame;
mod reading;

pub use macaddr::MacAddr6 as PeerAddress;
pub use reading::{decode, encode, SensorReading, READING_LEN};

/// Radio channel both nodes are pinned to. A mismatch means no reception.
pub const DEFAULT_CHANNEL: u8 = 4;

/// Largest payload a single ESP-NOW datagram can carry.
pub const MAX_PAYLOAD_LEN: usize = 250;

/// Address the gateway pins on its soft-AP interface before the radio comes up.
pub const GATEWAY_ADDRESS: PeerAddress = PeerAddress::new(0x36, 0x35, 0x34, 0x33, 0x32, 0x31);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("expected a {expected} byte datagram, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("frame is {actual} bytes, shorter than its {needed} byte header")]
    Truncated { needed: usize, actual: usize },
    #[error("payload of {size} bytes exceeds the {max} byte limit")]
    PayloadTooLarge { size: usize, max: usize },
    #[error("output buffer holds {available} bytes, {needed} required")]
    BufferTooSmall { needed: usize, available: usize },
}
