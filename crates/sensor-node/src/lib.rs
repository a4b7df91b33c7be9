//! Transmitter side of the telemetry link.
//!
//! Each power-up runs one [`Transmitter::wake_cycle`]: sample the
//! environmental sensor, send the 13 byte reading once to the gateway, wait
//! up to [`config::SEND_TIMEOUT`] for the send callback, then deep-sleep for
//! a jittered interval. Board bring-up wires the three collaborators in:
//!
//! - [`Sensor`] for the physical sample
//! - [`Radio`] for the datagram link, signalling a [`SendDone`]
//! - [`DeepSleep`] for the power-down
//!
//! With the `sim` feature, [`sim`] provides host versions of all three that
//! talk to a gateway over UDP.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod config;
mod measurement;
mod radio;
mod sleep;
mod transmitter;

#[cfg(feature = "sim")]
pub mod sim;

pub use config::NodeConfig;
pub use measurement::{Measurement, Sensor};
pub use radio::{Radio, SendDone, SendStatus};
pub use sleep::{sleep_duration, DeepSleep};
pub use transmitter::{CycleReport, Outcome, Transmitter};
