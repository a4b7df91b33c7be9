//! Gateway side of the telemetry link: accept datagrams from any sensor
//! node, keep the most recent decoded reading and hand it to downstream
//! consumers.

pub mod capture;
pub mod config;
pub mod http;
pub mod link;

pub use capture::{Capture, CaptureError, CaptureStats, Received};
pub use link::{LinkError, UdpLink};
