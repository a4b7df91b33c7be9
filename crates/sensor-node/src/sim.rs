//! Host stand-ins for the board: a UDP "air", a synthetic sensor and a
//! deep sleep that just parks the thread.

use std::convert::Infallible;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::thread::{self, JoinHandle};

use embassy_time::Duration;
use log::{debug, info, warn};
use protocol::frame::{Frame, MAX_FRAME_LEN};
use protocol::{PeerAddress, WireError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::measurement::{Measurement, Sensor};
use crate::radio::{Radio, SendDone, SendStatus};
use crate::sleep::DeepSleep;

#[derive(Debug, thiserror::Error)]
pub enum SimRadioError {
    #[error("radio not initialized")]
    NotInitialized,
    #[error("{0} is not a registered peer")]
    UnknownPeer(PeerAddress),
    #[error("framing failed: {0}")]
    Frame(#[from] WireError),
    #[error("socket error: {0}")]
    Io(#[from] io::Error),
}

/// How long the radio listens for the receiver's status byte after a send.
pub const ACK_WINDOW: std::time::Duration = std::time::Duration::from_millis(200);

/// Radio that puts each datagram on the UDP medium at `medium`, framed with
/// our channel, the peer's address and ours.
///
/// The completion callback fires from a listener thread when the receiver
/// answers with its status byte. A receiver that never answers leaves the
/// callback silent, so the transmitter sees a timeout; a socket error such as
/// a refused port reports [`SendStatus::Failed`].
pub struct UdpRadio {
    address: PeerAddress,
    medium: SocketAddr,
    socket: Option<UdpSocket>,
    channel: u8,
    peer: Option<PeerAddress>,
    done: &'static SendDone,
    listener: Option<JoinHandle<()>>,
}

impl UdpRadio {
    pub fn new(address: PeerAddress, medium: SocketAddr, done: &'static SendDone) -> Self {
        Self {
            address,
            medium,
            socket: None,
            channel: 0,
            peer: None,
            done,
            listener: None,
        }
    }

    fn join_listener(&mut self) {
        if let Some(listener) = self.listener.take() {
            if listener.join().is_err() {
                warn!("ack listener panicked");
            }
        }
    }
}

fn await_ack(socket: UdpSocket, medium: SocketAddr, done: &SendDone) {
    let mut status = [0u8; 1];
    match socket.recv_from(&mut status) {
        Ok((1, from)) if from == medium => {
            debug!("ack {:#04x} from {}", status[0], from);
            done.signal(SendStatus::from(status[0]));
        }
        Ok((len, from)) => debug!("ignoring {} byte reply from {}", len, from),
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
            debug!("no ack within the window");
        }
        Err(e) => {
            warn!("link error while awaiting ack: {}", e);
            done.signal(SendStatus::Failed);
        }
    }
}

impl Radio for UdpRadio {
    type Error = SimRadioError;

    fn init(&mut self, channel: u8) -> Result<(), Self::Error> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        debug!("radio up on {}, channel {}", socket.local_addr()?, channel);

        self.socket = Some(socket);
        self.channel = channel;
        Ok(())
    }

    fn add_peer(&mut self, peer: PeerAddress, channel: u8) -> Result<(), Self::Error> {
        if self.socket.is_none() {
            return Err(SimRadioError::NotInitialized);
        }
        self.channel = channel;
        self.peer = Some(peer);
        Ok(())
    }

    fn send(&mut self, peer: PeerAddress, payload: &[u8]) -> Result<(), Self::Error> {
        self.join_listener();

        let socket = self.socket.as_ref().ok_or(SimRadioError::NotInitialized)?;
        if self.peer != Some(peer) {
            return Err(SimRadioError::UnknownPeer(peer));
        }

        let frame = Frame {
            channel: self.channel,
            dst: peer,
            src: self.address,
            payload,
        };
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame.write_to(&mut buf)?;

        let ack = socket.try_clone()?;
        ack.set_read_timeout(Some(ACK_WINDOW))?;

        socket.send_to(&buf[..len], self.medium)?;

        let (medium, done) = (self.medium, self.done);
        self.listener = Some(thread::spawn(move || await_ack(ack, medium, done)));
        Ok(())
    }
}

impl Drop for UdpRadio {
    fn drop(&mut self) {
        self.join_listener();
    }
}

/// Produces BME280-like samples around a fixed indoor climate.
pub struct SyntheticSensor {
    rng: StdRng,
}

impl SyntheticSensor {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SyntheticSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl Sensor for SyntheticSensor {
    type Error = Infallible;

    fn read(&mut self) -> Result<Measurement, Self::Error> {
        Ok(Measurement {
            temperature: self.rng.gen_range(23.0..25.0),
            humidity: self.rng.gen_range(48.0..53.0),
            pressure: self.rng.gen_range(1007.5..1008.5),
        })
    }
}

/// Parks the thread instead of powering down. `scale` shrinks the requested
/// duration so a simulated node does not really idle for five minutes.
pub struct ThreadSleep {
    scale: f64,
}

impl ThreadSleep {
    pub fn new(scale: f64) -> Self {
        Self {
            scale: scale.max(0.0),
        }
    }
}

impl DeepSleep for ThreadSleep {
    fn deep_sleep(&mut self, duration: Duration) {
        let micros = (duration.as_micros() as f64 * self.scale) as u64;
        info!(
            "deep sleep for {} secs (scaled to {} ms)",
            duration.as_secs(),
            micros / 1000
        );
        std::thread::sleep(std::time::Duration::from_micros(micros));
    }
}
