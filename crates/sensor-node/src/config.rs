use embassy_time::Duration;
use protocol::{PeerAddress, DEFAULT_CHANNEL, GATEWAY_ADDRESS};

pub const LOCATION_ID: u8 = 1;

/// How long to wait for the send-completion callback before giving up.
pub const SEND_TIMEOUT: Duration = Duration::from_millis(245);

pub const SLEEP_BASE: Duration = Duration::from_secs(5 * 60);

/// Ceiling of the random term added to [`SLEEP_BASE`]: half of an 8-bit draw.
pub const MAX_JITTER: Duration = Duration::from_secs(127);

/// Per-device settings, fixed at build time on real hardware.
#[derive(Debug, Clone, Copy)]
pub struct NodeConfig {
    pub location_id: u8,
    pub gateway: PeerAddress,
    pub channel: u8,
    pub send_timeout: Duration,
    pub sleep_base: Duration,
    pub max_jitter: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            location_id: LOCATION_ID,
            gateway: GATEWAY_ADDRESS,
            channel: DEFAULT_CHANNEL,
            send_timeout: SEND_TIMEOUT,
            sleep_base: SLEEP_BASE,
            max_jitter: MAX_JITTER,
        }
    }
}
