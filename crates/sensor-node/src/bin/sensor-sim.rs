//! Runs the sensor node's wake cycle on a host, against a gateway listening
//! for UDP-framed datagrams.
//!
//! Every cycle rebuilds the radio, sensor and transmitter from nothing, the
//! way a real node comes back from deep sleep.

use std::net::SocketAddr;

use clap::Parser;
use embassy_time::Duration;
use futures::executor::block_on;
use protocol::{PeerAddress, DEFAULT_CHANNEL, GATEWAY_ADDRESS};
use rand::rngs::OsRng;
use sensor_node::config::{LOCATION_ID, MAX_JITTER, SEND_TIMEOUT, SLEEP_BASE};
use sensor_node::sim::{SyntheticSensor, ThreadSleep, UdpRadio};
use sensor_node::{NodeConfig, SendDone, Transmitter};

static SEND_DONE: SendDone = SendDone::new();

#[derive(Debug, Parser)]
#[command(name = "sensor-sim")]
#[command(about = "Simulated battery-powered sensor node")]
struct Args {
    /// UDP address the gateway listens on
    #[arg(long, env = "SENSOR_MEDIUM", default_value = "127.0.0.1:4210")]
    medium: SocketAddr,

    /// This node's radio address
    #[arg(long, env = "SENSOR_ADDRESS", default_value = "d8:bf:c0:c7:b4:00")]
    address: PeerAddress,

    #[arg(long, env = "SENSOR_GATEWAY", default_value_t = GATEWAY_ADDRESS)]
    gateway: PeerAddress,

    #[arg(long, env = "SENSOR_LOCATION", default_value_t = LOCATION_ID)]
    location: u8,

    #[arg(long, env = "SENSOR_CHANNEL", default_value_t = DEFAULT_CHANNEL)]
    channel: u8,

    #[arg(long, default_value_t = SEND_TIMEOUT.as_millis())]
    send_timeout_ms: u64,

    #[arg(long, default_value_t = SLEEP_BASE.as_secs())]
    sleep_secs: u64,

    #[arg(long, default_value_t = MAX_JITTER.as_secs())]
    jitter_secs: u64,

    /// Fraction of the requested sleep actually spent sleeping
    #[arg(long, env = "SENSOR_SLEEP_SCALE", default_value_t = 0.01)]
    sleep_scale: f64,

    /// Stop after this many wake cycles
    #[arg(long)]
    cycles: Option<u64>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = NodeConfig {
        location_id: args.location,
        gateway: args.gateway,
        channel: args.channel,
        send_timeout: Duration::from_millis(args.send_timeout_ms),
        sleep_base: Duration::from_secs(args.sleep_secs),
        max_jitter: Duration::from_secs(args.jitter_secs),
    };

    log::info!(
        "This mac: {}, target mac: {}, channel: {}, medium: {}",
        args.address,
        config.gateway,
        config.channel,
        args.medium
    );

    let mut cycle = 0;
    while args.cycles.map_or(true, |n| cycle < n) {
        let radio = UdpRadio::new(args.address, args.medium, &SEND_DONE);
        let transmitter = Transmitter::new(config, SyntheticSensor::new(), radio, &SEND_DONE);
        let mut power = ThreadSleep::new(args.sleep_scale);

        block_on(transmitter.wake_cycle(&mut OsRng, &mut power));
        cycle += 1;
    }

    Ok(())
}
