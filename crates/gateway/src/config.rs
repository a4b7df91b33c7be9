use std::net::SocketAddr;

use clap::Parser;
use protocol::{PeerAddress, DEFAULT_CHANNEL, GATEWAY_ADDRESS};

#[derive(Debug, Parser)]
#[command(name = "gateway")]
#[command(about = "Receives sensor readings and serves the latest one")]
pub struct Args {
    /// UDP address the emulated radio listens on
    #[arg(long, env = "GATEWAY_LISTEN", default_value = "0.0.0.0:4210")]
    pub listen: SocketAddr,

    /// Address for the HTTP server to listen on
    #[arg(long, env = "GATEWAY_HTTP", default_value = "0.0.0.0:8080")]
    pub http: SocketAddr,

    /// Radio channel, must match the sensor nodes
    #[arg(long, env = "GATEWAY_CHANNEL", default_value_t = DEFAULT_CHANNEL)]
    pub channel: u8,

    /// Radio address this gateway answers to
    #[arg(long, env = "GATEWAY_ADDRESS", default_value_t = GATEWAY_ADDRESS)]
    pub address: PeerAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sensor_nodes() {
        let args = Args::try_parse_from(["gateway"]).unwrap();
        assert_eq!(args.channel, DEFAULT_CHANNEL);
        assert_eq!(args.address, GATEWAY_ADDRESS);
        assert_eq!(args.listen.port(), 4210);
    }

    #[test]
    fn address_parses_from_colon_form() {
        let args =
            Args::try_parse_from(["gateway", "--address", "36:35:34:33:32:32", "--channel", "11"])
                .unwrap();
        assert_eq!(args.address, PeerAddress::new(0x36, 0x35, 0x34, 0x33, 0x32, 0x32));
        assert_eq!(args.channel, 11);
    }
}
