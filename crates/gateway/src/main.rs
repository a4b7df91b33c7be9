use std::future::IntoFuture;
use std::sync::Arc;

use clap::Parser;
use gateway::config::Args;
use gateway::{http, Capture, UdpLink};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "gateway=info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let capture = Arc::new(Capture::new());
    let link = UdpLink::bind(args.listen, args.channel, args.address).await?;
    let listener = TcpListener::bind(args.http).await?;

    tracing::info!(
        address = %link.address(),
        channel = link.channel(),
        radio = %link.local_addr()?,
        http = %args.http,
        "gateway listening"
    );

    let app = http::router(capture.clone());

    tokio::select! {
        res = link.run(&capture) => res?,
        res = axum::serve(listener, app).into_future() => res?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }

    Ok(())
}
