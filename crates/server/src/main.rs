// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! roostd: the roost control-plane server.

use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roost_server::{Config, Server};

#[derive(Debug, Parser)]
#[command(name = "roostd", version, about = "roost control-plane server")]
struct Args {
    /// Operator API bind address
    #[arg(long, default_value = "127.0.0.15:7641")]
    control: SocketAddr,

    /// Initial agent-facing listener bind address
    #[arg(long, default_value = "0.0.0.0:8888")]
    listen: SocketAddr,

    /// Start without an agent-facing listener
    #[arg(long)]
    no_listen: bool,

    /// Poll interval advertised to bootstrapping agents, in seconds
    #[arg(long, default_value_t = 3)]
    interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config {
        control_addr: args.control,
        listen_addr: (!args.no_listen).then_some(args.listen),
        interval_secs: args.interval,
    };

    let server = Server::start(config).await?;

    let stop = server.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received");
            stop.cancel();
        }
    });

    server.wait().await;
    Ok(())
}
