// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! roost-agent: polling beacon.

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roost_agent::Beacon;
use roost_core::BeaconId;

#[derive(Debug, Parser)]
#[command(name = "roost-agent", version, about = "roost polling agent")]
struct Args {
    /// Server host:port to sync against
    #[arg(long)]
    server: String,

    /// Connect over https instead of http
    #[arg(long)]
    secure: bool,

    /// Resume an existing session instead of bootstrapping
    #[arg(long)]
    beacon: Option<BeaconId>,

    /// Poll interval in seconds (a bootstrap overrides this)
    #[arg(long, default_value_t = 3)]
    interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let scheme = if args.secure { "https" } else { "http" };
    let base = format!("{scheme}://{}", args.server);

    let (id, interval) = match args.beacon {
        Some(id) => {
            info!(beacon = %id, "resuming session");
            (id, Duration::from_secs(args.interval))
        }
        None => {
            let boot = Beacon::fetch_bootstrap(&base).await?;
            info!(beacon = %boot.beacon, "bootstrapped");
            (boot.beacon, Duration::from_secs(boot.interval_secs))
        }
    };

    let beacon = Arc::new(Beacon::new(base, id, interval));
    let stop = beacon.stop_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received");
            stop.cancel();
        }
    });

    beacon.run().await;
    Ok(())
}
