use std::path::PathBuf;

use clap::Args;
use cometwatch_core::driver::{Ticker, TickerSettings};
use cometwatch_core::{Event, TelemetrySnapshot, TrackerConfig};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Args)]
pub struct WatchArgs {
    /// Stop after this many countdown ticks (default: run until Ctrl-C)
    #[arg(long)]
    pub ticks: Option<u64>,
    /// Read the telemetry snapshot from this JSON file instead of using the
    /// built-in fallback record
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(watch_loop(args))
}

async fn watch_loop(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = match &args.snapshot {
        Some(path) => TelemetrySnapshot::from_file(path)?,
        None => TelemetrySnapshot::placeholder(),
    };
    let config = TrackerConfig::load_or_default();
    let target = config.resolve_target(Some(&snapshot));

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let ticker = Ticker::spawn(TickerSettings::from_config(&config), target, events_tx);

    let mut seen: u64 = 0;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted, stopping ticker");
                break;
            }
            event = events_rx.recv() => {
                let Some(event) = event else { break };
                println!("{}", event.to_json()?);
                if matches!(event, Event::CountdownTick { .. }) {
                    seen += 1;
                    if args.ticks.is_some_and(|limit| seen >= limit) {
                        break;
                    }
                }
            }
        }
    }

    ticker.stop().await;
    Ok(())
}
