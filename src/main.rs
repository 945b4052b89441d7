//! # NMEA Bridge
//!
//! Bridges NASA Clipper depth and Victron VE.Direct telemetry to NMEA 0183
//! sentences on stdout, where a sentence router can pick them up.

use anyhow::Result;
use std::time::Duration;
use tokio::io::{self, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber;

mod clipper;
mod config;
mod error;
mod nmea;
mod serial;
mod victron;

use clipper::ClipperDecoder;
use config::Config;
use serial::source::{FileBusTransfer, SerialByteSource};
use victron::VictronDecoder;

/// Default configuration file path
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the NMEA Bridge application
///
/// Loads the configuration, spawns one polling task per enabled decoder and
/// writes every produced sentence to stdout until Ctrl+C.
///
/// # Errors
///
/// Returns error if the configuration cannot be loaded or a device cannot
/// be opened
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("NMEA Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)?;
    info!("Loaded configuration from {}", config_path);

    let (sentence_tx, mut sentence_rx) = mpsc::channel::<String>(32);

    if config.depth.enabled {
        let bus = FileBusTransfer::open(&config.depth.device).await?;
        info!("Depth instrument bus opened at {}", config.depth.device);
        let tx = sentence_tx.clone();

        tokio::spawn(async move {
            let mut decoder = ClipperDecoder::new(bus);
            loop {
                match decoder.read_sentence().await {
                    // Discarded frames produce no sentence; keep polling
                    Ok(Some(sentence)) => {
                        if tx.send(sentence).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => continue,
                    Err(e) => {
                        warn!("Depth decoder error: {}", e);
                        break;
                    }
                }
            }
        });
    }

    if config.charger.enabled {
        let port = serial::open_port(&config.charger.port, config.charger.baud_rate)?;
        let source = SerialByteSource::new(port);
        let templates = config.charger.sentences.to_templates();
        let poll_interval = Duration::from_millis(config.charger.poll_interval_ms);
        let tx = sentence_tx.clone();

        tokio::spawn(async move {
            let mut decoder = VictronDecoder::new(source, templates, poll_interval);
            loop {
                match decoder.read_sentence().await {
                    Ok(sentence) => {
                        if tx.send(sentence).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Charge controller decoder error: {}", e);
                        break;
                    }
                }
            }
        });
    }

    drop(sentence_tx);

    let mut stdout = io::stdout();
    let mut sentence_count: u64 = 0;

    info!("Press Ctrl+C to exit");

    loop {
        tokio::select! {
            sentence = sentence_rx.recv() => {
                match sentence {
                    Some(sentence) => {
                        stdout.write_all(sentence.as_bytes()).await?;
                        stdout.flush().await?;
                        sentence_count += 1;
                    }
                    // Every decoder task has stopped
                    None => break,
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Total sentences emitted: {}", sentence_count);
    Ok(())
}
