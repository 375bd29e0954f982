//! # CHS Tides Demo Binary
//!
//! Loads `tide-config.toml` (or the path given as the first argument),
//! resolves the configured station, refreshes conditions, and prints the
//! result. Intended as a smoke test and usage example for the library;
//! see the crate docs for the programmatic API.

use anyhow::Context;
use chs_tides::{ChsTides, TidesConfig};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "tide-config.toml".to_string());
    let config = TidesConfig::from_toml_path(&path)
        .with_context(|| format!("loading configuration from {path}"))?;

    let mut tides = ChsTides::new(config)?;
    tides.update().await?;

    if let Some(station) = tides.station() {
        println!(
            "Station {} ({}) — {}",
            station.code, station.id, station.official_name
        );
        println!(
            "  location: ({}, {})  operating: {}",
            station.latitude, station.longitude, station.operating
        );
        println!("  tide table: {}", station.tide_table);
        println!("  time series:");
        for series in &station.time_series {
            println!("    {:<12} {}", series.code, series.name);
        }
        println!("  heights (highest first):");
        for height in tides.heights() {
            println!("    {:<8} {:>6.2}  {}", height.code, height.value, height.name);
        }
    }

    if let Some(conditions) = tides.conditions() {
        println!(
            "Current: {} at {} ({})",
            conditions.value, conditions.event_date, conditions.status
        );
    }
    if let Some((past, future)) = tides.hilo() {
        println!("Last:    {} at {} ({})", past.value, past.event_date, past.event);
        println!(
            "Next:    {} at {} ({})",
            future.value, future.event_date, future.event
        );
    }

    Ok(())
}
