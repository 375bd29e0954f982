//! # Station Resolution
//!
//! Turns a [`StationSelector`] into a canonical station id. An explicit id
//! passes through untouched; a station code is matched against the filtered
//! stations list; coordinates select the nearest catalog entry by geodesic
//! distance, first minimal entry winning so the result is deterministic for a
//! stable catalog ordering.
//!
//! When the stations list was consulted anyway, the matched summary rides
//! along in the [`Resolution`] so the caller can skip a duplicate
//! single-station fetch.

use log::{debug, info};

use crate::api::{IwlsClient, Transport};
use crate::config::StationSelector;
use crate::error::{Error, Result};
use crate::geo;
use crate::station::StationSummary;

/// Outcome of resolving a selector: the canonical id, plus the station
/// summary when the stations list already produced one.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub id: String,
    pub summary: Option<StationSummary>,
}

/// Resolve `selector` to a station id.
pub async fn resolve<T: Transport>(
    client: &IwlsClient<T>,
    selector: &StationSelector,
) -> Result<Resolution> {
    match selector {
        StationSelector::ById(id) => Ok(Resolution {
            id: id.clone(),
            summary: None,
        }),
        StationSelector::ByCode(code) => resolve_by_code(client, code).await,
        StationSelector::ByCoordinates {
            latitude,
            longitude,
        } => resolve_by_coordinates(client, *latitude, *longitude).await,
    }
}

async fn resolve_by_code<T: Transport>(client: &IwlsClient<T>, code: &str) -> Result<Resolution> {
    let mut matches = client.stations(Some(code), None, None).await?;
    if matches.len() != 1 {
        return Err(Error::NotFound(format!(
            "station code {code} matched {} stations",
            matches.len()
        )));
    }
    let summary = matches.remove(0);
    info!(
        "resolved code {code} to station {} ({})",
        summary.id, summary.official_name
    );
    Ok(Resolution {
        id: summary.id.clone(),
        summary: Some(summary),
    })
}

async fn resolve_by_coordinates<T: Transport>(
    client: &IwlsClient<T>,
    latitude: f64,
    longitude: f64,
) -> Result<Resolution> {
    let stations = client.stations(None, None, None).await?;
    if stations.is_empty() {
        return Err(Error::NotFound("station catalog is empty".to_string()));
    }

    // First strictly-smaller distance wins, so ties keep catalog order.
    let mut best: Option<(f64, StationSummary)> = None;
    for station in stations {
        let d = geo::distance_km((latitude, longitude), (station.latitude, station.longitude));
        match &best {
            Some((best_d, _)) if d >= *best_d => {}
            _ => best = Some((d, station)),
        }
    }
    let (distance, summary) = best.ok_or_else(|| {
        Error::NotFound("station catalog is empty".to_string())
    })?;
    debug!(
        "nearest station to ({latitude}, {longitude}) is {} ({}) at {distance:.1} km",
        summary.id, summary.official_name
    );
    Ok(Resolution {
        id: summary.id.clone(),
        summary: Some(summary),
    })
}
