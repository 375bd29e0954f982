//! # Tides Facade
//!
//! [`ChsTides`] is the public entry point. It owns the validated
//! configuration, the API client, and the cached derived state, and walks a
//! simple lifecycle:
//!
//! 1. constructed: selector, language, and unit are fixed, nothing fetched;
//! 2. resolved: after [`ChsTides::resolve`], the station id is known and the
//!    enriched station record is cached;
//! 3. updated: after [`ChsTides::refresh`], current conditions and the
//!    bracketing hi-lo events are cached too.
//!
//! Both operations are all-or-nothing: state is computed into locals and only
//! assigned once the whole operation has succeeded, so a failed `refresh()`
//! never corrupts the station record a previous `resolve()` produced. There
//! is no terminal state; the facade can be resolved and refreshed
//! indefinitely, each call replacing the prior state wholesale.

use chrono::{DateTime, Utc};
use log::info;

use crate::api::{HttpTransport, IwlsClient, Transport};
use crate::conditions;
use crate::config::TidesConfig;
use crate::enrich;
use crate::error::{Error, Result};
use crate::resolver;
use crate::station::{Conditions, EnrichedHeight, EnrichedStation, HiLoEvent};

/// Predicted water level, the series current conditions are derived from.
const SERIES_PREDICTED: &str = "wlp";

/// Predicted hi-lo extrema series.
const SERIES_HILO: &str = "wlp-hilo";

/// Facade over station resolution, metadata enrichment, and derived
/// conditions for one configured station.
#[derive(Debug)]
pub struct ChsTides<T = HttpTransport> {
    config: TidesConfig,
    client: IwlsClient<T>,
    station: Option<EnrichedStation>,
    conditions: Option<Conditions>,
    hilo: Option<(HiLoEvent, HiLoEvent)>,
}

impl ChsTides<HttpTransport> {
    /// Facade backed by the default HTTPS transport.
    pub fn new(config: TidesConfig) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> ChsTides<T> {
    /// Facade with an injected transport (test doubles, alternate policies).
    pub fn with_transport(config: TidesConfig, transport: T) -> Self {
        ChsTides {
            config,
            client: IwlsClient::new(transport),
            station: None,
            conditions: None,
            hilo: None,
        }
    }

    /// Resolve the configured selector and cache the enriched station
    /// record, replacing any previous one.
    pub async fn resolve(&mut self) -> Result<()> {
        let resolution = resolver::resolve(&self.client, &self.config.selector).await?;
        // A summary from the stations list saves the single-station fetch.
        let summary = match resolution.summary {
            Some(summary) => summary,
            None => self.client.station(&resolution.id).await?,
        };
        let metadata = self.client.station_metadata(&resolution.id).await?;
        let station = enrich::enrich(
            &self.client,
            &summary,
            &metadata,
            self.config.language,
            self.config.unit,
        )
        .await?;
        info!(
            "resolved station {} ({}) at ({}, {})",
            station.code, station.official_name, station.latitude, station.longitude
        );
        self.station = Some(station);
        Ok(())
    }

    /// Recompute current conditions and the bracketing hi-lo events for the
    /// standard window around the present moment. Resolves first if needed.
    pub async fn refresh(&mut self) -> Result<()> {
        self.refresh_at(Utc::now()).await
    }

    /// [`ChsTides::refresh`] with an explicit "now", for deterministic
    /// callers and tests.
    pub async fn refresh_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.station.is_none() {
            self.resolve().await?;
        }
        let station_id = self
            .station
            .as_ref()
            .map(|s| s.id.clone())
            .ok_or_else(|| Error::NotFound("no station resolved".to_string()))?;

        let (from, to) = conditions::window(now);
        let predicted = self
            .client
            .station_data(&station_id, SERIES_PREDICTED, from, to)
            .await?;
        let current = conditions::current_conditions(&predicted, now, self.config.unit)?;

        let extrema = self
            .client
            .station_data(&station_id, SERIES_HILO, from, to)
            .await?;
        let hilo = conditions::last_next_hilo(&extrema, self.config.language, self.config.unit)?;

        info!(
            "station {station_id}: {} at {} ({})",
            current.value, current.event_date, current.status
        );
        self.conditions = Some(current);
        self.hilo = Some(hilo);
        Ok(())
    }

    /// Full recompute: resolve, then refresh.
    pub async fn update(&mut self) -> Result<()> {
        self.resolve().await?;
        self.refresh().await
    }

    pub fn config(&self) -> &TidesConfig {
        &self.config
    }

    /// The enriched station record, once resolved.
    pub fn station(&self) -> Option<&EnrichedStation> {
        self.station.as_ref()
    }

    /// Current conditions, once refreshed.
    pub fn conditions(&self) -> Option<&Conditions> {
        self.conditions.as_ref()
    }

    /// Last and next hi-lo events, once refreshed.
    pub fn hilo(&self) -> Option<&(HiLoEvent, HiLoEvent)> {
        self.hilo.as_ref()
    }

    pub fn station_id(&self) -> Option<&str> {
        self.station.as_ref().map(|s| s.id.as_str())
    }

    pub fn station_code(&self) -> Option<&str> {
        self.station.as_ref().map(|s| s.code.as_str())
    }

    pub fn station_name(&self) -> Option<&str> {
        self.station.as_ref().map(|s| s.official_name.as_str())
    }

    pub fn station_operating(&self) -> Option<bool> {
        self.station.as_ref().map(|s| s.operating)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.station.as_ref().map(|s| (s.latitude, s.longitude))
    }

    pub fn time_series_codes(&self) -> Vec<&str> {
        self.station
            .as_ref()
            .map(|s| s.time_series_codes())
            .unwrap_or_default()
    }

    /// Station heights sorted highest first; empty before resolution.
    pub fn heights(&self) -> Vec<EnrichedHeight> {
        self.station
            .as_ref()
            .map(|s| s.heights_by_value())
            .unwrap_or_default()
    }
}
