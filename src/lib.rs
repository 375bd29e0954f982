//! # CHS Tides Core Library
//!
//! Client for the Canadian Hydrographic Service (CHS) Integrated Water Level
//! System (IWLS) REST API. The library resolves a tide-monitoring station —
//! by id, by five-digit code, or nearest to a coordinate pair — fetches its
//! metadata and reference catalogs, and derives a simplified view of the
//! tide: current value and trend (rising/falling) plus the last and next
//! high/low events around the present moment.
//!
//! ## Design
//!
//! - **One facade, explicit lifecycle**: [`ChsTides`] owns the configuration
//!   and all cached state. [`ChsTides::resolve`] populates the enriched
//!   station record, [`ChsTides::refresh`] the derived conditions; both are
//!   all-or-nothing and replace prior state wholesale.
//! - **Denormalized output**: enrichment joins station metadata against the
//!   height-type, phenomenon, and tide-table catalogs so callers see
//!   localized names and display-unit heights, never opaque ids.
//! - **Injected transport**: every network call goes through the
//!   [`Transport`] capability. Production uses [`HttpTransport`]; tests run
//!   the full resolve/refresh flow against canned JSON.
//! - **No hidden policy**: no caching of API responses, no retries, no rate
//!   limiting. Errors abort the in-flight call and leave cached state alone.
//!
//! ## Example
//!
//! ```no_run
//! use chs_tides::{ChsTides, Language, StationSelector, TidesConfig, Unit};
//!
//! # async fn run() -> chs_tides::Result<()> {
//! let config = TidesConfig::new(
//!     StationSelector::ByCoordinates { latitude: 44.65, longitude: -63.60 },
//!     Language::English,
//!     Unit::Metres,
//! )?;
//! let mut tides = ChsTides::new(config)?;
//! tides.update().await?;
//!
//! if let (Some(station), Some(conditions)) = (tides.station(), tides.conditions()) {
//!     println!("{}: {} m and {}", station.official_name, conditions.value, conditions.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod conditions;
pub mod config;
pub mod enrich;
pub mod error;
pub mod facade;
pub mod geo;
pub mod resolver;
pub mod station;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{HttpTransport, IwlsClient, Transport, API_ROOT, TIME_SERIES_CODES};
pub use config::{Language, StationSelector, TidesConfig, Unit, FEET_PER_METRE};
pub use error::{Error, Result};
pub use facade::ChsTides;
pub use station::{
    Conditions, EnrichedHeight, EnrichedSeries, EnrichedStation, HiLoEvent, Observation,
    StationSummary, Trend,
};
