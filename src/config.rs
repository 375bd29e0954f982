//! # Configuration Management
//!
//! This module holds the typed configuration for a tide lookup: which station
//! to track (by id, code, or coordinates), the display language, and the
//! height unit. Construction validates everything up front, so a
//! [`TidesConfig`] that exists is always well-formed and no network access
//! happens before validation passes.
//!
//! Configuration can also be loaded from a `tide-config.toml` file. An
//! invalid file is a hard error rather than a silent fallback to defaults: a
//! typo'd station code should never quietly track a different harbour.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Metres-to-feet conversion factor used for all height displays.
pub const FEET_PER_METRE: f64 = 3.28084;

/// How the target station is identified. Exactly one form is ever populated.
#[derive(Debug, Clone, PartialEq)]
pub enum StationSelector {
    /// Canonical IWLS station id: exactly 24 lowercase hex characters.
    ById(String),
    /// Five-digit station code, e.g. `"00490"` for Halifax.
    ByCode(String),
    /// Pick the station nearest to these coordinates.
    ByCoordinates { latitude: f64, longitude: f64 },
}

impl StationSelector {
    /// Validate the selector's contents without touching the network.
    pub fn validate(&self) -> Result<()> {
        match self {
            StationSelector::ById(id) => {
                if !valid_station_id(id) {
                    return Err(Error::Validation(format!(
                        "station id must be 24 lowercase hex characters, got {id:?}"
                    )));
                }
            }
            StationSelector::ByCode(code) => {
                if !valid_station_code(code) {
                    return Err(Error::Validation(format!(
                        "station code must be exactly 5 digits, got {code:?}"
                    )));
                }
            }
            StationSelector::ByCoordinates {
                latitude,
                longitude,
            } => {
                if !(latitude.abs() <= 90.0 && longitude.abs() <= 180.0) {
                    return Err(Error::Validation(format!(
                        "coordinates ({latitude}, {longitude}) are out of range"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn valid_station_id(id: &str) -> bool {
    id.len() == 24
        && id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

fn valid_station_code(code: &str) -> bool {
    code.len() == 5 && code.chars().all(|c| c.is_ascii_digit())
}

/// Display language for station names and tide labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    French,
}

impl Language {
    /// Select the localized variant of a bilingual API field.
    pub fn pick(self, name_en: &str, name_fr: &str) -> String {
        match self {
            Language::English => name_en.to_string(),
            Language::French => name_fr.to_string(),
        }
    }

    /// Localized (low tide, high tide) labels.
    pub(crate) fn tide_labels(self) -> (&'static str, &'static str) {
        match self {
            Language::English => ("low tide", "high tide"),
            Language::French => ("marée basse", "marée haute"),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "english" => Ok(Language::English),
            "french" => Ok(Language::French),
            other => Err(Error::Validation(format!(
                "language must be \"english\" or \"french\", got {other:?}"
            ))),
        }
    }
}

/// Display unit for water-level heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Metres,
    Feet,
}

impl Unit {
    /// Convert a height from API metres into the display unit.
    ///
    /// Feet are rounded to 2 decimals; metres pass through untouched.
    pub fn convert(self, metres: f64) -> f64 {
        match self {
            Unit::Metres => metres,
            Unit::Feet => (metres * FEET_PER_METRE * 100.0).round() / 100.0,
        }
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "m" => Ok(Unit::Metres),
            "ft" => Ok(Unit::Feet),
            other => Err(Error::Validation(format!(
                "unit must be \"m\" or \"ft\", got {other:?}"
            ))),
        }
    }
}

/// Validated configuration for a [`crate::ChsTides`] facade.
#[derive(Debug, Clone, PartialEq)]
pub struct TidesConfig {
    pub selector: StationSelector,
    pub language: Language,
    pub unit: Unit,
}

impl TidesConfig {
    /// Build a configuration, rejecting malformed selectors up front.
    pub fn new(selector: StationSelector, language: Language, unit: Unit) -> Result<Self> {
        selector.validate()?;
        Ok(TidesConfig {
            selector,
            language,
            unit,
        })
    }

    /// Load and validate configuration from a TOML file.
    ///
    /// ```toml
    /// [station]
    /// code = "00490"       # or `id = "..."`, or `latitude`/`longitude`
    ///
    /// [display]
    /// language = "english"
    /// unit = "m"
    /// ```
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            Error::Validation(format!(
                "cannot read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let raw: RawConfig = toml::from_str(&contents)
            .map_err(|e| Error::Validation(format!("invalid config file format: {e}")))?;
        raw.into_config()
    }
}

/// On-disk shape of `tide-config.toml`, before validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    station: RawStation,
    display: RawDisplay,
}

#[derive(Debug, Default, Deserialize)]
struct RawStation {
    id: Option<String>,
    code: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    language: String,
    unit: String,
}

impl RawConfig {
    fn into_config(self) -> Result<TidesConfig> {
        let selector = self.station.into_selector()?;
        let language = self.display.language.parse()?;
        let unit = self.display.unit.parse()?;
        TidesConfig::new(selector, language, unit)
    }
}

impl RawStation {
    fn into_selector(self) -> Result<StationSelector> {
        let coords = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(StationSelector::ByCoordinates {
                latitude,
                longitude,
            }),
            (None, None) => None,
            _ => {
                return Err(Error::Validation(
                    "latitude and longitude must be given together".to_string(),
                ))
            }
        };
        let mut selectors: Vec<StationSelector> = Vec::new();
        if let Some(id) = self.id {
            selectors.push(StationSelector::ById(id));
        }
        if let Some(code) = self.code {
            selectors.push(StationSelector::ByCode(code));
        }
        if let Some(coords) = coords {
            selectors.push(coords);
        }
        match selectors.len() {
            1 => Ok(selectors.remove(0)),
            0 => Err(Error::Validation(
                "station must be selected by id, code, or coordinates".to_string(),
            )),
            _ => Err(Error::Validation(
                "station id, code, and coordinates are mutually exclusive".to_string(),
            )),
        }
    }
}
