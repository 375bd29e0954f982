//! # Station Data Model
//!
//! Wire types mirror the JSON bodies returned by the IWLS endpoints
//! (camelCase on the wire, snake_case in Rust), and the enriched types are
//! what the facade hands to callers once every cross-reference id has been
//! resolved to a human-readable, localized name.
//!
//! The split matters: raw records carry opaque ids (`heightTypeId`,
//! `phenomenonId`, `tideTableId`) that only mean something joined against the
//! small reference catalogs. Enrichment performs those joins once and the
//! enriched record never exposes an id a caller would have to chase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One station entry from the stations list or single-station endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSummary {
    pub id: String,
    pub code: String,
    pub official_name: String,
    pub operating: bool,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub time_series: Vec<TimeSeriesRef>,
}

/// Raw time-series descriptor attached to a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesRef {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_fr: String,
    pub phenomenon_id: String,
}

/// Raw height datum from station metadata; `value` is metres from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightDatum {
    pub height_type_id: String,
    pub value: f64,
}

/// The `/stations/{id}/metadata` record, reduced to the fields enrichment
/// consumes. The endpoint also repeats the summary fields; those are taken
/// from the already-resolved [`StationSummary`] instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationMetadata {
    #[serde(default)]
    pub heights: Vec<HeightDatum>,
    pub tide_table_id: String,
    #[serde(default)]
    pub time_series: Vec<TimeSeriesRef>,
}

/// Entry of the height-type reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightType {
    pub id: String,
    pub code: String,
    pub name_en: String,
    pub name_fr: String,
}

/// Entry of the phenomenon reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phenomenon {
    pub name_en: String,
    pub name_fr: String,
}

/// Entry of the tide-table catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TideTable {
    pub name_en: String,
    pub name_fr: String,
}

/// One water-level observation from `/stations/{id}/data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub event_date: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub qc_flag_code: Option<String>,
    #[serde(default)]
    pub time_series_id: Option<String>,
}

/// Height datum after enrichment: localized name, catalog code, value in the
/// configured display unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedHeight {
    pub name: String,
    pub code: String,
    pub value: f64,
}

/// Time-series descriptor after enrichment: the series' own ids and bilingual
/// names are replaced by the resolved phenomenon name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSeries {
    pub code: String,
    pub name: String,
}

/// Fully denormalized station record: summary fields plus resolved heights,
/// time series, and tide-table name. No opaque cross-reference ids remain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedStation {
    pub id: String,
    pub code: String,
    pub official_name: String,
    pub operating: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub heights: Vec<EnrichedHeight>,
    pub time_series: Vec<EnrichedSeries>,
    pub tide_table: String,
}

impl EnrichedStation {
    /// Heights sorted by value, highest first. Stable for equal values, so
    /// the enrichment order is preserved among ties.
    pub fn heights_by_value(&self) -> Vec<EnrichedHeight> {
        let mut sorted = self.heights.clone();
        sorted.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        sorted
    }

    /// Codes of the station's time series, in catalog order.
    pub fn time_series_codes(&self) -> Vec<&str> {
        self.time_series.iter().map(|s| s.code.as_str()).collect()
    }
}

/// Current tide trend at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Rising => write!(f, "rising"),
            Trend::Falling => write!(f, "falling"),
        }
    }
}

/// Simplified current conditions derived from the predicted water-level
/// series. Recomputed wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditions {
    pub value: f64,
    pub event_date: DateTime<Utc>,
    pub status: Trend,
}

/// A high- or low-tide event; `event` is the localized label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HiLoEvent {
    pub event_date: DateTime<Utc>,
    pub value: f64,
    pub event: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn station_summary_parses_wire_json() {
        let value = json!({
            "id": "5cebf1df3d0f4a073c4bbcb5",
            "code": "00490",
            "officialName": "Halifax",
            "operating": true,
            "latitude": 44.666667,
            "longitude": -63.583333,
            "timeSeries": [{
                "id": "5cebf1df3d0f4a073c4bbcc1",
                "code": "wlo",
                "nameEn": "Observed water level",
                "nameFr": "Niveau d'eau observé",
                "phenomenonId": "5ce598df487b84486892821c"
            }]
        });
        let summary: StationSummary = serde_json::from_value(value).unwrap();
        assert_eq!(summary.code, "00490");
        assert_eq!(summary.official_name, "Halifax");
        assert_eq!(summary.time_series[0].code, "wlo");
        assert_eq!(
            summary.time_series[0].phenomenon_id,
            "5ce598df487b84486892821c"
        );
    }

    #[test]
    fn observation_parses_utc_event_date() {
        let value = json!({
            "eventDate": "2024-05-01T10:30:00Z",
            "value": 1.82,
            "qcFlagCode": "2",
            "timeSeriesId": "5cebf1df3d0f4a073c4bbcc1"
        });
        let obs: Observation = serde_json::from_value(value).unwrap();
        assert_eq!(obs.value, 1.82);
        assert_eq!(obs.event_date.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }

    #[test]
    fn heights_by_value_sorts_descending_and_stable() {
        let station = EnrichedStation {
            id: "5cebf1df3d0f4a073c4bbcb5".to_string(),
            code: "00490".to_string(),
            official_name: "Halifax".to_string(),
            operating: true,
            latitude: 44.67,
            longitude: -63.58,
            heights: vec![
                EnrichedHeight {
                    name: "Mean water level".to_string(),
                    code: "MWL".to_string(),
                    value: 1.05,
                },
                EnrichedHeight {
                    name: "Higher high water, large tide".to_string(),
                    code: "HHWLT".to_string(),
                    value: 2.1,
                },
                EnrichedHeight {
                    name: "Duplicate of mean".to_string(),
                    code: "DUP".to_string(),
                    value: 1.05,
                },
            ],
            time_series: vec![],
            tide_table: "Atlantic Coast and Bay of Fundy".to_string(),
        };
        let sorted = station.heights_by_value();
        assert_eq!(sorted[0].code, "HHWLT");
        // Ties keep their original relative order
        assert_eq!(sorted[1].code, "MWL");
        assert_eq!(sorted[2].code, "DUP");
        // The stored order is untouched
        assert_eq!(station.heights[0].code, "MWL");
    }

    #[test]
    fn trend_displays_lowercase() {
        assert_eq!(Trend::Rising.to_string(), "rising");
        assert_eq!(Trend::Falling.to_string(), "falling");
    }
}
