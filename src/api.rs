//! # IWLS API Client
//!
//! Typed client over the Canadian Hydrographic Service Integrated Water Level
//! System REST API. Every method performs exactly one HTTP GET against a
//! templated URL under [`API_ROOT`] and deserializes the JSON body; there is
//! no caching, no retry, and no rate limiting at this layer.
//!
//! ## Transport injection
//!
//! All network traffic goes through the [`Transport`] capability rather than
//! a process-wide session. Production code uses [`HttpTransport`] (a shared
//! `reqwest::Client`); tests inject a canned-response double. The transport
//! contract is deliberately small: fetch a URL, hand back a
//! `serde_json::Value`, and represent a non-JSON body as the sentinel string
//! `"0"` (the upstream API signals some error states this way, and the
//! sentinel is passed through rather than guessed at).
//!
//! ## Query strings
//!
//! Parameters are joined in argument order as `key=value` pairs, the first
//! prefixed with `?`, values passed through without percent-encoding. Every
//! value the typed surface can produce (known series codes, second-truncated
//! ISO timestamps, digit-only station codes) is URL-safe as-is.

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::station::{
    HeightType, Observation, Phenomenon, StationMetadata, StationSummary, TideTable,
};

/// Root of the Integrated Water Level System API.
pub const API_ROOT: &str = "https://api-iwls.dfo-mpo.gc.ca/api/v1/";

/// Time-series codes the API understands.
pub const TIME_SERIES_CODES: [&str; 8] = [
    "wlo",
    "wlp",
    "wlp-hilo",
    "wlp-bores",
    "wcp-slack",
    "wlf",
    "wlf-spine",
    "dvcf-spine",
];

/// Request timeout applied to every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stateless fetch-JSON-over-HTTPS capability consumed by [`IwlsClient`].
pub trait Transport: Send + Sync {
    /// Fetch `url` and return the parsed JSON body, or the sentinel
    /// `Value::String("0")` when the response is not JSON.
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value>> + Send;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value>> + Send {
        async move {
            debug!("GET {url}");
            let response = self.client.get(url).send().await?;
            let is_json = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.starts_with("application/json"))
                .unwrap_or(false);
            if is_json {
                Ok(response.json::<Value>().await?)
            } else {
                Ok(Value::String("0".to_string()))
            }
        }
    }
}

/// Serialize a query timestamp: ISO-8601 UTC, truncated to seconds, `Z`
/// suffix. The API rejects sub-second precision.
pub(crate) fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Join pairs as `?a=b&c=d` in iteration order; empty input yields an empty
/// string. Values are not percent-encoded.
fn query_string(pairs: &[(&str, String)]) -> String {
    let mut query = String::new();
    for (key, value) in pairs {
        query.push(if query.is_empty() { '?' } else { '&' });
        query.push_str(key);
        query.push('=');
        query.push_str(value);
    }
    query
}

fn validate_series_code(code: &str) -> Result<()> {
    if TIME_SERIES_CODES.contains(&code) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "unknown time-series code {code:?}"
        )))
    }
}

/// Client for the station, reference-catalog, and time-series endpoints.
#[derive(Debug, Clone)]
pub struct IwlsClient<T> {
    transport: T,
    root: String,
}

impl<T: Transport> IwlsClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_root(transport, API_ROOT)
    }

    /// Point the client at a different API root (staging, test server).
    pub fn with_root(transport: T, root: impl Into<String>) -> Self {
        IwlsClient {
            transport,
            root: root.into(),
        }
    }

    /// Fetch a URL and deserialize into `D`. The transport's non-JSON
    /// sentinel and any field mismatch both surface as [`Error::DataShape`].
    async fn fetch<D: DeserializeOwned>(&self, url: &str) -> Result<D> {
        let value = self.transport.get_json(url).await?;
        serde_json::from_value(value)
            .map_err(|e| Error::DataShape(format!("response from {url}: {e}")))
    }

    /// `GET /stations`, optionally filtered by station code, CHS region
    /// code, or time-series code.
    pub async fn stations(
        &self,
        code: Option<&str>,
        region_code: Option<&str>,
        series_code: Option<&str>,
    ) -> Result<Vec<StationSummary>> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(code) = code {
            pairs.push(("code", code.to_string()));
        }
        if let Some(region) = region_code {
            pairs.push(("chs-region-code", region.to_string()));
        }
        if let Some(series) = series_code {
            validate_series_code(series)?;
            pairs.push(("time-series-code", series.to_string()));
        }
        let url = format!("{}stations{}", self.root, query_string(&pairs));
        self.fetch(&url).await
    }

    /// `GET /stations/{stationId}`
    pub async fn station(&self, station_id: &str) -> Result<StationSummary> {
        let url = format!("{}stations/{station_id}", self.root);
        self.fetch(&url).await
    }

    /// `GET /stations/{stationId}/metadata`
    pub async fn station_metadata(&self, station_id: &str) -> Result<StationMetadata> {
        let url = format!("{}stations/{station_id}/metadata", self.root);
        self.fetch(&url).await
    }

    /// `GET /stations/{stationId}/data` for one time-series code over a
    /// UTC window.
    pub async fn station_data(
        &self,
        station_id: &str,
        series_code: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Observation>> {
        validate_series_code(series_code)?;
        let pairs = [
            ("time-series-code", series_code.to_string()),
            ("from", format_timestamp(from)),
            ("to", format_timestamp(to)),
        ];
        let url = format!(
            "{}stations/{station_id}/data{}",
            self.root,
            query_string(&pairs)
        );
        self.fetch(&url).await
    }

    /// `GET /stations/{stationId}/stats/calculate-monthly-mean`. The body is
    /// passed through uninterpreted, as the upstream shape is undocumented.
    pub async fn station_monthly_mean(
        &self,
        station_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Value> {
        let pairs = [("year", year.to_string()), ("month", month.to_string())];
        let url = format!(
            "{}stations/{station_id}/stats/calculate-monthly-mean{}",
            self.root,
            query_string(&pairs)
        );
        self.transport.get_json(&url).await
    }

    /// `GET /stations/{stationId}/stats/calculate-daily-means`, passed
    /// through uninterpreted.
    pub async fn station_daily_means(&self, station_id: &str) -> Result<Value> {
        let url = format!(
            "{}stations/{station_id}/stats/calculate-daily-means",
            self.root
        );
        self.transport.get_json(&url).await
    }

    /// `GET /tide-tables`, optionally filtered by type or parent table.
    pub async fn tide_tables(
        &self,
        table_type: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Vec<TideTable>> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(table_type) = table_type {
            pairs.push(("type", table_type.to_string()));
        }
        if let Some(parent) = parent_id {
            pairs.push(("parent-tide-table-id", parent.to_string()));
        }
        let url = format!("{}tide-tables{}", self.root, query_string(&pairs));
        self.fetch(&url).await
    }

    /// `GET /tide-tables/{tideTableId}`
    pub async fn tide_table(&self, tide_table_id: &str) -> Result<TideTable> {
        let url = format!("{}tide-tables/{tide_table_id}", self.root);
        self.fetch(&url).await
    }

    /// `GET /phenomena`
    pub async fn phenomena(&self) -> Result<Vec<Phenomenon>> {
        let url = format!("{}phenomena", self.root);
        self.fetch(&url).await
    }

    /// `GET /phenomena/{phenomenonId}`
    pub async fn phenomenon(&self, phenomenon_id: &str) -> Result<Phenomenon> {
        let url = format!("{}phenomena/{phenomenon_id}", self.root);
        self.fetch(&url).await
    }

    /// `GET /height-types`
    pub async fn height_types(&self) -> Result<Vec<HeightType>> {
        let url = format!("{}height-types", self.root);
        self.fetch(&url).await
    }

    /// `GET /height-types/{heightTypeId}`
    pub async fn height_type(&self, height_type_id: &str) -> Result<HeightType> {
        let url = format!("{}height-types/{height_type_id}", self.root);
        self.fetch(&url).await
    }
}
