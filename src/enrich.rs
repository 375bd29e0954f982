//! # Metadata Enrichment
//!
//! Merges raw station metadata with the height-type, phenomenon, and
//! tide-table reference catalogs into one denormalized [`EnrichedStation`]:
//! names resolved to the configured language, heights converted to the
//! configured unit, every opaque cross-reference id replaced by the record it
//! pointed at.
//!
//! Lookups run sequentially: one height-type catalog fetch, one tide-table
//! fetch, and one phenomenon fetch per time-series entry (N+2 calls for N
//! series). Any failed lookup aborts the whole enrichment; the caller never
//! sees a partially enriched record.

use log::debug;

use crate::api::{IwlsClient, Transport};
use crate::config::{Language, Unit};
use crate::error::{Error, Result};
use crate::station::{
    EnrichedHeight, EnrichedSeries, EnrichedStation, StationMetadata, StationSummary,
};

/// Produce the denormalized station record for `summary` + `metadata`.
pub async fn enrich<T: Transport>(
    client: &IwlsClient<T>,
    summary: &StationSummary,
    metadata: &StationMetadata,
    language: Language,
    unit: Unit,
) -> Result<EnrichedStation> {
    // Catalogs are small; a linear scan per height beats building an index.
    let height_types = client.height_types().await?;
    let mut heights = Vec::with_capacity(metadata.heights.len());
    for height in &metadata.heights {
        let height_type = height_types
            .iter()
            .find(|t| t.id == height.height_type_id)
            .ok_or_else(|| {
                Error::DataShape(format!(
                    "height type {} not in catalog",
                    height.height_type_id
                ))
            })?;
        heights.push(EnrichedHeight {
            name: language.pick(&height_type.name_en, &height_type.name_fr),
            code: height_type.code.clone(),
            value: unit.convert(height.value),
        });
    }

    let tide_table = client.tide_table(&metadata.tide_table_id).await?;
    let tide_table = language.pick(&tide_table.name_en, &tide_table.name_fr);

    let mut time_series = Vec::with_capacity(metadata.time_series.len());
    for series in &metadata.time_series {
        let phenomenon = client.phenomenon(&series.phenomenon_id).await?;
        time_series.push(EnrichedSeries {
            code: series.code.clone(),
            name: language.pick(&phenomenon.name_en, &phenomenon.name_fr),
        });
    }

    debug!(
        "enriched station {}: {} heights, {} series, tide table {tide_table:?}",
        summary.id,
        heights.len(),
        time_series.len()
    );
    Ok(EnrichedStation {
        id: summary.id.clone(),
        code: summary.code.clone(),
        official_name: summary.official_name.clone(),
        operating: summary.operating,
        latitude: summary.latitude,
        longitude: summary.longitude,
        heights,
        time_series,
        tide_table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::API_ROOT;
    use crate::testing::StubTransport;
    use serde_json::json;

    fn summary() -> StationSummary {
        serde_json::from_value(json!({
            "id": "5cebf1df3d0f4a073c4bbcb5",
            "code": "00490",
            "officialName": "Halifax",
            "operating": true,
            "latitude": 44.666667,
            "longitude": -63.583333
        }))
        .unwrap()
    }

    fn metadata() -> StationMetadata {
        serde_json::from_value(json!({
            "heights": [
                { "heightTypeId": "ht-mwl", "value": 1.05 },
                { "heightTypeId": "ht-hhwlt", "value": 2.1 }
            ],
            "tideTableId": "tt-atl",
            "timeSeries": [{
                "id": "ts-1",
                "code": "wlo",
                "nameEn": "series name to discard",
                "nameFr": "nom de série à jeter",
                "phenomenonId": "ph-wl"
            }]
        }))
        .unwrap()
    }

    fn transport() -> StubTransport {
        StubTransport::new()
            .with(
                format!("{API_ROOT}height-types"),
                json!([
                    {
                        "id": "ht-mwl",
                        "code": "MWL",
                        "nameEn": "Mean water level",
                        "nameFr": "Niveau moyen de l'eau"
                    },
                    {
                        "id": "ht-hhwlt",
                        "code": "HHWLT",
                        "nameEn": "Higher high water, large tide",
                        "nameFr": "Pleine mer supérieure, grande marée"
                    }
                ]),
            )
            .with(
                format!("{API_ROOT}tide-tables/tt-atl"),
                json!({
                    "nameEn": "Atlantic Coast and Bay of Fundy",
                    "nameFr": "Côte de l'Atlantique et baie de Fundy"
                }),
            )
            .with(
                format!("{API_ROOT}phenomena/ph-wl"),
                json!({ "nameEn": "Water level", "nameFr": "Niveau d'eau" }),
            )
    }

    #[tokio::test]
    async fn enriches_to_localized_metric_record() {
        let client = IwlsClient::new(transport());
        let station = enrich(
            &client,
            &summary(),
            &metadata(),
            Language::English,
            Unit::Metres,
        )
        .await
        .unwrap();

        assert_eq!(station.official_name, "Halifax");
        assert_eq!(station.tide_table, "Atlantic Coast and Bay of Fundy");
        assert_eq!(station.heights[0].name, "Mean water level");
        assert_eq!(station.heights[0].code, "MWL");
        assert_eq!(station.heights[0].value, 1.05);
        // The series' own display name is replaced by the phenomenon's
        assert_eq!(station.time_series[0].code, "wlo");
        assert_eq!(station.time_series[0].name, "Water level");
    }

    #[tokio::test]
    async fn french_names_and_feet_conversion() {
        let client = IwlsClient::new(transport());
        let station = enrich(
            &client,
            &summary(),
            &metadata(),
            Language::French,
            Unit::Feet,
        )
        .await
        .unwrap();

        assert_eq!(station.heights[0].name, "Niveau moyen de l'eau");
        // 1.05 m * 3.28084 = 3.444882 -> 3.44 ft
        assert_eq!(station.heights[0].value, 3.44);
        // 2.1 m * 3.28084 = 6.889764 -> 6.89 ft
        assert_eq!(station.heights[1].value, 6.89);
        assert_eq!(station.time_series[0].name, "Niveau d'eau");
        assert_eq!(
            station.tide_table,
            "Côte de l'Atlantique et baie de Fundy"
        );
    }

    #[tokio::test]
    async fn enrichment_is_idempotent_for_identical_catalogs() {
        let client = IwlsClient::new(transport());
        let first = enrich(
            &client,
            &summary(),
            &metadata(),
            Language::English,
            Unit::Metres,
        )
        .await
        .unwrap();
        let second = enrich(
            &client,
            &summary(),
            &metadata(),
            Language::English,
            Unit::Metres,
        )
        .await
        .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unresolvable_height_type_is_a_data_shape_error() {
        let client = IwlsClient::new(
            StubTransport::new().with(format!("{API_ROOT}height-types"), json!([])),
        );
        let result = enrich(
            &client,
            &summary(),
            &metadata(),
            Language::English,
            Unit::Metres,
        )
        .await;
        assert!(matches!(result, Err(Error::DataShape(_))));
    }

    #[tokio::test]
    async fn failed_phenomenon_lookup_aborts_the_whole_enrichment() {
        // Everything stubbed except the phenomenon endpoint.
        let incomplete = StubTransport::new()
            .with(
                format!("{API_ROOT}height-types"),
                json!([
                    {
                        "id": "ht-mwl",
                        "code": "MWL",
                        "nameEn": "Mean water level",
                        "nameFr": "Niveau moyen de l'eau"
                    },
                    {
                        "id": "ht-hhwlt",
                        "code": "HHWLT",
                        "nameEn": "Higher high water, large tide",
                        "nameFr": "Pleine mer supérieure, grande marée"
                    }
                ]),
            )
            .with(
                format!("{API_ROOT}tide-tables/tt-atl"),
                json!({ "nameEn": "Atlantic", "nameFr": "Atlantique" }),
            );
        let client = IwlsClient::new(incomplete);
        let result = enrich(
            &client,
            &summary(),
            &metadata(),
            Language::English,
            Unit::Metres,
        )
        .await;
        assert!(matches!(result, Err(Error::DataShape(_))));
    }
}
