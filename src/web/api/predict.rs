use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::predict::{predict_passes_for_tle, PassEvent};
use crate::tle::{build_tle, TleLinePair};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

const MAX_PASSES: usize = 50;

#[derive(Debug, Deserialize)]
pub struct PassesQuery {
    pub count: Option<usize>,
    pub start: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PassesResponse {
    pub norad_id: u32,
    pub object_name: String,
    pub tle: TleLinePair,
    pub transmit_frequency_hz: f64,
    pub passes: Vec<PassEvent>,
}

#[utoipa::path(
    get,
    path = "/api/passes/{norad_id}",
    tag = "predict",
    params(
        ("norad_id" = u32, Path, description = "NORAD catalog number"),
        ("count" = Option<usize>, Query, description = "Number of passes, 1 to 50"),
        ("start" = Option<String>, Query, description = "Search start (RFC3339), defaults to now")
    ),
    responses(
        (status = 200, description = "Upcoming passes with Doppler shift", body = PassesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Unknown object or no pass found", body = ErrorResponse),
        (status = 502, description = "Propagator rejected the elements", body = ErrorResponse)
    )
)]
pub async fn list_passes(
    State(state): State<AppState>,
    Path(norad_id): Path<u32>,
    Query(query): Query<PassesQuery>,
) -> ApiResult<Json<PassesResponse>> {
    if query.count.is_some_and(|c| c == 0 || c > MAX_PASSES) {
        return Err(ApiError::Validation(format!("count must be between 1 and {}", MAX_PASSES)));
    }
    let start = match query.start.as_deref() {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ApiError::Validation(format!("invalid start: {}", e)))?,
        None => Utc::now(),
    };

    let record = state.catalog.get(norad_id)?;
    let tle = build_tle(record, 0)?;
    let object_name = record.display_name();
    let pass_query = state.config.predict.query(start, query.count);

    let station = state.station;
    let name = record.object_name.clone();
    let tle_for_worker = tle.clone();
    let worker_query = pass_query.clone();
    let passes = tokio::task::spawn_blocking(move || {
        predict_passes_for_tle(&station, name, &tle_for_worker, &worker_query)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(PassesResponse {
        norad_id,
        object_name,
        tle,
        transmit_frequency_hz: pass_query.transmit_frequency_hz,
        passes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::testing::state_with_catalog;

    #[tokio::test]
    async fn predicts_ordered_passes() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_catalog(dir.path());
        let query = PassesQuery {
            count: Some(2),
            start: Some("2024-05-02T07:00:00Z".to_string()),
        };
        let Json(response) = list_passes(State(state), Path(57482), Query(query))
            .await
            .unwrap();
        assert_eq!(response.passes.len(), 2);
        assert!(response.passes[0].set_time < response.passes[1].rise_time);
        for pass in &response.passes {
            assert!(pass.rise_time <= pass.peak_time);
            assert!(pass.peak_time <= pass.set_time);
        }
    }

    #[tokio::test]
    async fn rejects_bad_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_catalog(dir.path());
        let zero = PassesQuery {
            count: Some(0),
            start: None,
        };
        assert!(matches!(
            list_passes(State(state.clone()), Path(57482), Query(zero)).await,
            Err(ApiError::Validation(_))
        ));
        let bad_start = PassesQuery {
            count: None,
            start: Some("yesterday".to_string()),
        };
        assert!(matches!(
            list_passes(State(state), Path(57482), Query(bad_start)).await,
            Err(ApiError::Validation(_))
        ));
    }
}
