use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::tle::{generate_history, TleHistory};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize)]
pub struct TleQuery {
    pub offsets: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TleResponse {
    pub norad_id: u32,
    pub object_name: String,
    pub history: TleHistory,
}

#[utoipa::path(
    get,
    path = "/api/tle/{norad_id}",
    tag = "tle",
    params(
        ("norad_id" = u32, Path, description = "NORAD catalog number"),
        ("offsets" = Option<String>, Query, description = "Minutes before epoch, e.g. 0,4,6,8")
    ),
    responses(
        (status = 200, description = "TLE per offset", body = TleResponse),
        (status = 400, description = "Invalid offsets", body = ErrorResponse),
        (status = 404, description = "Unknown catalog number", body = ErrorResponse),
        (status = 422, description = "Record cannot be encoded", body = ErrorResponse)
    )
)]
pub async fn get_tle(
    State(state): State<AppState>,
    Path(norad_id): Path<u32>,
    Query(query): Query<TleQuery>,
) -> ApiResult<Json<TleResponse>> {
    let offsets = match query.offsets.as_deref() {
        Some(raw) => parse_offsets(raw)?,
        None => state.config.tle.offsets_minutes.clone(),
    };

    let record = state.catalog.get(norad_id)?;
    let history = generate_history(record, &offsets)?;

    Ok(Json(TleResponse {
        norad_id,
        object_name: record.display_name(),
        history,
    }))
}

pub(crate) fn parse_offsets(raw: &str) -> Result<Vec<u32>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| ApiError::Validation(format!("invalid offset '{}'", s)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_list() {
        assert!(matches!(parse_offsets("0, 4,6,8"), Ok(v) if v == vec![0, 4, 6, 8]));
        assert!(matches!(parse_offsets(""), Ok(v) if v.is_empty()));
        assert!(matches!(parse_offsets("0,-4"), Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn returns_history_for_known_object() {
        let dir = tempfile::tempdir().unwrap();
        let state = crate::web::api::testing::state_with_catalog(dir.path());
        let query = TleQuery {
            offsets: Some("0,4".to_string()),
        };
        let Json(response) = get_tle(State(state), Path(57482), Query(query))
            .await
            .unwrap();
        assert_eq!(response.object_name, "VELOX-AM");
        assert_eq!(response.history.entries.len(), 2);
        let line1 = &response.history.entries[1].tle.line1;
        assert_eq!(&line1[18..32], "24123.26823060");
    }

    #[tokio::test]
    async fn unknown_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = crate::web::api::testing::state_with_catalog(dir.path());
        let result = get_tle(State(state), Path(1), Query(TleQuery { offsets: None })).await;
        assert!(matches!(
            result,
            Err(ApiError::Catalog(crate::catalog::CatalogError::UnknownObject(1)))
        ));
    }
}
