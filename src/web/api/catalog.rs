use axum::{extract::State, Json};

use crate::catalog::CatalogObject;
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Loaded catalog objects", body = Vec<CatalogObject>)
    )
)]
pub async fn list_objects(State(state): State<AppState>) -> Json<Vec<CatalogObject>> {
    Json(state.catalog.objects())
}
