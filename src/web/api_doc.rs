use utoipa::OpenApi;

use super::api::catalog as catalog_handlers;
use super::api::error::ErrorResponse;
use super::api::predict as predict_handlers;
use super::api::tle as tle_handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        catalog_handlers::list_objects,
        tle_handlers::get_tle,
        predict_handlers::list_passes,
    ),
    components(
        schemas(
            ErrorResponse,
            crate::catalog::CatalogObject,
            crate::tle::TleLinePair,
            crate::tle::TleHistory,
            crate::tle::TleHistoryEntry,
            crate::predict::PassEvent,
            tle_handlers::TleResponse,
            predict_handlers::PassesResponse,
        )
    ),
    info(
        title = "TLE Pass API",
        description = "Back-dated TLEs and ground-station pass predictions",
        version = "0.1.0"
    ),
    tags(
        (name = "catalog", description = "Loaded orbital elements"),
        (name = "tle", description = "TLE encoding"),
        (name = "predict", description = "Pass and Doppler prediction")
    )
)]
pub struct ApiDoc;
