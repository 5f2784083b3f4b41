use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::predict::GroundStation;

use super::api::catalog as catalog_handlers;
use super::api::predict as predict_handlers;
use super::api::tle as tle_handlers;
use super::api_doc::ApiDoc;

/// Read-only state shared by all requests. Each pass prediction builds its own
/// propagator.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub station: GroundStation,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/catalog", get(catalog_handlers::list_objects))
        .route("/api/tle/{norad_id}", get(tle_handlers::get_tle))
        .route("/api/passes/{norad_id}", get(predict_handlers::list_passes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let station = config
        .ground_station()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let catalog = match Catalog::load(&config.catalog.path) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!("Failed to load catalog: {}", e);
            Catalog::empty()
        }
    };
    if catalog.is_empty() {
        log::warn!("Catalog is empty; TLE and pass endpoints will return 404");
    } else {
        log::info!("Catalog holds {} objects", catalog.len());
    }
    let (lat, lon) = (station.latitude_deg, station.longitude_deg);
    log::info!("Station at {:.4}, {:.4}", lat, lon);

    let state = AppState {
        config: Arc::new(config),
        catalog: Arc::new(catalog),
        station,
    };

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await
}
