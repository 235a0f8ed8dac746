use axum::{
    extract::{Path, Query, State},
    http::HeaderValue,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use common::models::{FoodTruck, FoodTruckPage, FoodTruckQuery};

use super::models::Welcome;
use crate::services::{AppError, CatalogService};

pub async fn root() -> Json<Welcome> {
    Json(Welcome::default())
}

pub async fn list_food_trucks(
    Query(params): Query<FoodTruckQuery>,
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<FoodTruckPage>, AppError> {
    Ok(Json(service.search(&params)?))
}

pub async fn food_trucks_by_status(
    Path(status): Path<String>,
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<Vec<FoodTruck>>, AppError> {
    Ok(Json(service.by_status(&status)?))
}

fn cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

// Define all API routes
pub fn routes(service: Arc<CatalogService>, origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/foodtrucks", get(list_food_trucks))
        .route("/foodtrucks/", get(list_food_trucks))
        .route("/foodtrucks/status/{status}", get(food_trucks_by_status))
        .layer(cors(origins))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
