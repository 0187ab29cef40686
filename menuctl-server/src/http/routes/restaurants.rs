//! Restaurant endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use crate::db::{RestaurantRepo, Row};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId, ValidQuery};
use crate::http::server::AppState;
use crate::models::{RestaurantFilter, RestaurantListParams, SetOpenRequest};

/// GET /v1/restaurants - filtered list, best rated first
#[instrument(skip(state))]
async fn list_restaurants(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<RestaurantListParams>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let filter = RestaurantFilter::try_from(params)?;
    let rows = RestaurantRepo::new(state.executor.as_ref())
        .list(&filter)
        .await?;
    Ok(Json(rows))
}

/// GET /v1/restaurants/{id}
#[instrument(skip(state))]
async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Row>, ApiError> {
    let row = RestaurantRepo::new(state.executor.as_ref())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "restaurant",
            id: id.get().to_string(),
        })?;
    Ok(Json(row))
}

/// PUT /v1/restaurants/{id}/open - toggle the open/closed flag
#[instrument(skip(state, body))]
async fn set_open(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(body): JsonBody,
) -> Result<Json<Row>, ApiError> {
    let req = SetOpenRequest::try_from(&body)?;

    let row = RestaurantRepo::new(state.executor.as_ref())
        .set_open(id, req.is_open)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "restaurant",
            id: id.get().to_string(),
        })?;

    tracing::info!(is_open = req.is_open, "restaurant open flag updated");
    Ok(Json(row))
}

/// Restaurant routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/restaurants", get(list_restaurants))
        .route("/v1/restaurants/{id}", get(get_restaurant))
        .route("/v1/restaurants/{id}/open", put(set_open))
}
