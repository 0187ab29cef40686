//! Menu endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::db::{MenuRepo, Row};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId, ValidQuery};
use crate::http::server::AppState;
use crate::models::{MenuFilter, MenuListParams, ValidateMenuRequest};

/// GET /v1/restaurants/{id}/menu - alphabetical menu of one restaurant
#[instrument(skip(state))]
async fn list_menu(
    State(state): State<Arc<AppState>>,
    ValidId(restaurant_id): ValidId,
    ValidQuery(params): ValidQuery<MenuListParams>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let filter = MenuFilter::try_from(params)?;
    let rows = MenuRepo::new(state.executor.as_ref())
        .list_for_restaurant(restaurant_id, &filter)
        .await?;
    Ok(Json(rows))
}

/// POST /v1/menu/validate - which of the given item ids exist
///
/// The body is fully checked before any SQL is built.
#[instrument(skip(state, body))]
async fn validate_items(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<Json<Vec<Row>>, ApiError> {
    let req = ValidateMenuRequest::try_from(&body)?;
    tracing::debug!(count = req.item_ids.len(), "validating menu items");

    let rows = MenuRepo::new(state.executor.as_ref())
        .find_by_ids(&req.item_ids)
        .await?;
    Ok(Json(rows))
}

/// Menu routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/restaurants/{id}/menu", get(list_menu))
        .route("/v1/menu/validate", post(validate_items))
}
