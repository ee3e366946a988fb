use axum::{
    extract::{Query, State},
    Extension, Json,
};
use dinescout_core::{RestaurantRecord, SearchIntent};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, map_query_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CuisineQuery {
    pub cuisine: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LocationQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CuisineMatches {
    total: usize,
    restaurants: Vec<RestaurantRecord>,
}

/// Location results are returned in full; the client pages them itself.
#[derive(Debug, Serialize)]
pub(super) struct LocationMatches {
    restaurants: Vec<RestaurantRecord>,
}

pub(super) async fn search_by_cuisine(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CuisineQuery>,
) -> Result<Json<CuisineMatches>, ApiError> {
    let intent = SearchIntent::by_cuisine_text(query.cuisine.as_deref())
        .map_err(|e| map_query_error(req_id.0.clone(), &e))?;

    let restaurants = state
        .store
        .find_matching(&intent.into_filter())
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(CuisineMatches {
        total: restaurants.len(),
        restaurants,
    }))
}

pub(super) async fn search_by_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<LocationMatches>, ApiError> {
    let intent = SearchIntent::by_location_params(
        query.latitude.as_deref(),
        query.longitude.as_deref(),
        query.radius.as_deref(),
        state.settings.default_search_radius,
    )
    .map_err(|e| map_query_error(req_id.0.clone(), &e))?;

    let restaurants = state
        .store
        .find_matching(&intent.into_filter())
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(LocationMatches { restaurants }))
}
