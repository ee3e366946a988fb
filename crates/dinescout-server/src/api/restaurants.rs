use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use dinescout_core::{normalize_page, PageRequest, PaginatedResult, RestaurantRecord, SearchIntent};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, map_query_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ListQuery {
    // Kept as a string so malformed values fall back to page 1 instead of
    // rejecting the request.
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct RestaurantPage {
    total: u64,
    page: u64,
    limit: u64,
    restaurants: Vec<RestaurantRecord>,
}

impl From<PaginatedResult<RestaurantRecord>> for RestaurantPage {
    fn from(result: PaginatedResult<RestaurantRecord>) -> Self {
        Self {
            total: result.total,
            page: result.page,
            limit: result.page_size,
            restaurants: result.items,
        }
    }
}

pub(super) async fn list_restaurants(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RestaurantPage>, ApiError> {
    let request = PageRequest::new(normalize_page(query.page.as_deref()));

    let total = state
        .store
        .count()
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    let items = state
        .store
        .find(request.skip(), request.page_size)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(PaginatedResult::new(request, items, total).into()))
}

pub(super) async fn get_restaurant(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(raw_id): Path<String>,
) -> Result<Json<RestaurantRecord>, ApiError> {
    let filter = SearchIntent::by_id(&raw_id)
        .map_err(|e| map_query_error(req_id.0.clone(), &e))?
        .into_filter();

    let record = state
        .store
        .find_matching(&filter)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .into_iter()
        .next();

    record.map(Json).ok_or_else(|| {
        ApiError::new(
            req_id.0,
            "not_found",
            format!("restaurant {} not found", raw_id.trim()),
        )
    })
}
