use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Extension, Json,
};
use dinescout_core::{RestaurantRecord, SearchIntent};
use dinescout_vision::detect_search_tags;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, map_query_error, map_vision_error, ApiError, AppState};

pub(super) const NO_CUISINE_MESSAGE: &str = "No relevant cuisine detected in the image.";
const MISSING_INPUT_MESSAGE: &str = "an image or a query is required";

/// Multipart fields accepted by image search. Unknown fields are ignored.
#[derive(Debug, Default)]
struct ImageSearchForm {
    image: Option<Bytes>,
    query: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum ImageSearchResponse {
    Matched {
        success: bool,
        #[serde(rename = "searchTags")]
        search_tags: Vec<String>,
        total: usize,
        restaurants: Vec<RestaurantRecord>,
    },
    NoCuisine {
        success: bool,
        message: &'static str,
    },
}

/// Classifies an uploaded image and searches by the cuisine tags it yields.
/// Without an image, the `query` field is used as a cuisine text search.
pub(super) async fn search_by_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageSearchResponse>, ApiError> {
    let form = match multipart {
        Ok(multipart) => read_form(multipart)
            .await
            .map_err(|e| map_multipart_error(req_id.0.clone(), &e))?,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "image search without a multipart body");
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                MISSING_INPUT_MESSAGE,
            ));
        }
    };

    let (search_tags, intent) = if let Some(image) = form.image {
        let Some(classifier) = state.classifier.as_deref() else {
            return Err(ApiError::new(
                req_id.0,
                "service_unavailable",
                "image search is not configured",
            ));
        };

        let tags = detect_search_tags(classifier, &image)
            .await
            .map_err(|e| map_vision_error(req_id.0.clone(), &e))?;
        if tags.is_empty() {
            return Ok(Json(ImageSearchResponse::NoCuisine {
                success: false,
                message: NO_CUISINE_MESSAGE,
            }));
        }

        let intent = SearchIntent::by_tags(tags.clone())
            .map_err(|e| map_query_error(req_id.0.clone(), &e))?;
        (tags, intent)
    } else {
        let term = form
            .query
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .ok_or_else(|| {
                ApiError::new(req_id.0.clone(), "validation_error", MISSING_INPUT_MESSAGE)
            })?;
        let intent = SearchIntent::by_cuisine_text(Some(term))
            .map_err(|e| map_query_error(req_id.0.clone(), &e))?;
        (vec![term.to_string()], intent)
    };

    let restaurants = state
        .store
        .find_matching(&intent.into_filter())
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(
        tags = ?search_tags,
        matches = restaurants.len(),
        "image search completed"
    );

    Ok(Json(ImageSearchResponse::Matched {
        success: true,
        search_tags,
        total: restaurants.len(),
        restaurants,
    }))
}

async fn read_form(mut multipart: Multipart) -> Result<ImageSearchForm, MultipartError> {
    let mut form = ImageSearchForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => {
                let bytes = field.bytes().await?;
                // An empty file part counts as no image.
                if !bytes.is_empty() {
                    form.image = Some(bytes);
                }
            }
            Some("query") => form.query = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}

fn map_multipart_error(request_id: String, error: &MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %error, "image upload exceeded the body limit");
        return ApiError::new(request_id, "payload_too_large", "uploaded image is too large");
    }
    tracing::debug!(error = %error, "malformed multipart body");
    ApiError::new(request_id, "validation_error", "malformed multipart body")
}
